use async_trait::async_trait;
use chrono::{DateTime, Utc};
use courts_core::error::{CourtsError, Result};
use courts_core::models::{Facility, FacilityId, NewFacility};
use courts_geo::{Coordinate, GreatCircle, MEAN_EARTH_RADIUS_KM};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use super::PostgresStore;
use crate::ports::FacilityStore;

/// PostGIS measures geography on the WGS 84 spheroid while the engine uses a
/// mean-radius sphere; the two disagree by well under one percent.
const SPHEROID_SLACK: f64 = 1.01;

const FACILITY_COLUMNS: &str = r#"
    id, user_id, name,
    ST_Y(location::geometry) AS latitude,
    ST_X(location::geometry) AS longitude,
    address_line, city, country, image, created_at
"#;

/// Search distance in meters handed to `ST_DWithin`.
///
/// A model sphere smaller than the mean Earth shrinks every distance, so the
/// same kilometer radius covers more ground on the real spheroid.
fn search_radius_meters(radius_km: f64, model: &GreatCircle) -> f64 {
    let scale = (MEAN_EARTH_RADIUS_KM / model.earth_radius_km()).max(1.0);
    radius_km * scale * 1000.0 * SPHEROID_SLACK
}

fn decode(e: sqlx::Error) -> CourtsError {
    CourtsError::store_unavailable(format!("Bad facility row: {}", e))
}

fn facility_from_row(row: &PgRow) -> Result<Facility> {
    let id: Uuid = row.try_get("id").map_err(decode)?;
    let owner_id: Option<Uuid> = row.try_get("user_id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let latitude: f64 = row.try_get("latitude").map_err(decode)?;
    let longitude: f64 = row.try_get("longitude").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;

    let location = Coordinate::new(latitude, longitude).map_err(|e| {
        CourtsError::store_unavailable(format!("Stored facility {} has bad location: {}", id, e))
    })?;

    let details = NewFacility::new(
        name,
        location,
        row.try_get("address_line").map_err(decode)?,
        row.try_get("city").map_err(decode)?,
        row.try_get("country").map_err(decode)?,
        row.try_get("image").map_err(decode)?,
    )?
    .with_owner(owner_id);

    Ok(Facility::from_new(FacilityId(id), created_at, details))
}

#[async_trait]
impl FacilityStore for PostgresStore {
    async fn insert_facility(&self, facility: &NewFacility) -> Result<Facility> {
        let location = facility.location();

        let row = sqlx::query(
            r#"
            INSERT INTO facilities (user_id, name, location, address_line, city, country, image)
            VALUES ($1, $2, ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(facility.owner_id())
        .bind(facility.name())
        .bind(location.longitude())
        .bind(location.latitude())
        .bind(facility.address_line())
        .bind(facility.city())
        .bind(facility.country())
        .bind(facility.image())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CourtsError::store_unavailable(format!("Failed to store facility: {}", e)))?;

        let id: Uuid = row.try_get("id").map_err(decode)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;

        tracing::debug!(facility_id = %id, "Stored facility");

        Ok(Facility::from_new(FacilityId(id), created_at, facility.clone()))
    }

    async fn get_facility(&self, id: FacilityId) -> Result<Option<Facility>> {
        let query = format!("SELECT {} FROM facilities WHERE id = $1", FACILITY_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                CourtsError::store_unavailable(format!("Failed to get facility: {}", e))
            })?;

        row.as_ref().map(facility_from_row).transpose()
    }

    async fn list_facilities(&self) -> Result<Vec<Facility>> {
        let query =
            format!("SELECT {} FROM facilities ORDER BY created_at ASC, id ASC", FACILITY_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await.map_err(|e| {
            CourtsError::store_unavailable(format!("Failed to list facilities: {}", e))
        })?;

        rows.iter().map(facility_from_row).collect()
    }

    async fn replace_facility(
        &self,
        id: FacilityId,
        details: &NewFacility,
    ) -> Result<Option<Facility>> {
        let location = details.location();

        let query = format!(
            r#"
            UPDATE facilities
            SET name = $2,
                location = ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography,
                address_line = $5,
                city = $6,
                country = $7,
                image = $8
            WHERE id = $1
            RETURNING {}
            "#,
            FACILITY_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.0)
            .bind(details.name())
            .bind(location.longitude())
            .bind(location.latitude())
            .bind(details.address_line())
            .bind(details.city())
            .bind(details.country())
            .bind(details.image())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                CourtsError::store_unavailable(format!("Failed to replace facility: {}", e))
            })?;

        row.as_ref().map(facility_from_row).transpose()
    }

    async fn find_within_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Facility>> {
        let query = format!(
            r#"
            SELECT {}
            FROM facilities
            WHERE ST_DWithin(
                location,
                ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography,
                $3
            )
            "#,
            FACILITY_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(center.longitude())
            .bind(center.latitude())
            .bind(search_radius_meters(radius_km, &self.model))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                CourtsError::store_unavailable(format!("Failed to execute spatial query: {}", e))
            })?;

        rows.iter().map(facility_from_row).collect()
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}

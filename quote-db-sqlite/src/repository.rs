use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_core::{
    BillingCycle, CalculatorConfiguration, CalculatorSession, MaterialQuality,
    NewCalculatorSession, PaymentType, ProjectSize, RepositoryError, SessionOwner,
    SessionRepository, Urgency,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, sqlite::SqlitePool};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Configuration(format!(
                    "failed to read seeds directory '{}': {}",
                    seeds_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Configuration(format!(
                    "failed to read seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Database(format!(
                        "failed to execute seed file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

const SESSION_COLUMNS: &str =
    "id, owner_kind, owner_key, project_value, plan_id, billing_cycle, project_size,
     material_quality, urgency, payment_type, include_vat, is_preset, preset_name,
     created_at, updated_at";

#[derive(FromRow)]
struct CalculatorSessionRow {
    id: i64,
    owner_kind: String,
    owner_key: String,
    project_value: String,
    plan_id: String,
    billing_cycle: String,
    project_size: String,
    material_quality: String,
    urgency: String,
    payment_type: String,
    include_vat: bool,
    is_preset: bool,
    preset_name: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CalculatorSessionRow> for CalculatorSession {
    type Error = RepositoryError;

    fn try_from(row: CalculatorSessionRow) -> Result<Self, Self::Error> {
        let owner = SessionOwner::from_kind_and_key(&row.owner_kind, row.owner_key)
            .ok_or_else(|| {
                RepositoryError::Database(format!("Invalid owner kind: {}", row.owner_kind))
            })?;

        let configuration = CalculatorConfiguration {
            project_value: parse_decimal(&row.project_value)?,
            plan_id: row.plan_id,
            billing_cycle: parse_enum(&row.billing_cycle, BillingCycle::parse, "billing cycle")?,
            project_size: parse_enum(&row.project_size, ProjectSize::parse, "project size")?,
            material_quality: parse_enum(
                &row.material_quality,
                MaterialQuality::parse,
                "material quality",
            )?,
            urgency: parse_enum(&row.urgency, Urgency::parse, "urgency")?,
            payment_type: parse_enum(&row.payment_type, PaymentType::parse, "payment type")?,
            include_vat: row.include_vat,
        };

        Ok(CalculatorSession {
            id: row.id,
            owner,
            configuration,
            is_preset: row.is_preset,
            preset_name: row.preset_name,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

fn parse_enum<T>(
    s: &str,
    parse: fn(&str) -> Option<T>,
    what: &str,
) -> Result<T, RepositoryError> {
    parse(s).ok_or_else(|| RepositoryError::Database(format!("Invalid {}: {}", what, s)))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    // SQLite stores timestamps in various formats, try common ones
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

fn now_string() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Writes that can trip the live-session uniqueness index surface
/// [`RepositoryError::DuplicateSession`] instead of an opaque database error.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db)
            if db.kind() == sqlx::error::ErrorKind::UniqueViolation =>
        {
            RepositoryError::DuplicateSession
        }
        _ => RepositoryError::Database(e.to_string()),
    }
}

fn check_preset_fields(
    is_preset: bool,
    preset_name: Option<&str>,
) -> Result<(), RepositoryError> {
    if is_preset != preset_name.is_some() {
        return Err(RepositoryError::Configuration(
            "preset sessions require a preset name and live sessions must not carry one"
                .to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn get_session(&self, id: i64) -> Result<CalculatorSession, RepositoryError> {
        let row: CalculatorSessionRow = sqlx::query_as(&format!(
            "SELECT {SESSION_COLUMNS} FROM calculator_session WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn get_by_owner(
        &self,
        owner: &SessionOwner,
    ) -> Result<Option<CalculatorSession>, RepositoryError> {
        let row: Option<CalculatorSessionRow> = sqlx::query_as(&format!(
            "SELECT {SESSION_COLUMNS} FROM calculator_session
             WHERE owner_kind = ? AND owner_key = ? AND is_preset = 0"
        ))
        .bind(owner.kind())
        .bind(owner.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn create_session(
        &self,
        session: NewCalculatorSession,
    ) -> Result<CalculatorSession, RepositoryError> {
        check_preset_fields(session.is_preset, session.preset_name.as_deref())?;

        let now = now_string();
        let config = &session.configuration;

        let result = sqlx::query(
            "INSERT INTO calculator_session (
                owner_kind, owner_key, project_value, plan_id, billing_cycle,
                project_size, material_quality, urgency, payment_type, include_vat,
                is_preset, preset_name, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(session.owner.kind())
        .bind(session.owner.key())
        .bind(config.project_value.to_string())
        .bind(&config.plan_id)
        .bind(config.billing_cycle.as_str())
        .bind(config.project_size.as_str())
        .bind(config.material_quality.as_str())
        .bind(config.urgency.as_str())
        .bind(config.payment_type.as_str())
        .bind(config.include_vat)
        .bind(session.is_preset)
        .bind(&session.preset_name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, owner = %session.owner.key(), preset = session.is_preset, "created session");
        self.get_session(id).await
    }

    async fn update_session(
        &self,
        session: &CalculatorSession,
    ) -> Result<(), RepositoryError> {
        check_preset_fields(session.is_preset, session.preset_name.as_deref())?;

        let now = now_string();
        let config = &session.configuration;

        let result = sqlx::query(
            "UPDATE calculator_session SET
                project_value = ?, plan_id = ?, billing_cycle = ?, project_size = ?,
                material_quality = ?, urgency = ?, payment_type = ?, include_vat = ?,
                preset_name = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(config.project_value.to_string())
        .bind(&config.plan_id)
        .bind(config.billing_cycle.as_str())
        .bind(config.project_size.as_str())
        .bind(config.material_quality.as_str())
        .bind(config.urgency.as_str())
        .bind(config.payment_type.as_str())
        .bind(config.include_vat)
        .bind(&session.preset_name)
        .bind(&now)
        .bind(session.id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn upsert_session(
        &self,
        owner: &SessionOwner,
        configuration: &CalculatorConfiguration,
    ) -> Result<CalculatorSession, RepositoryError> {
        let now = now_string();

        // Single atomic statement against the live-session unique index:
        // no read-then-write window for two concurrent upserts to race in.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO calculator_session (
                owner_kind, owner_key, project_value, plan_id, billing_cycle,
                project_size, material_quality, urgency, payment_type, include_vat,
                is_preset, preset_name, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, NULL, ?, ?)
            ON CONFLICT (owner_kind, owner_key) WHERE is_preset = 0 DO UPDATE SET
                project_value = excluded.project_value,
                plan_id = excluded.plan_id,
                billing_cycle = excluded.billing_cycle,
                project_size = excluded.project_size,
                material_quality = excluded.material_quality,
                urgency = excluded.urgency,
                payment_type = excluded.payment_type,
                include_vat = excluded.include_vat,
                updated_at = excluded.updated_at
            RETURNING id",
        )
        .bind(owner.kind())
        .bind(owner.key())
        .bind(configuration.project_value.to_string())
        .bind(&configuration.plan_id)
        .bind(configuration.billing_cycle.as_str())
        .bind(configuration.project_size.as_str())
        .bind(configuration.material_quality.as_str())
        .bind(configuration.urgency.as_str())
        .bind(configuration.payment_type.as_str())
        .bind(configuration.include_vat)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        tracing::debug!(id, owner = %owner.key(), "upserted live session");
        self.get_session(id).await
    }

    async fn save_as_preset(
        &self,
        owner: &SessionOwner,
        configuration: &CalculatorConfiguration,
        name: &str,
    ) -> Result<CalculatorSession, RepositoryError> {
        self.create_session(NewCalculatorSession {
            owner: owner.clone(),
            configuration: configuration.clone(),
            is_preset: true,
            preset_name: Some(name.to_string()),
        })
        .await
    }

    async fn list_presets(
        &self,
        owner: Option<&SessionOwner>,
    ) -> Result<Vec<CalculatorSession>, RepositoryError> {
        let rows: Vec<CalculatorSessionRow> = match owner {
            Some(owner) => {
                sqlx::query_as(&format!(
                    "SELECT {SESSION_COLUMNS} FROM calculator_session
                     WHERE is_preset = 1 AND owner_kind = ? AND owner_key = ?
                     ORDER BY updated_at DESC, id DESC"
                ))
                .bind(owner.kind())
                .bind(owner.key())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {SESSION_COLUMNS} FROM calculator_session
                     WHERE is_preset = 1
                     ORDER BY updated_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn delete_session(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM calculator_session WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

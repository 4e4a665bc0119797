//! SQLite persistence for diagnosis results.

use crate::error::AppError;
use crate::models::{DiagnosisRecord, SelectedService};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

type DiagnosisRow = (
    String,         // id
    String,         // company_name
    i64,            // employee_count
    String,         // email
    String,         // name
    String,         // current_services (JSON)
    i64,            // current_cost
    i64,            // gws_cost
    i64,            // savings
    Option<String>, // satisfaction
    Option<String>, // feature_comparison
    String,         // created_at
);

/// Store for diagnosis submissions
///
/// Manages the SQLite connection pool and runs embedded migrations on
/// connect.
pub struct DiagnosisStore {
    pool: SqlitePool,
}

impl DiagnosisStore {
    /// Open (or create) the database at `database_url` and migrate it.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .context("Failed to connect to diagnosis database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run diagnosis database migrations")?;

        info!("Diagnosis database ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool. Migrations are the caller's responsibility.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new diagnosis record. Ignores any caller-supplied id or
    /// timestamp and returns the generated id.
    pub async fn insert(&self, record: &DiagnosisRecord) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let current_services = serde_json::to_string(&record.current_services)?;

        sqlx::query(
            r#"
            INSERT INTO diagnosis_results (
                id, company_name, employee_count, email, name,
                current_services, current_cost, gws_cost, savings,
                satisfaction, feature_comparison, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&record.company_name)
        .bind(record.employee_count)
        .bind(&record.email)
        .bind(&record.name)
        .bind(&current_services)
        .bind(record.current_cost)
        .bind(record.gws_cost)
        .bind(record.savings)
        .bind(&record.satisfaction)
        .bind(&record.feature_comparison)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Fetch one record by id.
    pub async fn fetch(&self, id: &str) -> Result<Option<DiagnosisRecord>, AppError> {
        let row = sqlx::query_as::<_, DiagnosisRow>(
            r#"
            SELECT id, company_name, employee_count, email, name,
                   current_services, current_cost, gws_cost, savings,
                   satisfaction, feature_comparison, created_at
            FROM diagnosis_results
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_record).transpose()
    }

    /// Most recent records, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<DiagnosisRecord>, AppError> {
        let rows = sqlx::query_as::<_, DiagnosisRow>(
            r#"
            SELECT id, company_name, employee_count, email, name,
                   current_services, current_cost, gws_cost, savings,
                   satisfaction, feature_comparison, created_at
            FROM diagnosis_results
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }
}

fn row_to_record(row: DiagnosisRow) -> Result<DiagnosisRecord, AppError> {
    let (
        id,
        company_name,
        employee_count,
        email,
        name,
        current_services,
        current_cost,
        gws_cost,
        savings,
        satisfaction,
        feature_comparison,
        created_at,
    ) = row;

    let current_services: Vec<SelectedService> = serde_json::from_str(&current_services)?;

    Ok(DiagnosisRecord {
        id: Some(id),
        company_name,
        employee_count,
        email,
        name,
        current_services,
        current_cost,
        gws_cost,
        savings,
        satisfaction,
        feature_comparison,
        created_at: Some(created_at),
    })
}

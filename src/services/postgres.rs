use crate::config::DatabaseSettings;
use crate::models::{Address, Role, SchemeRecord, User};
use crate::services::StoreError;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

/// PostgreSQL-backed user store
///
/// Address and eligibility snapshot are stored as JSONB columns; the rest of
/// the user maps onto plain columns of the `users` table.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL (max: {} connections)",
            settings.max_connections
        );

        Self::new(
            &settings.url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs),
            Duration::from_secs(settings.idle_timeout_secs),
        )
        .await
    }

    #[cfg(test)]
    pub(crate) fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO users (
                id, name, middle_name, last_name, father_or_husband_name,
                mobile_number, email, gender, dob, caste, income,
                aadhar_number, pan_number, password_hash, address, role,
                scheme_eligibility, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
        "#;

        let result = sqlx::query(query)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.middle_name)
            .bind(&user.last_name)
            .bind(&user.father_or_husband_name)
            .bind(&user.mobile_number)
            .bind(&user.email)
            .bind(&user.gender)
            .bind(user.dob)
            .bind(&user.caste)
            .bind(user.income)
            .bind(&user.aadhar_number)
            .bind(&user.pan_number)
            .bind(&user.password_hash)
            .bind(Json(&user.address))
            .bind(user.role.as_str())
            .bind(Json(&user.scheme_eligibility))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!("Inserted user {}", user.mobile_number);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict(user.mobile_number.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_mobile(&self, mobile_number: &str) -> Result<Option<User>, StoreError> {
        let query = r#"
            SELECT id, name, middle_name, last_name, father_or_husband_name,
                   mobile_number, email, gender, dob, caste, income,
                   aadhar_number, pan_number, password_hash, address, role,
                   scheme_eligibility, created_at, updated_at
            FROM users
            WHERE mobile_number = $1
        "#;

        let row = sqlx::query(query)
            .bind(mobile_number)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    pub async fn save_eligibility(&self, user: &User) -> Result<(), StoreError> {
        let query = r#"
            UPDATE users
            SET scheme_eligibility = $2, updated_at = $3
            WHERE mobile_number = $1
        "#;

        let result = sqlx::query(query)
            .bind(&user.mobile_number)
            .bind(Json(&user.scheme_eligibility))
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user.mobile_number.clone()));
        }

        tracing::debug!(
            "Stored {} eligible schemes for {}",
            user.scheme_eligibility.len(),
            user.mobile_number
        );

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let role: String = row.try_get("role")?;
    let role = Role::parse(&role)
        .ok_or_else(|| StoreError::InvalidData(format!("unknown role '{}'", role)))?;
    let Json(address): Json<Address> = row.try_get("address")?;
    let Json(scheme_eligibility): Json<Vec<SchemeRecord>> = row.try_get("scheme_eligibility")?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        middle_name: row.try_get("middle_name")?,
        last_name: row.try_get("last_name")?,
        father_or_husband_name: row.try_get("father_or_husband_name")?,
        mobile_number: row.try_get("mobile_number")?,
        email: row.try_get("email")?,
        gender: row.try_get("gender")?,
        dob: row.try_get("dob")?,
        caste: row.try_get("caste")?,
        income: row.try_get("income")?,
        aadhar_number: row.try_get("aadhar_number")?,
        pan_number: row.try_get("pan_number")?,
        password_hash: row.try_get("password_hash")?,
        address,
        role,
        scheme_eligibility,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

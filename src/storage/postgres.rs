//! PostgreSQL car store backed by a `sqlx` connection pool.

use crate::domain::car::{CREATE_TABLE_SQL, TABLE_NAME};
use crate::domain::{Car, CarPatch, NewCar};
use crate::storage::{CarStore, StoreError, StoreResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

const SELECT_COLUMNS: &str = "id, name_of_mark, name_of_model, mileage, number_of_owners";

/// A car store that uses a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresCarStore {
    pool: PgPool,
}

impl PostgresCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and provisions the `cars` table.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.provision_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `cars` table if it does not exist yet.
    pub async fn provision_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        tracing::info!(table = TABLE_NAME, "schema provisioned");
        Ok(())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl CarStore for PostgresCarStore {
    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        let sql = format!("SELECT {} FROM cars ORDER BY id", SELECT_COLUMNS);
        let cars = sqlx::query_as::<_, Car>(&sql).fetch_all(&self.pool).await?;
        Ok(cars)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Car> {
        let sql = format!("SELECT {} FROM cars WHERE id = $1", SELECT_COLUMNS);
        sqlx::query_as::<_, Car>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, car: NewCar) -> StoreResult<Car> {
        let sql = format!(
            "INSERT INTO cars (name_of_mark, name_of_model, mileage, number_of_owners)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            SELECT_COLUMNS
        );
        let stored = sqlx::query_as::<_, Car>(&sql)
            .bind(&car.name_of_mark)
            .bind(&car.name_of_model)
            .bind(car.mileage)
            .bind(car.number_of_owners)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_by_id(&self, id: i64, patch: &CarPatch) -> StoreResult<()> {
        if patch.is_empty() {
            return if self.exists(id).await? {
                Ok(())
            } else {
                Err(StoreError::NotFound(id))
            };
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE cars SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(v) = &patch.name_of_mark {
                set.push("name_of_mark = ");
                set.push_bind_unseparated(v.clone());
            }
            if let Some(v) = &patch.name_of_model {
                set.push("name_of_model = ");
                set.push_bind_unseparated(v.clone());
            }
            if let Some(v) = patch.mileage {
                set.push("mileage = ");
                set.push_bind_unseparated(v);
            }
            if let Some(v) = patch.number_of_owners {
                set.push("number_of_owners = ");
                set.push_bind_unseparated(v);
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

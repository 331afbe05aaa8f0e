//! Process-local car store.
//!
//! Mirrors the observable behaviour of the PostgreSQL store (id sequence,
//! ordering, rejection of NUL bytes in text columns) so the HTTP layer can be
//! exercised and run without a database.

use crate::domain::{Car, CarPatch, NewCar};
use crate::storage::{CarStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    last_id: i64,
    cars: BTreeMap<i64, Car>,
}

#[derive(Default)]
pub struct InMemoryCarStore {
    rows: RwLock<Rows>,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.cars.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// Postgres TEXT cannot hold NUL; same failure as SQLSTATE 22021.
fn check_text<'a>(values: impl IntoIterator<Item = &'a str>) -> StoreResult<()> {
    if values.into_iter().any(|v| v.contains('\0')) {
        return Err(StoreError::Rejected(
            "invalid byte sequence for encoding \"UTF8\": 0x00".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        let rows = self.rows.read().await;
        Ok(rows.cars.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Car> {
        let rows = self.rows.read().await;
        rows.cars.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, car: NewCar) -> StoreResult<Car> {
        check_text([car.name_of_mark.as_str(), car.name_of_model.as_str()])?;
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let stored = car.into_car(rows.last_id);
        rows.cars.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_by_id(&self, id: i64, patch: &CarPatch) -> StoreResult<()> {
        check_text(patch.text_fields())?;
        let mut rows = self.rows.write().await;
        let car = rows.cars.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply_to(car);
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        rows.cars
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

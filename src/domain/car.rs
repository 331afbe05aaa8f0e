//! The Car entity and the payloads that create or mutate it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the table backing the Car entity.
pub const TABLE_NAME: &str = "cars";

/// DDL used to provision the `cars` table at startup.
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS cars (
    id BIGSERIAL PRIMARY KEY,
    name_of_mark TEXT NOT NULL,
    name_of_model TEXT NOT NULL,
    mileage BIGINT NOT NULL,
    number_of_owners BIGINT NOT NULL
)";

/// A persisted car record.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub name_of_mark: String,
    pub name_of_model: String,
    pub mileage: i64,
    pub number_of_owners: i64,
}

/// Body of `POST /cars`. Any `id` sent by the client is ignored; omitted
/// fields are stored as `""` or `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewCar {
    #[serde(default)]
    pub name_of_mark: String,
    #[serde(default)]
    pub name_of_model: String,
    #[serde(default)]
    pub mileage: i64,
    #[serde(default)]
    pub number_of_owners: i64,
}

impl NewCar {
    pub fn into_car(self, id: i64) -> Car {
        Car {
            id,
            name_of_mark: self.name_of_mark,
            name_of_model: self.name_of_model,
            mileage: self.mileage,
            number_of_owners: self.number_of_owners,
        }
    }
}

/// Partial update of a car. Only the fields present are written; a present
/// zero or empty value is written too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_of_mark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_of_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_owners: Option<i64>,
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self.name_of_mark.is_none()
            && self.name_of_model.is_none()
            && self.mileage.is_none()
            && self.number_of_owners.is_none()
    }

    /// Applies the present fields to `car` in place.
    pub fn apply_to(&self, car: &mut Car) {
        if let Some(v) = &self.name_of_mark {
            car.name_of_mark = v.clone();
        }
        if let Some(v) = &self.name_of_model {
            car.name_of_model = v.clone();
        }
        if let Some(v) = self.mileage {
            car.mileage = v;
        }
        if let Some(v) = self.number_of_owners {
            car.number_of_owners = v;
        }
    }

    /// Text fields carried by this patch (used for store-side checks).
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        self.name_of_mark
            .as_deref()
            .into_iter()
            .chain(self.name_of_model.as_deref())
    }
}

/// One item of the `PUT /cars` array: the target id plus the fields to overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CarReplacement {
    pub id: i64,
    #[serde(flatten)]
    pub changes: CarPatch,
}

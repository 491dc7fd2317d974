//! Driver profiles.
//!
//! `status` is the driver's availability. `sending` marks a driver reserved by
//! an order in flight and is only ever set or cleared by the order workflow.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, transactions::string_enum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

string_enum!(VehicleType, "vehicle type", {
    Car => "car",
    Motorcycle => "motorcycle",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Offline,
    Online,
    Suspended,
    Sending,
}

string_enum!(DriverStatus, "driver status", {
    Offline => "offline",
    Online => "online",
    Suspended => "suspended",
    Sending => "sending",
});

#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    pub id: i64,
    pub user_id: i64,
    pub license_number: String,
    pub vehicle_plate: String,
    pub vehicle_type: VehicleType,
    pub status: DriverStatus,
    pub is_verified: bool,
    pub current_location: Option<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::Online && self.is_verified
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "driver_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub license_number: String,
    #[sea_orm(unique)]
    pub vehicle_plate: String,
    pub vehicle_type: String,
    pub status: String,
    pub is_verified: bool,
    pub current_location: Option<String>,
    pub rating: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Driver {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            license_number: model.license_number,
            vehicle_plate: model.vehicle_plate,
            vehicle_type: VehicleType::try_from(model.vehicle_type.as_str())?,
            status: DriverStatus::try_from(model.status.as_str())?,
            is_verified: model.is_verified,
            current_location: model.current_location,
            rating: model.rating,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspend_spelling_is_rejected() {
        assert_eq!(
            DriverStatus::try_from("suspended").unwrap(),
            DriverStatus::Suspended
        );
        assert!(DriverStatus::try_from("suspend").is_err());
        assert!(VehicleType::try_from("bicycle").is_err());
    }
}

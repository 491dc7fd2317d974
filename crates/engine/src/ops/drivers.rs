use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Driver, DriverStatus, EngineError, NewDriverCmd, ResultEngine, SetDriverStatusCmd,
    UpdateDriverCmd, VehicleType, drivers,
    util::{normalize_optional_text, normalize_required_text},
};

use super::Engine;

impl Engine {
    /// Register a driver user and its profile. New drivers start offline and
    /// unverified.
    pub async fn create_driver(&self, cmd: NewDriverCmd) -> ResultEngine<Driver> {
        let NewDriverCmd {
            user,
            license_number,
            vehicle_plate,
            vehicle_type,
            current_location,
        } = cmd;
        let license_number = normalize_required_text(&license_number, "license number")?;
        let vehicle_plate = normalize_required_text(&vehicle_plate, "vehicle plate")?;

        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let taken = drivers::Entity::find()
                        .filter(
                            drivers::Column::LicenseNumber
                                .eq(license_number.as_str())
                                .or(drivers::Column::VehiclePlate.eq(vehicle_plate.as_str())),
                        )
                        .one(db_tx)
                        .await?;
                    if let Some(existing) = taken {
                        let key = if existing.license_number == license_number {
                            license_number
                        } else {
                            vehicle_plate
                        };
                        return Err(EngineError::ExistingKey(key));
                    }

                    let now = Utc::now();
                    let user = engine.insert_user(db_tx, user, now).await?;
                    let model = drivers::ActiveModel {
                        id: ActiveValue::NotSet,
                        user_id: ActiveValue::Set(user.id),
                        license_number: ActiveValue::Set(license_number),
                        vehicle_plate: ActiveValue::Set(vehicle_plate),
                        vehicle_type: ActiveValue::Set(vehicle_type.as_str().to_string()),
                        status: ActiveValue::Set(DriverStatus::Offline.as_str().to_string()),
                        is_verified: ActiveValue::Set(false),
                        current_location: ActiveValue::Set(normalize_optional_text(
                            current_location.as_deref(),
                        )),
                        rating: ActiveValue::Set(0.0),
                        created_at: ActiveValue::Set(now),
                    }
                    .insert(db_tx)
                    .await?;
                    Ok(model)
                })
            })
            .await?;
        tracing::info!(driver_id = model.id, user_id = model.user_id, "driver created");
        Driver::try_from(model)
    }

    /// Drivers that can take an order right now, in assignment order.
    pub async fn list_available_drivers(
        &self,
        vehicle_type: Option<VehicleType>,
    ) -> ResultEngine<Vec<Driver>> {
        let mut query = drivers::Entity::find()
            .filter(drivers::Column::Status.eq(DriverStatus::Online.as_str()))
            .filter(drivers::Column::IsVerified.eq(true));
        if let Some(vehicle_type) = vehicle_type {
            query = query.filter(drivers::Column::VehicleType.eq(vehicle_type.as_str()));
        }
        query
            .order_by_asc(drivers::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Driver::try_from)
            .collect()
    }

    pub async fn driver_profile(&self, user_id: i64) -> ResultEngine<Driver> {
        let model = self.driver_by_user(&self.database, user_id).await?;
        Driver::try_from(model)
    }

    pub async fn update_driver(&self, cmd: UpdateDriverCmd) -> ResultEngine<Driver> {
        let model = self.driver_by_user(&self.database, cmd.user_id).await?;
        let mut active: drivers::ActiveModel = model.into();
        if let Some(license_number) = cmd.license_number {
            active.license_number =
                ActiveValue::Set(normalize_required_text(&license_number, "license number")?);
        }
        if let Some(vehicle_plate) = cmd.vehicle_plate {
            active.vehicle_plate =
                ActiveValue::Set(normalize_required_text(&vehicle_plate, "vehicle plate")?);
        }
        if let Some(vehicle_type) = cmd.vehicle_type {
            active.vehicle_type = ActiveValue::Set(vehicle_type.as_str().to_string());
        }
        if let Some(location) = cmd.current_location {
            active.current_location = ActiveValue::Set(normalize_optional_text(Some(&location)));
        }
        let model = active.update(&self.database).await?;
        Driver::try_from(model)
    }

    /// Driver-initiated availability change. `sending` belongs to the order
    /// workflow and can be neither requested nor left manually.
    pub async fn set_driver_status(&self, cmd: SetDriverStatusCmd) -> ResultEngine<Driver> {
        if cmd.status == DriverStatus::Sending {
            return Err(EngineError::Validation(
                "driver status sending is set by order assignment".to_string(),
            ));
        }
        let model = self.driver_by_user(&self.database, cmd.user_id).await?;
        if DriverStatus::try_from(model.status.as_str())? == DriverStatus::Sending {
            return Err(EngineError::Validation(
                "driver is delivering an order".to_string(),
            ));
        }
        let mut active: drivers::ActiveModel = model.into();
        active.status = ActiveValue::Set(cmd.status.as_str().to_string());
        let model = active.update(&self.database).await?;
        tracing::info!(driver_id = model.id, status = %model.status, "driver status changed");
        Driver::try_from(model)
    }

    pub async fn update_driver_location(
        &self,
        user_id: i64,
        location: &str,
    ) -> ResultEngine<Driver> {
        let location = normalize_required_text(location, "location")?;
        let model = self.driver_by_user(&self.database, user_id).await?;
        let mut active: drivers::ActiveModel = model.into();
        active.current_location = ActiveValue::Set(Some(location));
        let model = active.update(&self.database).await?;
        Driver::try_from(model)
    }

    /// Admin operation: mark a driver as verified (or revoke it).
    pub async fn verify_driver(&self, driver_id: i64, verified: bool) -> ResultEngine<Driver> {
        let model = drivers::Entity::find_by_id(driver_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::DriverNotFound)?;
        let mut active: drivers::ActiveModel = model.into();
        active.is_verified = ActiveValue::Set(verified);
        let model = active.update(&self.database).await?;
        tracing::info!(driver_id, verified, "driver verification changed");
        Driver::try_from(model)
    }
}

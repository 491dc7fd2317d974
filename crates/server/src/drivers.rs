use api_types::driver::{
    AvailableQuery, DriverLocationUpdate, DriverSignUp, DriverStatusUpdate, DriverUpdate,
    DriverView,
};
use axum::{
    Extension,
    extract::{Query, State},
};
use engine::{
    DriverStatus, NewDriverCmd, NewUserCmd, SetDriverStatusCmd, UpdateDriverCmd, User,
    VehicleType,
};

use crate::{ApiResult, Body, created, ok, server::ServerState, views};

pub async fn sign_up(
    State(state): State<ServerState>,
    Body(payload): Body<DriverSignUp>,
) -> ApiResult<DriverView> {
    let vehicle_type = VehicleType::try_from(payload.vehicle_type.as_str())?;
    let mut user = NewUserCmd::new(payload.name, payload.email, payload.password);
    user.phone = payload.phone;
    let mut cmd = NewDriverCmd::new(
        user,
        payload.license_number,
        payload.vehicle_plate,
        vehicle_type,
    );
    cmd.current_location = payload.current_location;

    let driver = state.engine.create_driver(cmd).await?;
    created("Driver registered", views::driver(driver))
}

pub async fn available(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<AvailableQuery>,
) -> ApiResult<Vec<DriverView>> {
    let vehicle_type = query
        .vehicle_type
        .as_deref()
        .map(VehicleType::try_from)
        .transpose()?;
    let drivers = state.engine.list_available_drivers(vehicle_type).await?;
    ok(
        "Available drivers",
        drivers.into_iter().map(views::driver).collect(),
    )
}

pub async fn profile(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> ApiResult<DriverView> {
    let driver = state.engine.driver_profile(user.id).await?;
    ok("Driver profile", views::driver(driver))
}

pub async fn update_profile(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<DriverUpdate>,
) -> ApiResult<DriverView> {
    let vehicle_type = payload
        .vehicle_type
        .as_deref()
        .map(VehicleType::try_from)
        .transpose()?;
    let cmd = UpdateDriverCmd {
        user_id: user.id,
        license_number: payload.license_number,
        vehicle_plate: payload.vehicle_plate,
        vehicle_type,
        current_location: payload.current_location,
    };
    let driver = state.engine.update_driver(cmd).await?;
    ok("Driver profile updated", views::driver(driver))
}

pub async fn update_status(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<DriverStatusUpdate>,
) -> ApiResult<DriverView> {
    let status = DriverStatus::try_from(payload.status.as_str())?;
    let driver = state
        .engine
        .set_driver_status(SetDriverStatusCmd::new(user.id, status))
        .await?;
    ok("Driver status updated", views::driver(driver))
}

pub async fn update_location(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<DriverLocationUpdate>,
) -> ApiResult<DriverView> {
    let driver = state
        .engine
        .update_driver_location(user.id, &payload.current_location)
        .await?;
    ok("Driver location updated", views::driver(driver))
}

//! Signup and the caller's own profile.

use api_types::user::{SignUp, UserUpdate, UserView};
use axum::{Extension, extract::State};
use engine::{NewUserCmd, UpdateUserCmd, User};

use crate::{ApiResult, Body, created, ok, server::ServerState, views};

pub async fn sign_up(
    State(state): State<ServerState>,
    Body(payload): Body<SignUp>,
) -> ApiResult<UserView> {
    let mut cmd = NewUserCmd::new(payload.name, payload.email, payload.password);
    cmd.phone = payload.phone;
    cmd.profile_picture_url = payload.profile_picture_url;

    let user = state.engine.create_user(cmd).await?;
    created("User registered", views::user(user))
}

pub async fn me(Extension(user): Extension<User>) -> ApiResult<UserView> {
    ok("User profile", views::user(user))
}

pub async fn update_me(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<UserUpdate>,
) -> ApiResult<UserView> {
    let cmd = UpdateUserCmd {
        user_id: user.id,
        name: payload.name,
        phone: payload.phone,
        profile_picture_url: payload.profile_picture_url,
        password: payload.password,
    };
    let user = state.engine.update_user(cmd).await?;
    ok("User updated", views::user(user))
}

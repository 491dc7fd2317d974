//! QR payment requests: create, inspect, scan.

use api_types::{
    qr::{QrNew, QrScan, QrView},
    transaction::TransactionView,
};
use axum::{Extension, extract::State};
use chrono::Utc;
use engine::{CreateQrCmd, MoneyCents, ScanQrCmd, User};

use crate::{ApiResult, Body, PathParam, created, ok, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<QrNew>,
) -> ApiResult<QrView> {
    let amount = MoneyCents::from_major(payload.amount)?;
    let cmd = CreateQrCmd::new(
        user.id,
        payload.receiver_account_id,
        amount,
        payload.url,
        Utc::now(),
    );
    let qr = state.engine.create_qr(cmd).await?;
    created("QR code created", views::qr(qr))
}

pub async fn get(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<QrView> {
    let qr = state.engine.get_qr(id).await?;
    ok("QR code", views::qr(qr))
}

/// Pay a QR code from one of the caller's accounts.
pub async fn scan(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<QrScan>,
) -> ApiResult<TransactionView> {
    let cmd = ScanQrCmd::new(user.id, id, payload.sender_account_id, Utc::now());
    let tx = state.engine.scan_qr(cmd).await?;
    ok("QR code paid", views::transaction(tx))
}

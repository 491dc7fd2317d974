//! Transactions API endpoints

use api_types::transaction::{TransactionNew, TransactionUpdate, TransactionView};
use axum::{Extension, extract::State};
use engine::{
    MoneyCents, TransactionCategory, TransactionStatus, TransactionType, TransferCmd, TxMeta,
    UpdateTransactionCmd, User,
};

use crate::{ApiResult, Body, PathParam, created, ok, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<TransactionNew>,
) -> ApiResult<TransactionView> {
    let amount = MoneyCents::from_major(payload.amount)?;

    let mut meta = TxMeta::new();
    if let Some(category) = payload.category.as_deref() {
        meta = meta.category(TransactionCategory::try_from(category)?);
    }
    if let Some(kind) = payload.kind.as_deref() {
        meta = meta.kind(TransactionType::try_from(kind)?);
    }
    if let Some(status) = payload.status.as_deref() {
        meta = meta.status(TransactionStatus::try_from(status)?);
    }
    if let Some(description) = payload.description {
        meta = meta.description(description);
    }

    let cmd = TransferCmd::new(
        user.id,
        payload.sender_account_id,
        payload.receiver_account_id,
        amount,
    )
    .meta(meta);
    let tx = state.engine.create_transaction(cmd).await?;
    created("Transaction created", views::transaction(tx))
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<TransactionView> {
    let tx = state.engine.get_transaction(id, user.id).await?;
    ok("Transaction", views::transaction(tx))
}

/// Transactions where the account is sender or receiver, newest first.
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(account_id): PathParam<i64>,
) -> ApiResult<Vec<TransactionView>> {
    let txs = state
        .engine
        .list_account_transactions(account_id, user.id)
        .await?;
    ok(
        "Transactions",
        txs.into_iter().map(views::transaction).collect(),
    )
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<TransactionUpdate>,
) -> ApiResult<TransactionView> {
    let mut cmd = UpdateTransactionCmd::new(id, user.id);
    if let Some(status) = payload.status.as_deref() {
        cmd = cmd.status(TransactionStatus::try_from(status)?);
    }
    if let Some(category) = payload.category.as_deref() {
        cmd = cmd.category(TransactionCategory::try_from(category)?);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let tx = state.engine.update_transaction(cmd).await?;
    ok("Transaction updated", views::transaction(tx))
}

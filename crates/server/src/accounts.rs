use api_types::account::{AccountRename, AccountView, BalanceView};
use axum::{Extension, extract::State};
use engine::User;

use crate::{ApiResult, Body, PathParam, ok, server::ServerState, views};

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> ApiResult<Vec<AccountView>> {
    let accounts = state.engine.list_accounts(user.id).await?;
    ok(
        "Accounts",
        accounts.into_iter().map(views::account).collect(),
    )
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<AccountView> {
    let account = state.engine.get_account(id, user.id).await?;
    ok("Account", views::account(account))
}

pub async fn balance(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<BalanceView> {
    let balance = state.engine.account_balance(id, user.id).await?;
    ok(
        "Account balance",
        BalanceView {
            account_id: id,
            balance: balance.to_major(),
        },
    )
}

pub async fn rename(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<AccountRename>,
) -> ApiResult<AccountView> {
    let account = state
        .engine
        .rename_account(id, user.id, &payload.name)
        .await?;
    ok("Account updated", views::account(account))
}

use api_types::order::{OrderDetailView, OrderNew, OrderStatusUpdate, OrderView};
use axum::{Extension, extract::State};
use engine::{CreateOrderCmd, OrderItemInput, OrderStatus, UpdateOrderStatusCmd, User};

use crate::{ApiResult, Body, PathParam, created, ok, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Body(payload): Body<OrderNew>,
) -> ApiResult<OrderDetailView> {
    let items = payload.items.into_iter().map(|item| OrderItemInput {
        menu_item_id: item.menu_item_id,
        quantity: item.quantity,
        notes: item.notes,
    });
    let cmd =
        CreateOrderCmd::new(user.id, payload.merchant_id, payload.delivery_address).items(items);

    let detail = state.engine.create_order(cmd).await?;
    created("Order created", views::order_detail(detail))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> ApiResult<Vec<OrderView>> {
    let orders = state.engine.list_orders(user.id).await?;
    ok("Orders", orders.into_iter().map(views::order).collect())
}

pub async fn get(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<OrderDetailView> {
    let detail = state.engine.get_order(id, user.id).await?;
    ok("Order", views::order_detail(detail))
}

/// Advance an order. The caller's role (merchant, driver, customer) is
/// resolved by the engine from the order itself.
pub async fn update_status(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<OrderStatusUpdate>,
) -> ApiResult<OrderView> {
    let status = OrderStatus::try_from(payload.status.as_str())?;
    let order = state
        .engine
        .update_order_status(UpdateOrderStatusCmd::new(id, user.id, status))
        .await?;
    ok("Order status updated", views::order(order))
}

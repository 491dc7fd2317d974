//! Food orders.
//!
//! Creating an order reserves a driver, persists the order with its items and
//! pays the merchant, all inside one database transaction: if any step fails
//! nothing of the order survives. Status changes are gated by
//! [`OrderActor`] tables and completing an order settles its payment.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect,
    prelude::*, sea_query::Expr,
};

use crate::{
    AccountSide, CreateOrderCmd, DriverStatus, EngineError, Merchant, MoneyCents, Order,
    OrderActor, OrderDetail, OrderItem, OrderItemInput, OrderStatus, ResultEngine, ServiceType,
    TransactionCategory, TransactionStatus, TransactionType, TxMeta, UpdateOrderStatusCmd, User,
    drivers, menu_items, order_items, orders, transactions,
    util::{normalize_optional_text, normalize_required_text},
    validate_transition,
};

use super::{Engine, ORDER_LIST_LIMIT};

/// A validated order line, priced at order time.
struct PricedLine {
    menu_item_id: i64,
    quantity: i64,
    unit_price: MoneyCents,
    notes: Option<String>,
}

impl Engine {
    pub async fn create_order(&self, cmd: CreateOrderCmd) -> ResultEngine<OrderDetail> {
        let CreateOrderCmd {
            user_id,
            merchant_id,
            delivery_address,
            items,
        } = cmd;
        let delivery_address = normalize_required_text(&delivery_address, "delivery address")?;
        validate_order_lines(&items)?;

        let result = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    engine
                        .create_order_in_tx(db_tx, user_id, merchant_id, delivery_address, items)
                        .await
                })
            })
            .await;

        match result {
            Ok(detail) => {
                tracing::info!(
                    order_id = detail.order.id,
                    user_id,
                    merchant_id,
                    total = %detail.order.total_amount,
                    "order created"
                );
                Ok(detail)
            }
            Err(err) => {
                tracing::warn!(user_id, merchant_id, error = %err, "order rejected");
                Err(err)
            }
        }
    }

    async fn create_order_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: i64,
        merchant_id: i64,
        delivery_address: String,
        items: Vec<OrderItemInput>,
    ) -> ResultEngine<OrderDetail> {
        let now = Utc::now();
        self.require_user(db_tx, user_id).await?;
        let merchant = self.require_merchant(db_tx, merchant_id).await?;

        let lines = self.price_lines(db_tx, merchant_id, items).await?;
        let subtotal = lines.iter().try_fold(MoneyCents::ZERO, |acc, line| {
            line.unit_price
                .checked_mul(line.quantity)
                .and_then(|line_total| acc.checked_add(line_total))
        });
        let total = subtotal
            .and_then(|subtotal| subtotal.checked_add(self.delivery_fee))
            .ok_or_else(|| EngineError::InvalidAmount("order total too large".to_string()))?;

        let buyer_account = self
            .main_account_of(db_tx, user_id, AccountSide::Buyer)
            .await?;
        let merchant_account = self
            .main_account_of(db_tx, merchant.user_id, AccountSide::Merchant)
            .await?;
        if buyer_account.balance < total.cents() {
            return Err(EngineError::InsufficientBalance);
        }

        let driver_id = self.reserve_driver(db_tx).await?;

        let order = orders::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            merchant_id: ActiveValue::Set(merchant_id),
            driver_id: ActiveValue::Set(Some(driver_id)),
            total_amount: ActiveValue::Set(total.cents()),
            delivery_fee: ActiveValue::Set(self.delivery_fee.cents()),
            status: ActiveValue::Set(OrderStatus::Pending.as_str().to_string()),
            delivery_address: ActiveValue::Set(delivery_address),
            transaction_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(db_tx)
        .await?;

        for line in &lines {
            order_items::ActiveModel {
                id: ActiveValue::NotSet,
                order_id: ActiveValue::Set(order.id),
                menu_item_id: ActiveValue::Set(line.menu_item_id),
                quantity: ActiveValue::Set(line.quantity),
                unit_price: ActiveValue::Set(line.unit_price.cents()),
                notes: ActiveValue::Set(line.notes.clone()),
            }
            .insert(db_tx)
            .await?;
            menu_items::Entity::update_many()
                .col_expr(
                    menu_items::Column::TotalSold,
                    Expr::col(menu_items::Column::TotalSold).add(line.quantity),
                )
                .filter(menu_items::Column::Id.eq(line.menu_item_id))
                .exec(db_tx)
                .await?;
        }

        let meta = TxMeta::new()
            .category(TransactionCategory::Food)
            .kind(TransactionType::Payment)
            .status(TransactionStatus::Pending)
            .service(ServiceType::Food, order.id);
        let payment = self
            .transfer_in_tx(db_tx, buyer_account.id, merchant_account.id, total, meta, now)
            .await?;

        let mut active: orders::ActiveModel = order.into();
        active.transaction_id = ActiveValue::Set(Some(payment.id));
        let order = active.update(db_tx).await?;

        self.load_order_detail(db_tx, order).await
    }

    /// Check every requested menu item and snapshot its price.
    async fn price_lines(
        &self,
        db_tx: &DatabaseTransaction,
        merchant_id: i64,
        items: Vec<OrderItemInput>,
    ) -> ResultEngine<Vec<PricedLine>> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let menu_item = menu_items::Entity::find_by_id(item.menu_item_id)
                .one(db_tx)
                .await?
                .ok_or(EngineError::MenuItemNotFound)?;
            if menu_item.merchant_id != merchant_id {
                return Err(EngineError::Validation(format!(
                    "menu item {} does not belong to merchant {merchant_id}",
                    menu_item.id
                )));
            }
            if !menu_item.is_available {
                return Err(EngineError::MenuItemUnavailable(menu_item.name));
            }
            lines.push(PricedLine {
                menu_item_id: menu_item.id,
                quantity: item.quantity,
                unit_price: MoneyCents::new(menu_item.price),
                notes: normalize_optional_text(item.notes.as_deref()),
            });
        }
        Ok(lines)
    }

    /// Claim the first online, verified driver by flipping it to `sending`.
    async fn reserve_driver(&self, db_tx: &DatabaseTransaction) -> ResultEngine<i64> {
        let candidates = drivers::Entity::find()
            .filter(drivers::Column::Status.eq(DriverStatus::Online.as_str()))
            .filter(drivers::Column::IsVerified.eq(true))
            .order_by_asc(drivers::Column::Id)
            .all(db_tx)
            .await?;
        for candidate in candidates {
            let claimed = drivers::Entity::update_many()
                .col_expr(
                    drivers::Column::Status,
                    Expr::value(DriverStatus::Sending.as_str()),
                )
                .filter(drivers::Column::Id.eq(candidate.id))
                .filter(drivers::Column::Status.eq(DriverStatus::Online.as_str()))
                .exec(db_tx)
                .await?;
            if claimed.rows_affected == 1 {
                return Ok(candidate.id);
            }
        }
        Err(EngineError::DriverUnavailable)
    }

    /// Move an order along the lifecycle on behalf of `user_id`.
    pub async fn update_order_status(&self, cmd: UpdateOrderStatusCmd) -> ResultEngine<Order> {
        let UpdateOrderStatusCmd {
            order_id,
            user_id,
            status,
        } = cmd;
        let result = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let model = orders::Entity::find_by_id(order_id)
                        .one(db_tx)
                        .await?
                        .ok_or(EngineError::OrderNotFound)?;
                    let order = Order::try_from(model.clone())?;
                    let actor = engine
                        .resolve_actor(db_tx, &order, user_id)
                        .await?
                        .ok_or_else(|| {
                            EngineError::Forbidden("user is not a party to this order".to_string())
                        })?;
                    validate_transition(actor, order.status, status)?;

                    let now = Utc::now();
                    let mut active: orders::ActiveModel = model.into();
                    active.status = ActiveValue::Set(status.as_str().to_string());
                    active.updated_at = ActiveValue::Set(now);
                    let updated = active.update(db_tx).await?;

                    if status == OrderStatus::Completed {
                        engine.settle_order_payment(db_tx, order.id, now).await?;
                    }
                    if status.is_terminal()
                        && let Some(driver_id) = order.driver_id
                    {
                        engine.release_driver(db_tx, driver_id).await?;
                    }
                    Ok((updated, actor))
                })
            })
            .await;

        match result {
            Ok((model, actor)) => {
                tracing::info!(
                    order_id,
                    actor = actor.as_str(),
                    status = status.as_str(),
                    "order status changed"
                );
                Order::try_from(model)
            }
            Err(err) => {
                tracing::warn!(order_id, user_id, error = %err, "order status change rejected");
                Err(err)
            }
        }
    }

    /// The role `user_id` plays on `order`, checked merchant first, then
    /// driver, then customer.
    async fn resolve_actor<C: ConnectionTrait>(
        &self,
        db: &C,
        order: &Order,
        user_id: i64,
    ) -> ResultEngine<Option<OrderActor>> {
        let merchant = self.require_merchant(db, order.merchant_id).await?;
        if merchant.user_id == user_id {
            return Ok(Some(OrderActor::Merchant));
        }
        if let Some(driver_id) = order.driver_id {
            let driver = drivers::Entity::find_by_id(driver_id).one(db).await?;
            if driver.is_some_and(|driver| driver.user_id == user_id) {
                return Ok(Some(OrderActor::Driver));
            }
        }
        if order.user_id == user_id {
            return Ok(Some(OrderActor::Customer));
        }
        Ok(None)
    }

    /// Mark the food payment of a delivered order as completed.
    async fn settle_order_payment(
        &self,
        db_tx: &DatabaseTransaction,
        order_id: i64,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        let payment = transactions::Entity::find()
            .filter(transactions::Column::ServiceType.eq(ServiceType::Food.as_str()))
            .filter(transactions::Column::ServiceId.eq(order_id))
            .one(db_tx)
            .await?
            .ok_or(EngineError::TransactionNotFound)?;
        let mut active: transactions::ActiveModel = payment.into();
        active.status = ActiveValue::Set(TransactionStatus::Completed.as_str().to_string());
        active.updated_at = ActiveValue::Set(now);
        active.update(db_tx).await?;
        Ok(())
    }

    /// Return a reserved driver to `online`. No-op if the driver already
    /// changed state.
    async fn release_driver(&self, db_tx: &DatabaseTransaction, driver_id: i64) -> ResultEngine<()> {
        drivers::Entity::update_many()
            .col_expr(
                drivers::Column::Status,
                Expr::value(DriverStatus::Online.as_str()),
            )
            .filter(drivers::Column::Id.eq(driver_id))
            .filter(drivers::Column::Status.eq(DriverStatus::Sending.as_str()))
            .exec(db_tx)
            .await?;
        Ok(())
    }

    /// An order is visible to its buyer, the merchant owner and the assigned
    /// driver.
    pub async fn get_order(&self, order_id: i64, user_id: i64) -> ResultEngine<OrderDetail> {
        let model = orders::Entity::find_by_id(order_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::OrderNotFound)?;
        let order = Order::try_from(model.clone())?;
        if self
            .resolve_actor(&self.database, &order, user_id)
            .await?
            .is_none()
        {
            return Err(EngineError::Forbidden(
                "user is not a party to this order".to_string(),
            ));
        }
        self.load_order_detail(&self.database, model).await
    }

    /// The buyer's most recent orders, newest first.
    pub async fn list_orders(&self, user_id: i64) -> ResultEngine<Vec<Order>> {
        orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .limit(ORDER_LIST_LIMIT)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }

    async fn load_order_detail<C: ConnectionTrait>(
        &self,
        db: &C,
        model: orders::Model,
    ) -> ResultEngine<OrderDetail> {
        let buyer = self.require_user(db, model.user_id).await?;
        let merchant = self.require_merchant(db, model.merchant_id).await?;
        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(model.id))
            .order_by_asc(order_items::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(OrderDetail {
            order: Order::try_from(model)?,
            buyer: User::try_from(buyer)?,
            merchant: Merchant::try_from(merchant)?,
            items,
        })
    }
}

fn validate_order_lines(items: &[OrderItemInput]) -> ResultEngine<()> {
    if items.is_empty() {
        return Err(EngineError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }
    if let Some(item) = items.iter().find(|item| item.quantity < 1) {
        return Err(EngineError::Validation(format!(
            "quantity for menu item {} must be >= 1",
            item.menu_item_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_lines_need_items_and_positive_quantities() {
        assert!(validate_order_lines(&[]).is_err());
        assert!(validate_order_lines(&[OrderItemInput::new(1, 0)]).is_err());
        assert!(
            validate_order_lines(&[OrderItemInput::new(1, 2), OrderItemInput::new(2, 1)]).is_ok()
        );
    }
}

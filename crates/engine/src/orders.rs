//! Food orders.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Merchant, MoneyCents, OrderItem, User, transactions::string_enum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cooking,
    Ready,
    Delivery,
    Completed,
    Cancelled,
}

string_enum!(OrderStatus, "order status", {
    Pending => "pending",
    Confirmed => "confirmed",
    Cooking => "cooking",
    Ready => "ready",
    Delivery => "delivery",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub merchant_id: i64,
    pub driver_id: Option<i64>,
    pub total_amount: MoneyCents,
    pub delivery_fee: MoneyCents,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub transaction_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order with its buyer, merchant and items loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderDetail {
    pub order: Order,
    pub buyer: User,
    pub merchant: Merchant,
    pub items: Vec<OrderItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub merchant_id: i64,
    pub driver_id: Option<i64>,
    pub total_amount: i64,
    pub delivery_fee: i64,
    pub status: String,
    pub delivery_address: String,
    pub transaction_id: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
    #[sea_orm(
        belongs_to = "super::merchants::Entity",
        from = "Column::MerchantId",
        to = "super::merchants::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Merchants,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Order {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            merchant_id: model.merchant_id,
            driver_id: model.driver_id,
            total_amount: MoneyCents::new(model.total_amount),
            delivery_fee: MoneyCents::new(model.delivery_fee),
            status: OrderStatus::try_from(model.status.as_str())?,
            delivery_address: model.delivery_address,
            transaction_id: model.transaction_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

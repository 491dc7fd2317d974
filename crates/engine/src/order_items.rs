use sea_orm::entity::prelude::*;

use crate::{EngineError, MoneyCents};

/// A line of an order. `unit_price` is the menu price at order time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: MoneyCents,
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> MoneyCents {
        MoneyCents::new(self.unit_price.cents() * self.quantity)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for OrderItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            order_id: model.order_id,
            menu_item_id: model.menu_item_id,
            quantity: model.quantity,
            unit_price: MoneyCents::new(model.unit_price),
            notes: model.notes,
        })
    }
}

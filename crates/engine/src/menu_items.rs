use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, transactions::string_enum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    MainCourse,
    Appetizer,
    Dessert,
    Beverage,
    Snack,
    Drink,
}

string_enum!(MenuCategory, "menu category", {
    MainCourse => "main_course",
    Appetizer => "appetizer",
    Dessert => "dessert",
    Beverage => "beverage",
    Snack => "snack",
    Drink => "drink",
});

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: MoneyCents,
    pub category: MenuCategory,
    pub is_available: bool,
    pub total_sold: i64,
    pub image_url: Option<String>,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub is_available: bool,
    pub total_sold: i64,
    pub image_url: Option<String>,
    pub rating: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::merchants::Entity",
        from = "Column::MerchantId",
        to = "super::merchants::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Merchants,
}

impl Related<super::merchants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for MenuItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            merchant_id: model.merchant_id,
            name: model.name,
            description: model.description,
            price: MoneyCents::new(model.price),
            category: MenuCategory::try_from(model.category.as_str())?,
            is_available: model.is_available,
            total_sold: model.total_sold,
            image_url: model.image_url,
            rating: model.rating,
            created_at: model.created_at,
        })
    }
}

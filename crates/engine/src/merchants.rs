//! Merchant profiles.
//!
//! A merchant profile belongs to exactly one user. Food order payments are
//! credited to that user's `main_balance` account.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{EngineError, MenuItem};

#[derive(Clone, Debug, PartialEq)]
pub struct Merchant {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub phone: String,
    pub category: String,
    pub open_hour: String,
    pub close_hour: String,
    pub rating: f64,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Merchant {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Merchant detail with its best-selling menu items.
#[derive(Clone, Debug, PartialEq)]
pub struct MerchantDetail {
    pub merchant: Merchant,
    pub top_items: Vec<MenuItem>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchant_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub merchant_name: String,
    pub description: Option<String>,
    pub location: String,
    pub phone: String,
    pub category: String,
    pub open_hour: String,
    pub close_hour: String,
    pub rating: f64,
    pub logo_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
    #[sea_orm(has_many = "super::menu_items::Entity")]
    MenuItems,
}

impl Related<super::menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Merchant {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            name: model.merchant_name,
            description: model.description,
            location: model.location,
            phone: model.phone,
            category: model.category,
            open_hour: model.open_hour,
            close_hour: model.close_hour,
            rating: model.rating,
            logo_url: model.logo_url,
            created_at: model.created_at,
        })
    }
}

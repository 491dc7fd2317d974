//! The module contains `Account` struct and its implementation.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    MainBalance,
    /// Provisioned for every user; no flow credits or debits it.
    Points,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainBalance => "main_balance",
            Self::Points => "points",
        }
    }
}

impl TryFrom<&str> for AccountType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "main_balance" => Ok(Self::MainBalance),
            "points" => Ok(Self::Points),
            other => Err(EngineError::Validation(format!(
                "invalid account type: {other}"
            ))),
        }
    }
}

/// An account.
///
/// An account is a balance-holding wallet owned by a user. Its balance only
/// moves through a transfer, which always leaves a
/// [`Transaction`](crate::Transaction) behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: MoneyCents,
    pub user_id: i64,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub balance: i64,
    pub user_id: i64,
    pub account_type: String,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            balance: MoneyCents::new(model.balance),
            user_id: model.user_id,
            account_type: AccountType::try_from(model.account_type.as_str())?,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_round_trips_through_storage_names() {
        for kind in [AccountType::MainBalance, AccountType::Points] {
            assert_eq!(AccountType::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(AccountType::try_from("gopay_points").is_err());
    }
}

//! Transaction records.
//!
//! A `Transaction` is the sole record of a balance movement between two
//! accounts. It is immutable except for `status`, `category` and
//! `description`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

/// Generates `as_str`/`TryFrom<&str>` for a string-backed enum column.
macro_rules! string_enum {
    ($name:ident, $label:literal, { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = EngineError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(EngineError::Validation(format!(
                        concat!("invalid ", $label, ": {}"),
                        other
                    ))),
                }
            }
        }
    };
}

pub(crate) use string_enum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Food,
    Transport,
    Bills,
    Entertainment,
    Transfer,
    #[default]
    Other,
}

string_enum!(TransactionCategory, "transaction category", {
    Food => "food",
    Transport => "transport",
    Bills => "bills",
    Entertainment => "entertainment",
    Transfer => "transfer",
    Other => "other",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Payment,
    #[default]
    Transfer,
    Topup,
    Cashback,
}

string_enum!(TransactionType, "transaction type", {
    Payment => "payment",
    Transfer => "transfer",
    Topup => "topup",
    Cashback => "cashback",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Cancelled,
}

string_enum!(TransactionStatus, "transaction status", {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Cancelled => "cancelled",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Food,
    Ride,
    #[default]
    None,
}

string_enum!(ServiceType, "service type", {
    Food => "food",
    Ride => "ride",
    None => "none",
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: i64,
    pub amount: MoneyCents,
    pub sender_account_id: i64,
    pub receiver_account_id: i64,
    pub category: TransactionCategory,
    pub kind: TransactionType,
    pub status: TransactionStatus,
    pub qr_code_id: Option<i64>,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub service_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub amount: i64,
    pub sender_account_id: i64,
    pub receiver_account_id: i64,
    pub category: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub status: String,
    pub qr_code_id: Option<i64>,
    pub description: Option<String>,
    pub service_type: String,
    pub service_id: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::SenderAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    SenderAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ReceiverAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ReceiverAccount,
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            amount: MoneyCents::new(model.amount),
            sender_account_id: model.sender_account_id,
            receiver_account_id: model.receiver_account_id,
            category: TransactionCategory::try_from(model.category.as_str())?,
            kind: TransactionType::try_from(model.kind.as_str())?,
            status: TransactionStatus::try_from(model.status.as_str())?,
            qr_code_id: model.qr_code_id,
            description: model.description,
            service_type: ServiceType::try_from(model.service_type.as_str())?,
            service_id: model.service_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_parse_their_storage_names() {
        assert_eq!(
            TransactionStatus::try_from("completed").unwrap(),
            TransactionStatus::Completed
        );
        assert_eq!(TransactionType::try_from("topup").unwrap(), TransactionType::Topup);
        assert_eq!(ServiceType::try_from("none").unwrap(), ServiceType::None);
        assert_eq!(
            TransactionCategory::try_from("entertainment").unwrap(),
            TransactionCategory::Entertainment
        );
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = TransactionStatus::try_from("paid").unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("invalid transaction status: paid".to_string())
        );
    }
}

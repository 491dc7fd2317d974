//! One-shot payment requests.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;

use crate::{EngineError, MoneyCents};

/// Seconds a freshly created QR code stays payable.
pub const QR_TTL_SECS: i64 = 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    pub id: i64,
    pub receiver_account_id: i64,
    pub amount: MoneyCents,
    pub url: String,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}

impl QrCode {
    pub fn expires_at_for(created_at: DateTime<Utc>) -> DateTime<Utc> {
        created_at + Duration::seconds(QR_TTL_SECS)
    }

    /// A code is expired once `now` is strictly after `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub receiver_account_id: i64,
    pub amount: i64,
    pub url: String,
    pub expires_at: DateTimeUtc,
    pub is_used: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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

impl TryFrom<Model> for QrCode {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            receiver_account_id: model.receiver_account_id,
            amount: MoneyCents::new(model.amount),
            url: model.url,
            expires_at: model.expires_at,
            is_used: model.is_used,
            created_at: model.created_at,
        })
    }
}

//! Users table.
//!
//! Users are the identities every operation is performed on behalf of. The
//! HTTP layer authenticates a user and passes its `id` down to the engine.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    #[default]
    Consumer,
    Driver,
    Merchant,
}

impl UserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Consumer => "consumer",
            Self::Driver => "driver",
            Self::Merchant => "merchant",
        }
    }
}

impl TryFrom<&str> for UserKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "consumer" => Ok(Self::Consumer),
            "driver" => Ok(Self::Driver),
            "merchant" => Ok(Self::Merchant),
            other => Err(EngineError::Validation(format!("invalid user kind: {other}"))),
        }
    }
}

/// A registered user, without credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub kind: UserKind,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub kind: String,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            kind: UserKind::try_from(model.kind.as_str())?,
            profile_picture_url: model.profile_picture_url,
            created_at: model.created_at,
        })
    }
}

//! Lookup helpers shared by the operations.
//!
//! The `require_*` helpers turn a missing row into the matching domain error
//! and, where a user id is given, enforce ownership with `Forbidden`.

use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    AccountSide, AccountType, EngineError, ResultEngine, accounts, drivers, merchants, users,
};

use super::Engine;

impl Engine {
    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i64,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(EngineError::UserNotFound)
    }

    pub(super) async fn require_account<C: ConnectionTrait>(
        &self,
        db: &C,
        account_id: i64,
        side: AccountSide,
    ) -> ResultEngine<accounts::Model> {
        accounts::Entity::find_by_id(account_id)
            .one(db)
            .await?
            .ok_or(EngineError::AccountNotFound(side))
    }

    /// Like [`Self::require_account`] but the account must belong to `user_id`.
    pub(super) async fn require_owned_account<C: ConnectionTrait>(
        &self,
        db: &C,
        account_id: i64,
        user_id: i64,
        side: AccountSide,
    ) -> ResultEngine<accounts::Model> {
        let account = self.require_account(db, account_id, side).await?;
        if account.user_id != user_id {
            return Err(EngineError::Forbidden(format!(
                "{side} account does not belong to the user"
            )));
        }
        Ok(account)
    }

    /// The user's `main_balance` account.
    pub(super) async fn main_account_of<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i64,
        side: AccountSide,
    ) -> ResultEngine<accounts::Model> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .filter(accounts::Column::AccountType.eq(AccountType::MainBalance.as_str()))
            .order_by_asc(accounts::Column::Id)
            .one(db)
            .await?
            .ok_or(EngineError::AccountNotFound(side))
    }

    pub(super) async fn require_merchant<C: ConnectionTrait>(
        &self,
        db: &C,
        merchant_id: i64,
    ) -> ResultEngine<merchants::Model> {
        merchants::Entity::find_by_id(merchant_id)
            .one(db)
            .await?
            .ok_or(EngineError::MerchantNotFound)
    }

    pub(super) async fn require_owned_merchant<C: ConnectionTrait>(
        &self,
        db: &C,
        merchant_id: i64,
        user_id: i64,
    ) -> ResultEngine<merchants::Model> {
        let merchant = self.require_merchant(db, merchant_id).await?;
        if merchant.user_id != user_id {
            return Err(EngineError::Forbidden(
                "merchant does not belong to the user".to_string(),
            ));
        }
        Ok(merchant)
    }

    pub(super) async fn driver_by_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i64,
    ) -> ResultEngine<drivers::Model> {
        drivers::Entity::find()
            .filter(drivers::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or(EngineError::DriverNotFound)
    }
}

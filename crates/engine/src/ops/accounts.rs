use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Account, AccountSide, MoneyCents, ResultEngine, accounts, util::normalize_required_text,
};

use super::Engine;

impl Engine {
    pub async fn list_accounts(&self, user_id: i64) -> ResultEngine<Vec<Account>> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    pub async fn get_account(&self, account_id: i64, user_id: i64) -> ResultEngine<Account> {
        let model = self
            .require_owned_account(&self.database, account_id, user_id, AccountSide::Target)
            .await?;
        Account::try_from(model)
    }

    pub async fn account_balance(&self, account_id: i64, user_id: i64) -> ResultEngine<MoneyCents> {
        Ok(self.get_account(account_id, user_id).await?.balance)
    }

    /// The user's main wallet.
    pub async fn main_account(&self, user_id: i64) -> ResultEngine<Account> {
        let model = self
            .main_account_of(&self.database, user_id, AccountSide::Target)
            .await?;
        Account::try_from(model)
    }

    pub async fn rename_account(
        &self,
        account_id: i64,
        user_id: i64,
        name: &str,
    ) -> ResultEngine<Account> {
        let name = normalize_required_text(name, "account name")?;
        let model = self
            .require_owned_account(&self.database, account_id, user_id, AccountSide::Target)
            .await?;
        let mut active: accounts::ActiveModel = model.into();
        active.name = ActiveValue::Set(name);
        let model = active.update(&self.database).await?;
        Account::try_from(model)
    }
}

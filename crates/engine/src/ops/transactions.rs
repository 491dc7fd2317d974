use chrono::Utc;
use sea_orm::{ActiveValue, Condition, QueryFilter, QueryOrder, prelude::*};

use crate::{
    AccountSide, EngineError, ResultEngine, Transaction, UpdateTransactionCmd, accounts,
    transactions, util::normalize_optional_text,
};

use super::Engine;

impl Engine {
    /// A transaction is visible to the owners of either side.
    pub async fn get_transaction(
        &self,
        transaction_id: i64,
        user_id: i64,
    ) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::TransactionNotFound)?;
        let owners = accounts::Entity::find()
            .filter(
                accounts::Column::Id.is_in([model.sender_account_id, model.receiver_account_id]),
            )
            .filter(accounts::Column::UserId.eq(user_id))
            .count(&self.database)
            .await?;
        if owners == 0 {
            return Err(EngineError::Forbidden(
                "transaction does not involve the user".to_string(),
            ));
        }
        Transaction::try_from(model)
    }

    /// Transactions where the account is sender or receiver, newest first.
    pub async fn list_account_transactions(
        &self,
        account_id: i64,
        user_id: i64,
    ) -> ResultEngine<Vec<Transaction>> {
        self.require_owned_account(&self.database, account_id, user_id, AccountSide::Target)
            .await?;
        transactions::Entity::find()
            .filter(
                Condition::any()
                    .add(transactions::Column::SenderAccountId.eq(account_id))
                    .add(transactions::Column::ReceiverAccountId.eq(account_id)),
            )
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Update the mutable columns of a transaction. Only the owner of the
    /// sender account may do so.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultEngine<Transaction> {
        let UpdateTransactionCmd {
            transaction_id,
            user_id,
            status,
            category,
            description,
        } = cmd;
        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let model = transactions::Entity::find_by_id(transaction_id)
                        .one(db_tx)
                        .await?
                        .ok_or(EngineError::TransactionNotFound)?;
                    engine
                        .require_owned_account(
                            db_tx,
                            model.sender_account_id,
                            user_id,
                            AccountSide::Sender,
                        )
                        .await?;

                    let mut active: transactions::ActiveModel = model.into();
                    if let Some(status) = status {
                        active.status = ActiveValue::Set(status.as_str().to_string());
                    }
                    if let Some(category) = category {
                        active.category = ActiveValue::Set(category.as_str().to_string());
                    }
                    if description.is_some() {
                        active.description =
                            ActiveValue::Set(normalize_optional_text(description.as_deref()));
                    }
                    active.updated_at = ActiveValue::Set(Utc::now());
                    Ok(active.update(db_tx).await?)
                })
            })
            .await?;
        Transaction::try_from(model)
    }
}

//! Balance movements.
//!
//! [`Engine::transfer_in_tx`] is the only code path that changes an account
//! balance after creation. The sender is debited with a guarded update so two
//! concurrent transfers on the same account cannot both pass the balance
//! check.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, prelude::*, sea_query::Expr};

use crate::{
    AccountSide, EngineError, MoneyCents, ResultEngine, Transaction, TransferCmd, TxMeta,
    accounts, transactions,
    util::{ensure_positive, normalize_optional_text},
};

use super::Engine;

impl Engine {
    /// Direct transfer requested by the owner of the sender account.
    pub async fn create_transaction(&self, cmd: TransferCmd) -> ResultEngine<Transaction> {
        let TransferCmd {
            user_id,
            sender_account_id,
            receiver_account_id,
            amount,
            meta,
        } = cmd;
        ensure_positive(amount, "amount")?;
        if sender_account_id == receiver_account_id {
            return Err(EngineError::SameAccount);
        }

        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    engine
                        .require_owned_account(
                            db_tx,
                            sender_account_id,
                            user_id,
                            AccountSide::Sender,
                        )
                        .await?;
                    engine
                        .transfer_in_tx(
                            db_tx,
                            sender_account_id,
                            receiver_account_id,
                            amount,
                            meta,
                            Utc::now(),
                        )
                        .await
                })
            })
            .await?;
        tracing::info!(
            transaction_id = model.id,
            sender = sender_account_id,
            receiver = receiver_account_id,
            amount = %amount,
            "transfer committed"
        );
        Transaction::try_from(model)
    }

    /// Debit `sender`, credit `receiver` and record the transaction, all on
    /// `db_tx`. The caller owns commit/rollback.
    pub(super) async fn transfer_in_tx(
        &self,
        db_tx: &DatabaseTransaction,
        sender_account_id: i64,
        receiver_account_id: i64,
        amount: MoneyCents,
        meta: TxMeta,
        now: DateTime<Utc>,
    ) -> ResultEngine<transactions::Model> {
        ensure_positive(amount, "amount")?;
        if sender_account_id == receiver_account_id {
            return Err(EngineError::SameAccount);
        }
        let sender = self
            .require_account(db_tx, sender_account_id, AccountSide::Sender)
            .await?;
        self.require_account(db_tx, receiver_account_id, AccountSide::Receiver)
            .await?;
        if sender.balance < amount.cents() {
            return Err(EngineError::InsufficientBalance);
        }

        let debited = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).sub(amount.cents()),
            )
            .filter(accounts::Column::Id.eq(sender_account_id))
            .filter(accounts::Column::Balance.gte(amount.cents()))
            .exec(db_tx)
            .await?;
        // A concurrent debit drained the account between the read and the write.
        if debited.rows_affected == 0 {
            return Err(EngineError::InsufficientBalance);
        }

        accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(amount.cents()),
            )
            .filter(accounts::Column::Id.eq(receiver_account_id))
            .exec(db_tx)
            .await?;

        let TxMeta {
            category,
            kind,
            status,
            description,
            qr_code_id,
            service_type,
            service_id,
        } = meta;
        let model = transactions::ActiveModel {
            id: ActiveValue::NotSet,
            amount: ActiveValue::Set(amount.cents()),
            sender_account_id: ActiveValue::Set(sender_account_id),
            receiver_account_id: ActiveValue::Set(receiver_account_id),
            category: ActiveValue::Set(category.as_str().to_string()),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            status: ActiveValue::Set(status.as_str().to_string()),
            qr_code_id: ActiveValue::Set(qr_code_id),
            description: ActiveValue::Set(normalize_optional_text(description.as_deref())),
            service_type: ActiveValue::Set(service_type.as_str().to_string()),
            service_id: ActiveValue::Set(service_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(db_tx)
        .await?;
        Ok(model)
    }
}

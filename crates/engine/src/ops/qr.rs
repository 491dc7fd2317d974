//! QR payments.
//!
//! A QR code is a single-use payment request. Scanning it runs a transfer
//! from the scanner's account to the code's receiver and flips `is_used` in
//! the same database transaction.

use sea_orm::{ActiveValue, QueryFilter, prelude::*, sea_query::Expr};

use crate::{
    AccountSide, CreateQrCmd, EngineError, QrCode, ResultEngine, ScanQrCmd, Transaction,
    TransactionCategory, TransactionStatus, TransactionType, TxMeta, qr_codes,
    util::{ensure_positive, normalize_required_text},
};

use super::Engine;

impl Engine {
    pub async fn create_qr(&self, cmd: CreateQrCmd) -> ResultEngine<QrCode> {
        let CreateQrCmd {
            user_id,
            receiver_account_id,
            amount,
            url,
            now,
        } = cmd;
        ensure_positive(amount, "amount")?;
        let url = normalize_required_text(&url, "url")?;

        self.require_owned_account(
            &self.database,
            receiver_account_id,
            user_id,
            AccountSide::Receiver,
        )
        .await?;
        let model = qr_codes::ActiveModel {
            id: ActiveValue::NotSet,
            receiver_account_id: ActiveValue::Set(receiver_account_id),
            amount: ActiveValue::Set(amount.cents()),
            url: ActiveValue::Set(url),
            expires_at: ActiveValue::Set(QrCode::expires_at_for(now)),
            is_used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
        }
        .insert(&self.database)
        .await?;
        tracing::info!(qr_id = model.id, receiver = receiver_account_id, "qr code created");
        QrCode::try_from(model)
    }

    pub async fn get_qr(&self, qr_id: i64) -> ResultEngine<QrCode> {
        let model = qr_codes::Entity::find_by_id(qr_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::QrNotFound)?;
        QrCode::try_from(model)
    }

    /// Pay a QR code from `sender_account_id`.
    pub async fn scan_qr(&self, cmd: ScanQrCmd) -> ResultEngine<Transaction> {
        let ScanQrCmd {
            user_id,
            qr_id,
            sender_account_id,
            now,
        } = cmd;
        let result = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let qr = qr_codes::Entity::find_by_id(qr_id)
                        .one(db_tx)
                        .await?
                        .ok_or(EngineError::QrNotFound)
                        .and_then(QrCode::try_from)?;
                    if qr.is_expired(now) {
                        return Err(EngineError::QrExpired);
                    }
                    if qr.is_used {
                        return Err(EngineError::QrAlreadyUsed);
                    }
                    engine
                        .require_owned_account(
                            db_tx,
                            sender_account_id,
                            user_id,
                            AccountSide::Sender,
                        )
                        .await?;

                    let meta = TxMeta::new()
                        .category(TransactionCategory::Other)
                        .kind(TransactionType::Payment)
                        .status(TransactionStatus::Completed)
                        .qr_code_id(qr.id);
                    let model = engine
                        .transfer_in_tx(
                            db_tx,
                            sender_account_id,
                            qr.receiver_account_id,
                            qr.amount,
                            meta,
                            now,
                        )
                        .await?;

                    let claimed = qr_codes::Entity::update_many()
                        .col_expr(qr_codes::Column::IsUsed, Expr::value(true))
                        .filter(qr_codes::Column::Id.eq(qr.id))
                        .filter(qr_codes::Column::IsUsed.eq(false))
                        .exec(db_tx)
                        .await?;
                    if claimed.rows_affected == 0 {
                        return Err(EngineError::QrAlreadyUsed);
                    }
                    Ok(model)
                })
            })
            .await;

        match result {
            Ok(model) => {
                tracing::info!(qr_id, transaction_id = model.id, "qr code paid");
                Transaction::try_from(model)
            }
            Err(err) => {
                tracing::warn!(qr_id, error = %err, "qr scan rejected");
                Err(err)
            }
        }
    }
}

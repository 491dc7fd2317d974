use std::{future::Future, pin::Pin};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{MoneyCents, ResultEngine};

mod access;
mod accounts;
mod drivers;
mod ledger;
mod menu_items;
mod merchants;
mod orders;
mod qr;
mod transactions;
mod users;

/// Flat fee added to every food order unless configured otherwise.
pub const DEFAULT_DELIVERY_FEE: MoneyCents = MoneyCents::new(678);

/// Number of orders returned by [`Engine::list_orders`].
pub(crate) const ORDER_LIST_LIMIT: u64 = 20;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    delivery_fee: MoneyCents,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn delivery_fee(&self) -> MoneyCents {
        self.delivery_fee
    }

    /// Run `f` inside a DB transaction, committing on success and rolling
    /// back on error.
    pub(crate) async fn with_tx<T, F>(&self, f: F) -> ResultEngine<T>
    where
        T: Send,
        F: for<'c> FnOnce(
                &'c Engine,
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = ResultEngine<T>> + Send + 'c>>
            + Send,
    {
        let db_tx = self.database.begin().await?;
        match f(self, &db_tx).await {
            Ok(value) => {
                db_tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = db_tx.rollback().await {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    delivery_fee: MoneyCents,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            delivery_fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the flat delivery fee charged on food orders.
    pub fn delivery_fee(mut self, fee: MoneyCents) -> EngineBuilder {
        self.delivery_fee = fee;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        if self.delivery_fee.is_negative() {
            return Err(crate::EngineError::InvalidAmount(
                "delivery fee must be >= 0".to_string(),
            ));
        }
        Ok(Engine {
            database: self.database,
            delivery_fee: self.delivery_fee,
        })
    }
}

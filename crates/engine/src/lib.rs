//! Wallet ledger, QR payments and food ordering engine.
//!
//! [`Engine`] owns the database connection and exposes every operation as an
//! `async fn`. Each write runs inside a single database transaction, so an
//! operation either commits all of its effects or none of them.

pub use accounts::{Account, AccountType};
pub use commands::{
    CreateOrderCmd, CreateQrCmd, NewDriverCmd, NewMenuItemCmd, NewMerchantCmd, NewUserCmd,
    OrderItemInput, ScanQrCmd, SetDriverStatusCmd, TransferCmd, TxMeta, UpdateDriverCmd,
    UpdateMenuItemCmd, UpdateMerchantCmd, UpdateOrderStatusCmd, UpdateTransactionCmd,
    UpdateUserCmd,
};
pub use drivers::{Driver, DriverStatus, VehicleType};
pub use error::{AccountSide, EngineError, ErrorKind};
pub use menu_items::{MenuCategory, MenuItem};
pub use merchants::{Merchant, MerchantDetail};
pub use money::MoneyCents;
pub use ops::{DEFAULT_DELIVERY_FEE, Engine, EngineBuilder};
pub use order_items::OrderItem;
pub use order_status::{OrderActor, validate_transition};
pub use orders::{Order, OrderDetail, OrderStatus};
pub use qr_codes::{QR_TTL_SECS, QrCode};
pub use transactions::{
    ServiceType, Transaction, TransactionCategory, TransactionStatus, TransactionType,
};
pub use users::{User, UserKind};

mod accounts;
mod commands;
mod drivers;
mod error;
mod menu_items;
mod merchants;
mod money;
mod ops;
mod order_items;
mod order_status;
mod orders;
mod qr_codes;
mod transactions;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;

//! The module contains the errors the engine can throw.
//!
//! Every variant carries a stable machine-readable [`code`] and belongs to an
//! [`ErrorKind`], which is what the HTTP layer maps to a status code.
//!
//! [`code`]: EngineError::code
use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// Which side of a transfer a missing account was on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountSide {
    Sender,
    Receiver,
    Buyer,
    Merchant,
    Target,
}

impl fmt::Display for AccountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sender => "sender",
            Self::Receiver => "receiver",
            Self::Buyer => "buyer",
            Self::Merchant => "merchant",
            Self::Target => "target",
        };
        f.write_str(label)
    }
}

/// Coarse error taxonomy shared with the HTTP surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("{0}")]
    Validation(String),
    #[error("Cannot transfer to the same account")]
    SameAccount,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("{0} account not found")]
    AccountNotFound(AccountSide),
    #[error("User not found")]
    UserNotFound,
    #[error("Transaction not found")]
    TransactionNotFound,
    #[error("QR code not found")]
    QrNotFound,
    #[error("QR code has expired")]
    QrExpired,
    #[error("QR code has already been used")]
    QrAlreadyUsed,
    #[error("Order not found")]
    OrderNotFound,
    #[error("Merchant not found")]
    MerchantNotFound,
    #[error("Menu item not found")]
    MenuItemNotFound,
    #[error("Menu item \"{0}\" is not available")]
    MenuItemUnavailable(String),
    #[error("Driver not found")]
    DriverNotFound,
    #[error("No available drivers")]
    DriverUnavailable,
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Stable code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::SameAccount => "SAME_ACCOUNT_TRANSFER",
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            Self::QrNotFound => "QR_NOT_FOUND",
            Self::QrExpired => "QR_EXPIRED",
            Self::QrAlreadyUsed => "QR_ALREADY_USED",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::MerchantNotFound => "MERCHANT_NOT_FOUND",
            Self::MenuItemNotFound => "MENU_NOT_FOUND",
            Self::MenuItemUnavailable(_) => "MENU_UNAVAILABLE",
            Self::DriverNotFound => "DRIVER_NOT_FOUND",
            Self::DriverUnavailable => "DRIVER_UNAVAILABLE",
            Self::InvalidTransition(_) => "INVALID_STATUS_TRANSITION",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::ExistingKey(_) => "ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound(_)
            | Self::UserNotFound
            | Self::TransactionNotFound
            | Self::QrNotFound
            | Self::OrderNotFound
            | Self::MerchantNotFound
            | Self::MenuItemNotFound
            | Self::DriverNotFound => ErrorKind::NotFound,
            Self::QrAlreadyUsed | Self::DriverUnavailable | Self::ExistingKey(_) => {
                ErrorKind::Conflict
            }
            Self::InvalidAmount(_)
            | Self::Validation(_)
            | Self::SameAccount
            | Self::InsufficientBalance
            | Self::QrExpired
            | Self::MenuItemUnavailable(_)
            | Self::InvalidTransition(_) => ErrorKind::Validation,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::AccountNotFound(a), Self::AccountNotFound(b)) => a == b,
            (Self::MenuItemUnavailable(a), Self::MenuItemUnavailable(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

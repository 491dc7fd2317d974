//! Request and response bodies of the HTTP API.
//!
//! Money travels as decimal numbers in major units (two decimals), and
//! timestamps as RFC 3339 strings. Enumerated fields (statuses, categories,
//! vehicle types) are plain snake_case strings; the server validates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Success envelope wrapping every 2xx body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Error envelope returned for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub success: bool,
    pub message: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine code, e.g. `INSUFFICIENT_BALANCE`.
    pub code: String,
    pub message: String,
    /// One of `not_found`, `conflict`, `validation`, `unauthorized`,
    /// `forbidden`, `internal`.
    #[serde(rename = "type")]
    pub kind: String,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignUp {
        pub name: String,
        pub email: String,
        pub password: String,
        pub phone: Option<String>,
        pub profile_picture_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: Option<String>,
        pub phone: Option<String>,
        pub profile_picture_url: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub phone: Option<String>,
        /// `consumer`, `driver` or `merchant`.
        pub kind: String,
        pub profile_picture_url: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: i64,
        pub name: String,
        pub balance: f64,
        pub user_id: i64,
        /// `main_balance` or `points`.
        pub account_type: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub account_id: i64,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountRename {
        pub name: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub sender_account_id: i64,
        pub receiver_account_id: i64,
        pub amount: f64,
        pub category: Option<String>,
        /// Transaction type (`payment`, `transfer`, `topup`, `cashback`).
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub status: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub status: Option<String>,
        pub category: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub amount: f64,
        pub sender_account_id: i64,
        pub receiver_account_id: i64,
        pub category: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub status: String,
        pub qr_code_id: Option<i64>,
        pub description: Option<String>,
        pub service_type: String,
        pub service_id: Option<i64>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod qr {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QrNew {
        pub receiver_account_id: i64,
        pub amount: f64,
        pub url: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QrScan {
        pub sender_account_id: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct QrView {
        pub id: i64,
        pub receiver_account_id: i64,
        pub amount: f64,
        pub url: String,
        pub expires_at: DateTime<Utc>,
        pub is_used: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod merchant {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MerchantSignUp {
        pub name: String,
        pub email: String,
        pub password: String,
        pub merchant_name: String,
        pub description: Option<String>,
        pub location: String,
        pub phone: String,
        pub category: Option<String>,
        /// `HH:MM`
        pub open_hour: String,
        /// `HH:MM`, later than `open_hour`.
        pub close_hour: String,
        pub logo_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MerchantUpdate {
        pub merchant_name: Option<String>,
        pub description: Option<String>,
        pub location: Option<String>,
        pub phone: Option<String>,
        pub category: Option<String>,
        pub open_hour: Option<String>,
        pub close_hour: Option<String>,
        pub logo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MerchantView {
        pub id: i64,
        pub user_id: i64,
        pub merchant_name: String,
        pub description: Option<String>,
        pub location: String,
        pub phone: String,
        pub category: String,
        pub open_hour: String,
        pub close_hour: String,
        pub rating: f64,
        pub logo_url: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MerchantDetailView {
        #[serde(flatten)]
        pub merchant: MerchantView,
        pub top_items: Vec<MenuItemView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MenuItemNew {
        pub name: String,
        pub description: Option<String>,
        pub price: f64,
        pub category: String,
        pub is_available: Option<bool>,
        pub image_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MenuItemUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
        pub price: Option<f64>,
        pub category: Option<String>,
        pub is_available: Option<bool>,
        pub image_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MenuItemView {
        pub id: i64,
        pub merchant_id: i64,
        pub name: String,
        pub description: Option<String>,
        pub price: f64,
        pub category: String,
        pub is_available: bool,
        pub total_sold: i64,
        pub image_url: Option<String>,
        pub rating: f64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod driver {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DriverSignUp {
        pub name: String,
        pub email: String,
        pub password: String,
        pub phone: Option<String>,
        pub license_number: String,
        pub vehicle_plate: String,
        /// `car` or `motorcycle`.
        pub vehicle_type: String,
        pub current_location: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DriverUpdate {
        pub license_number: Option<String>,
        pub vehicle_plate: Option<String>,
        pub vehicle_type: Option<String>,
        pub current_location: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DriverStatusUpdate {
        /// `online`, `offline` or `suspended`.
        pub status: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DriverLocationUpdate {
        pub current_location: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AvailableQuery {
        pub vehicle_type: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DriverView {
        pub id: i64,
        pub user_id: i64,
        pub license_number: String,
        pub vehicle_plate: String,
        pub vehicle_type: String,
        pub status: String,
        pub is_verified: bool,
        pub current_location: Option<String>,
        pub rating: f64,
        pub created_at: DateTime<Utc>,
    }
}

pub mod order {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderItemNew {
        pub menu_item_id: i64,
        pub quantity: i64,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderNew {
        pub merchant_id: i64,
        pub delivery_address: String,
        pub items: Vec<OrderItemNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderStatusUpdate {
        /// `confirmed`, `cooking`, `ready`, `delivery`, `completed` or
        /// `cancelled`.
        pub status: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderView {
        pub id: i64,
        pub user_id: i64,
        pub merchant_id: i64,
        pub driver_id: Option<i64>,
        pub total_amount: f64,
        pub delivery_fee: f64,
        pub status: String,
        pub delivery_address: String,
        pub transaction_id: Option<i64>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderItemView {
        pub id: i64,
        pub menu_item_id: i64,
        pub quantity: i64,
        pub unit_price: f64,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct OrderDetailView {
        #[serde(flatten)]
        pub order: OrderView,
        pub buyer: super::user::UserView,
        pub merchant: super::merchant::MerchantView,
        pub items: Vec<OrderItemView>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_uses_type_key() {
        let body = ApiError {
            success: false,
            message: "Insufficient balance".to_string(),
            error: ErrorBody {
                code: "INSUFFICIENT_BALANCE".to_string(),
                message: "Insufficient balance".to_string(),
                kind: "validation".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["type"], "validation");
        assert_eq!(json["error"]["code"], "INSUFFICIENT_BALANCE");
    }

    #[test]
    fn transaction_kind_is_serialized_as_type() {
        let body: transaction::TransactionNew = serde_json::from_str(
            r#"{"sender_account_id":1,"receiver_account_id":2,"amount":12.5,"type":"payment"}"#,
        )
        .unwrap();
        assert_eq!(body.kind.as_deref(), Some("payment"));
        assert_eq!(body.category, None);
    }
}

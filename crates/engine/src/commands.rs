//! Command structs for engine operations.
//!
//! These types group parameters for write operations (transfers, QR codes,
//! orders, profile changes), keeping call sites readable and avoiding long
//! argument lists. Every command carries the acting `user_id` explicitly.

use chrono::{DateTime, Utc};

use crate::{
    DriverStatus, MenuCategory, MoneyCents, OrderStatus, ServiceType, TransactionCategory,
    TransactionStatus, TransactionType, UserKind, VehicleType,
};

/// Metadata recorded on the transaction a transfer produces.
#[derive(Clone, Debug, Default)]
pub struct TxMeta {
    pub category: TransactionCategory,
    pub kind: TransactionType,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub qr_code_id: Option<i64>,
    pub service_type: ServiceType,
    pub service_id: Option<i64>,
}

impl TxMeta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: TransactionCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn qr_code_id(mut self, qr_code_id: i64) -> Self {
        self.qr_code_id = Some(qr_code_id);
        self
    }

    #[must_use]
    pub fn service(mut self, service_type: ServiceType, service_id: i64) -> Self {
        self.service_type = service_type;
        self.service_id = Some(service_id);
        self
    }
}

/// Move funds between two accounts on behalf of the sender's owner.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub user_id: i64,
    pub sender_account_id: i64,
    pub receiver_account_id: i64,
    pub amount: MoneyCents,
    pub meta: TxMeta,
}

impl TransferCmd {
    #[must_use]
    pub fn new(
        user_id: i64,
        sender_account_id: i64,
        receiver_account_id: i64,
        amount: MoneyCents,
    ) -> Self {
        Self {
            user_id,
            sender_account_id,
            receiver_account_id,
            amount,
            meta: TxMeta::new(),
        }
    }

    #[must_use]
    pub fn meta(mut self, meta: TxMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }
}

/// Partial update of a transaction. `None` leaves the column untouched.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub transaction_id: i64,
    pub user_id: i64,
    pub status: Option<TransactionStatus>,
    pub category: Option<TransactionCategory>,
    pub description: Option<String>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(transaction_id: i64, user_id: i64) -> Self {
        Self {
            transaction_id,
            user_id,
            status: None,
            category: None,
            description: None,
        }
    }

    #[must_use]
    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn category(mut self, category: TransactionCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct CreateQrCmd {
    pub user_id: i64,
    pub receiver_account_id: i64,
    pub amount: MoneyCents,
    pub url: String,
    pub now: DateTime<Utc>,
}

impl CreateQrCmd {
    #[must_use]
    pub fn new(
        user_id: i64,
        receiver_account_id: i64,
        amount: MoneyCents,
        url: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            receiver_account_id,
            amount,
            url: url.into(),
            now,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScanQrCmd {
    pub user_id: i64,
    pub qr_id: i64,
    pub sender_account_id: i64,
    pub now: DateTime<Utc>,
}

impl ScanQrCmd {
    #[must_use]
    pub fn new(user_id: i64, qr_id: i64, sender_account_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            qr_id,
            sender_account_id,
            now,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl OrderItemInput {
    #[must_use]
    pub fn new(menu_item_id: i64, quantity: i64) -> Self {
        Self {
            menu_item_id,
            quantity,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct CreateOrderCmd {
    pub user_id: i64,
    pub merchant_id: i64,
    pub delivery_address: String,
    pub items: Vec<OrderItemInput>,
}

impl CreateOrderCmd {
    #[must_use]
    pub fn new(user_id: i64, merchant_id: i64, delivery_address: impl Into<String>) -> Self {
        Self {
            user_id,
            merchant_id,
            delivery_address: delivery_address.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn item(mut self, item: OrderItemInput) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = OrderItemInput>) -> Self {
        self.items.extend(items);
        self
    }
}

#[derive(Clone, Copy, Debug)]
pub struct UpdateOrderStatusCmd {
    pub order_id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
}

impl UpdateOrderStatusCmd {
    #[must_use]
    pub fn new(order_id: i64, user_id: i64, status: OrderStatus) -> Self {
        Self {
            order_id,
            user_id,
            status,
        }
    }
}

/// Register a user. Both of its accounts are created alongside it.
#[derive(Clone, Debug)]
pub struct NewUserCmd {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub kind: UserKind,
    pub profile_picture_url: Option<String>,
    pub opening_balance: MoneyCents,
}

impl NewUserCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone: None,
            kind: UserKind::Consumer,
            profile_picture_url: None,
            opening_balance: MoneyCents::ZERO,
        }
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: UserKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn profile_picture_url(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn opening_balance(mut self, balance: MoneyCents) -> Self {
        self.opening_balance = balance;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateUserCmd {
    pub user_id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture_url: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserCmd {
    #[must_use]
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn profile_picture_url(mut self, url: impl Into<String>) -> Self {
        self.profile_picture_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Register a merchant: a `merchant` user plus its profile.
#[derive(Clone, Debug)]
pub struct NewMerchantCmd {
    pub user: NewUserCmd,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub phone: String,
    pub category: String,
    pub open_hour: String,
    pub close_hour: String,
    pub logo_url: Option<String>,
}

impl NewMerchantCmd {
    #[must_use]
    pub fn new(
        user: NewUserCmd,
        name: impl Into<String>,
        location: impl Into<String>,
        phone: impl Into<String>,
        open_hour: impl Into<String>,
        close_hour: impl Into<String>,
    ) -> Self {
        Self {
            user: user.kind(UserKind::Merchant),
            name: name.into(),
            description: None,
            location: location.into(),
            phone: phone.into(),
            category: "food".to_string(),
            open_hour: open_hour.into(),
            close_hour: close_hour.into(),
            logo_url: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateMerchantCmd {
    pub user_id: i64,
    pub merchant_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub open_hour: Option<String>,
    pub close_hour: Option<String>,
    pub logo_url: Option<String>,
}

impl UpdateMerchantCmd {
    #[must_use]
    pub fn new(merchant_id: i64, user_id: i64) -> Self {
        Self {
            merchant_id,
            user_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn hours(mut self, open_hour: impl Into<String>, close_hour: impl Into<String>) -> Self {
        self.open_hour = Some(open_hour.into());
        self.close_hour = Some(close_hour.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct NewMenuItemCmd {
    pub user_id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: MoneyCents,
    pub category: MenuCategory,
    pub is_available: bool,
    pub image_url: Option<String>,
}

impl NewMenuItemCmd {
    #[must_use]
    pub fn new(
        user_id: i64,
        merchant_id: i64,
        name: impl Into<String>,
        price: MoneyCents,
        category: MenuCategory,
    ) -> Self {
        Self {
            user_id,
            merchant_id,
            name: name.into(),
            description: None,
            price,
            category,
            is_available: true,
            image_url: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateMenuItemCmd {
    pub user_id: i64,
    pub merchant_id: i64,
    pub menu_item_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<MoneyCents>,
    pub category: Option<MenuCategory>,
    pub is_available: Option<bool>,
    pub image_url: Option<String>,
}

impl UpdateMenuItemCmd {
    #[must_use]
    pub fn new(user_id: i64, merchant_id: i64, menu_item_id: i64) -> Self {
        Self {
            user_id,
            merchant_id,
            menu_item_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn price(mut self, price: MoneyCents) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }
}

/// Register a driver: a `driver` user plus its (unverified, offline) profile.
#[derive(Clone, Debug)]
pub struct NewDriverCmd {
    pub user: NewUserCmd,
    pub license_number: String,
    pub vehicle_plate: String,
    pub vehicle_type: VehicleType,
    pub current_location: Option<String>,
}

impl NewDriverCmd {
    #[must_use]
    pub fn new(
        user: NewUserCmd,
        license_number: impl Into<String>,
        vehicle_plate: impl Into<String>,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            user: user.kind(UserKind::Driver),
            license_number: license_number.into(),
            vehicle_plate: vehicle_plate.into(),
            vehicle_type,
            current_location: None,
        }
    }

    #[must_use]
    pub fn current_location(mut self, location: impl Into<String>) -> Self {
        self.current_location = Some(location.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateDriverCmd {
    pub user_id: i64,
    pub license_number: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub current_location: Option<String>,
}

impl UpdateDriverCmd {
    #[must_use]
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn vehicle(mut self, plate: impl Into<String>, vehicle_type: VehicleType) -> Self {
        self.vehicle_plate = Some(plate.into());
        self.vehicle_type = Some(vehicle_type);
        self
    }
}

/// Driver-initiated availability change.
#[derive(Clone, Copy, Debug)]
pub struct SetDriverStatusCmd {
    pub user_id: i64,
    pub status: DriverStatus,
}

impl SetDriverStatusCmd {
    #[must_use]
    pub fn new(user_id: i64, status: DriverStatus) -> Self {
        Self { user_id, status }
    }
}

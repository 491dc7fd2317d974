//! Engine types rendered as API bodies.

use api_types::{
    account::AccountView,
    driver::DriverView,
    merchant::{MenuItemView, MerchantDetailView, MerchantView},
    order::{OrderDetailView, OrderItemView, OrderView},
    qr::QrView,
    transaction::TransactionView,
    user::UserView,
};
use engine::{
    Account, Driver, MenuItem, Merchant, MerchantDetail, Order, OrderDetail, OrderItem, QrCode,
    Transaction, User,
};

pub fn user(user: User) -> UserView {
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        phone: user.phone,
        kind: user.kind.as_str().to_string(),
        profile_picture_url: user.profile_picture_url,
        created_at: user.created_at,
    }
}

pub fn account(account: Account) -> AccountView {
    AccountView {
        id: account.id,
        name: account.name,
        balance: account.balance.to_major(),
        user_id: account.user_id,
        account_type: account.account_type.as_str().to_string(),
        created_at: account.created_at,
    }
}

pub fn transaction(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        amount: tx.amount.to_major(),
        sender_account_id: tx.sender_account_id,
        receiver_account_id: tx.receiver_account_id,
        category: tx.category.as_str().to_string(),
        kind: tx.kind.as_str().to_string(),
        status: tx.status.as_str().to_string(),
        qr_code_id: tx.qr_code_id,
        description: tx.description,
        service_type: tx.service_type.as_str().to_string(),
        service_id: tx.service_id,
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}

pub fn qr(qr: QrCode) -> QrView {
    QrView {
        id: qr.id,
        receiver_account_id: qr.receiver_account_id,
        amount: qr.amount.to_major(),
        url: qr.url,
        expires_at: qr.expires_at,
        is_used: qr.is_used,
        created_at: qr.created_at,
    }
}

pub fn merchant(merchant: Merchant) -> MerchantView {
    MerchantView {
        id: merchant.id,
        user_id: merchant.user_id,
        merchant_name: merchant.name,
        description: merchant.description,
        location: merchant.location,
        phone: merchant.phone,
        category: merchant.category,
        open_hour: merchant.open_hour,
        close_hour: merchant.close_hour,
        rating: merchant.rating,
        logo_url: merchant.logo_url,
        created_at: merchant.created_at,
    }
}

pub fn merchant_detail(detail: MerchantDetail) -> MerchantDetailView {
    MerchantDetailView {
        merchant: merchant(detail.merchant),
        top_items: detail.top_items.into_iter().map(menu_item).collect(),
    }
}

pub fn menu_item(item: MenuItem) -> MenuItemView {
    MenuItemView {
        id: item.id,
        merchant_id: item.merchant_id,
        name: item.name,
        description: item.description,
        price: item.price.to_major(),
        category: item.category.as_str().to_string(),
        is_available: item.is_available,
        total_sold: item.total_sold,
        image_url: item.image_url,
        rating: item.rating,
        created_at: item.created_at,
    }
}

pub fn driver(driver: Driver) -> DriverView {
    DriverView {
        id: driver.id,
        user_id: driver.user_id,
        license_number: driver.license_number,
        vehicle_plate: driver.vehicle_plate,
        vehicle_type: driver.vehicle_type.as_str().to_string(),
        status: driver.status.as_str().to_string(),
        is_verified: driver.is_verified,
        current_location: driver.current_location,
        rating: driver.rating,
        created_at: driver.created_at,
    }
}

pub fn order(order: Order) -> OrderView {
    OrderView {
        id: order.id,
        user_id: order.user_id,
        merchant_id: order.merchant_id,
        driver_id: order.driver_id,
        total_amount: order.total_amount.to_major(),
        delivery_fee: order.delivery_fee.to_major(),
        status: order.status.as_str().to_string(),
        delivery_address: order.delivery_address,
        transaction_id: order.transaction_id,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

fn order_item(item: OrderItem) -> OrderItemView {
    OrderItemView {
        id: item.id,
        menu_item_id: item.menu_item_id,
        quantity: item.quantity,
        unit_price: item.unit_price.to_major(),
        notes: item.notes,
    }
}

pub fn order_detail(detail: OrderDetail) -> OrderDetailView {
    OrderDetailView {
        order: order(detail.order),
        buyer: user(detail.buyer),
        merchant: merchant(detail.merchant),
        items: detail.items.into_iter().map(order_item).collect(),
    }
}

//! Initial schema migration - creates all tables from scratch.
//!
//! - `users`: identities and credentials
//! - `accounts`: balance-holding wallets (`main_balance`, `points`)
//! - `merchant_profiles` / `menu_items`: sellers and what they sell
//! - `driver_profiles`: couriers and their availability
//! - `qr_codes`: one-shot payment requests
//! - `transactions`: every balance movement
//! - `orders` / `order_items`: food orders with price snapshots
//!
//! Money columns hold integer cents.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    Phone,
    Kind,
    ProfilePictureUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Name,
    Balance,
    UserId,
    AccountType,
    CreatedAt,
}

#[derive(Iden)]
enum MerchantProfiles {
    Table,
    Id,
    UserId,
    MerchantName,
    Description,
    Location,
    Phone,
    Category,
    OpenHour,
    CloseHour,
    Rating,
    LogoUrl,
    CreatedAt,
}

#[derive(Iden)]
enum MenuItems {
    Table,
    Id,
    MerchantId,
    Name,
    Description,
    Price,
    Category,
    IsAvailable,
    TotalSold,
    ImageUrl,
    Rating,
    CreatedAt,
}

#[derive(Iden)]
enum DriverProfiles {
    Table,
    Id,
    UserId,
    LicenseNumber,
    VehiclePlate,
    VehicleType,
    Status,
    IsVerified,
    CurrentLocation,
    Rating,
    CreatedAt,
}

#[derive(Iden)]
enum QrCodes {
    Table,
    Id,
    ReceiverAccountId,
    Amount,
    Url,
    ExpiresAt,
    IsUsed,
    CreatedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Amount,
    SenderAccountId,
    ReceiverAccountId,
    Category,
    #[iden = "type"]
    Type,
    Status,
    QrCodeId,
    Description,
    ServiceType,
    ServiceId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    MerchantId,
    DriverId,
    TotalAmount,
    DeliveryFee,
    Status,
    DeliveryAddress,
    TransactionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    MenuItemId,
    Quantity,
    UnitPrice,
    Notes,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(
                        ColumnDef::new(Users::Kind)
                            .string()
                            .not_null()
                            .default("consumer"),
                    )
                    .col(ColumnDef::new(Users::ProfilePictureUrl).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Accounts::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-user_id")
                            .from(Accounts::Table, Accounts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-user_id-account_type-unique")
                    .table(Accounts::Table)
                    .col(Accounts::UserId)
                    .col(Accounts::AccountType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Merchants and menu
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(MerchantProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MerchantProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MerchantProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MerchantProfiles::MerchantName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MerchantProfiles::Description).text())
                    .col(ColumnDef::new(MerchantProfiles::Location).string().not_null())
                    .col(ColumnDef::new(MerchantProfiles::Phone).string().not_null())
                    .col(ColumnDef::new(MerchantProfiles::Category).string().not_null())
                    .col(ColumnDef::new(MerchantProfiles::OpenHour).string().not_null())
                    .col(ColumnDef::new(MerchantProfiles::CloseHour).string().not_null())
                    .col(
                        ColumnDef::new(MerchantProfiles::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(MerchantProfiles::LogoUrl).string())
                    .col(
                        ColumnDef::new(MerchantProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-merchant_profiles-user_id")
                            .from(MerchantProfiles::Table, MerchantProfiles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuItems::MerchantId).big_integer().not_null())
                    .col(ColumnDef::new(MenuItems::Name).string().not_null())
                    .col(ColumnDef::new(MenuItems::Description).text())
                    .col(ColumnDef::new(MenuItems::Price).big_integer().not_null())
                    .col(ColumnDef::new(MenuItems::Category).string().not_null())
                    .col(
                        ColumnDef::new(MenuItems::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MenuItems::TotalSold)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(MenuItems::ImageUrl).string())
                    .col(
                        ColumnDef::new(MenuItems::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(MenuItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-menu_items-merchant_id")
                            .from(MenuItems::Table, MenuItems::MerchantId)
                            .to(MerchantProfiles::Table, MerchantProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-menu_items-merchant_id")
                    .table(MenuItems::Table)
                    .col(MenuItems::MerchantId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Drivers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DriverProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DriverProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DriverProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DriverProfiles::LicenseNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DriverProfiles::VehiclePlate)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DriverProfiles::VehicleType).string().not_null())
                    .col(
                        ColumnDef::new(DriverProfiles::Status)
                            .string()
                            .not_null()
                            .default("offline"),
                    )
                    .col(
                        ColumnDef::new(DriverProfiles::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DriverProfiles::CurrentLocation).string())
                    .col(
                        ColumnDef::new(DriverProfiles::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(DriverProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-driver_profiles-user_id")
                            .from(DriverProfiles::Table, DriverProfiles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-driver_profiles-status")
                    .table(DriverProfiles::Table)
                    .col(DriverProfiles::Status)
                    .col(DriverProfiles::IsVerified)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. QR codes
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(QrCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QrCodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::ReceiverAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QrCodes::Amount).big_integer().not_null())
                    .col(ColumnDef::new(QrCodes::Url).string().not_null())
                    .col(
                        ColumnDef::new(QrCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QrCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-qr_codes-receiver_account_id")
                            .from(QrCodes::Table, QrCodes::ReceiverAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::SenderAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::ReceiverAccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Category).string().not_null())
                    .col(ColumnDef::new(Transactions::Type).string().not_null())
                    .col(ColumnDef::new(Transactions::Status).string().not_null())
                    .col(ColumnDef::new(Transactions::QrCodeId).big_integer())
                    .col(ColumnDef::new(Transactions::Description).text())
                    .col(
                        ColumnDef::new(Transactions::ServiceType)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(ColumnDef::new(Transactions::ServiceId).big_integer())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-sender_account_id")
                            .from(Transactions::Table, Transactions::SenderAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-receiver_account_id")
                            .from(Transactions::Table, Transactions::ReceiverAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-qr_code_id")
                            .from(Transactions::Table, Transactions::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-sender_account_id")
                    .table(Transactions::Table)
                    .col(Transactions::SenderAccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-receiver_account_id")
                    .table(Transactions::Table)
                    .col(Transactions::ReceiverAccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-service")
                    .table(Transactions::Table)
                    .col(Transactions::ServiceType)
                    .col(Transactions::ServiceId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Orders
        // ───────────────────────────────────────────────────────────────────
        // `transaction_id` is a plain reference: it is written after the
        // payment row exists, in the same database transaction.
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::MerchantId).big_integer().not_null())
                    .col(ColumnDef::new(Orders::DriverId).big_integer())
                    .col(ColumnDef::new(Orders::TotalAmount).big_integer().not_null())
                    .col(ColumnDef::new(Orders::DeliveryFee).big_integer().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Orders::DeliveryAddress).text().not_null())
                    .col(ColumnDef::new(Orders::TransactionId).big_integer())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-merchant_id")
                            .from(Orders::Table, Orders::MerchantId)
                            .to(MerchantProfiles::Table, MerchantProfiles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-orders-driver_id")
                            .from(Orders::Table, Orders::DriverId)
                            .to(DriverProfiles::Table, DriverProfiles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-orders-user_id-created_at")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Items keep their own price snapshot, so menu items can be deleted
        // without touching order history.
        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::MenuItemId).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::Quantity).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::UnitPrice).big_integer().not_null())
                    .col(ColumnDef::new(OrderItems::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-order_items-order_id")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-order_items-order_id")
                    .table(OrderItems::Table)
                    .col(OrderItems::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QrCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DriverProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MerchantProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

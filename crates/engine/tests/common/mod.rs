#![allow(dead_code)]

use std::path::PathBuf;

use sea_orm::{Database, DatabaseConnection};

use engine::{
    Account, Driver, DriverStatus, Engine, MenuCategory, MenuItem, Merchant, MoneyCents,
    NewDriverCmd, NewMenuItemCmd, NewMerchantCmd, NewUserCmd, SetDriverStatusCmd, User,
    VehicleType,
};
use migration::MigratorTrait;
use uuid::Uuid;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn engine_with_file_db() -> (Engine, DatabaseConnection, PathBuf) {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db, path)
}

pub fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

/// A consumer with `balance` cents on its main wallet.
pub async fn consumer(engine: &Engine, name: &str, balance: i64) -> (User, Account) {
    let user = engine
        .create_user(
            NewUserCmd::new(name, format!("{name}@dompet.test"), "secret1")
                .opening_balance(cents(balance)),
        )
        .await
        .unwrap();
    let account = engine.main_account(user.id).await.unwrap();
    (user, account)
}

/// A merchant selling a 10.00 main course and a 5.00 drink.
pub async fn merchant_with_menu(engine: &Engine, name: &str) -> (Merchant, Vec<MenuItem>) {
    let merchant = engine
        .create_merchant(NewMerchantCmd::new(
            NewUserCmd::new(name, format!("{name}@dompet.test"), "secret1"),
            format!("Warung {name}"),
            "Jl. Sudirman 1",
            "0811111111",
            "08:00",
            "21:00",
        ))
        .await
        .unwrap();
    let mut items = Vec::new();
    for (label, price, category) in [
        ("Nasi Goreng", 1000, MenuCategory::MainCourse),
        ("Es Teh", 500, MenuCategory::Drink),
    ] {
        let item = engine
            .create_menu_item(NewMenuItemCmd::new(
                merchant.user_id,
                merchant.id,
                label,
                cents(price),
                category,
            ))
            .await
            .unwrap();
        items.push(item);
    }
    (merchant, items)
}

/// A verified driver that is online.
pub async fn online_driver(engine: &Engine, name: &str, plate: &str) -> Driver {
    let driver = engine
        .create_driver(NewDriverCmd::new(
            NewUserCmd::new(name, format!("{name}@dompet.test"), "secret1"),
            format!("SIM-{plate}"),
            plate,
            VehicleType::Motorcycle,
        ))
        .await
        .unwrap();
    engine.verify_driver(driver.id, true).await.unwrap();
    engine
        .set_driver_status(SetDriverStatusCmd::new(driver.user_id, DriverStatus::Online))
        .await
        .unwrap()
}

pub async fn driver_status(engine: &Engine, user_id: i64) -> DriverStatus {
    engine.driver_profile(user_id).await.unwrap().status
}

pub async fn balance(engine: &Engine, account: &Account) -> i64 {
    engine
        .account_balance(account.id, account.user_id)
        .await
        .unwrap()
        .cents()
}

mod common;

use common::{cents, consumer, engine_with_db, merchant_with_menu, online_driver};
use engine::{
    DriverStatus, EngineError, MenuCategory, NewDriverCmd, NewMenuItemCmd, NewUserCmd,
    SetDriverStatusCmd, UpdateDriverCmd, UpdateMenuItemCmd, UpdateMerchantCmd, UpdateUserCmd,
    VehicleType,
};

#[tokio::test]
async fn updated_password_is_used_for_authentication() {
    let (engine, _db) = engine_with_db().await;
    let (user, _) = consumer(&engine, "alice", 0).await;

    let updated = engine
        .update_user(UpdateUserCmd::new(user.id).name("Alice B").password("newpass"))
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice B");

    assert!(
        engine
            .authenticate("alice@dompet.test", "secret1")
            .await
            .unwrap()
            .is_none()
    );
    let found = engine
        .authenticate("alice@dompet.test", "newpass")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let err = engine
        .update_user(UpdateUserCmd::new(user.id).password("123"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn accounts_are_private_to_their_owner() {
    let (engine, _db) = engine_with_db().await;
    let (alice, wallet) = consumer(&engine, "alice", 100).await;
    let (bob, _) = consumer(&engine, "bob", 0).await;

    let renamed = engine
        .rename_account(wallet.id, alice.id, "  Daily  ")
        .await
        .unwrap();
    assert_eq!(renamed.name, "Daily");
    assert_eq!(renamed.balance, cents(100));

    let err = engine.get_account(wallet.id, bob.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    let err = engine
        .rename_account(wallet.id, bob.id, "Mine")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn merchant_profile_is_updated_by_its_owner_only() {
    let (engine, _db) = engine_with_db().await;
    let (merchant, _) = merchant_with_menu(&engine, "sari").await;
    let (stranger, _) = consumer(&engine, "bob", 0).await;

    let updated = engine
        .update_merchant(
            UpdateMerchantCmd::new(merchant.id, merchant.user_id)
                .name("Warung Sari Baru")
                .hours("07:00", "22:00"),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Warung Sari Baru");
    assert_eq!(updated.open_hour, "07:00");
    assert_eq!(updated.close_hour, "22:00");

    let err = engine
        .update_merchant(UpdateMerchantCmd::new(merchant.id, stranger.id).name("Hijacked"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .update_merchant(
            UpdateMerchantCmd::new(merchant.id, merchant.user_id).hours("22:00", "07:00"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn merchants_are_listed_in_creation_order() {
    let (engine, _db) = engine_with_db().await;
    let (first, _) = merchant_with_menu(&engine, "sari").await;
    let (second, _) = merchant_with_menu(&engine, "budi").await;

    let ids: Vec<i64> = engine
        .list_merchants()
        .await
        .unwrap()
        .into_iter()
        .map(|merchant| merchant.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let detail = engine.get_merchant(first.id).await.unwrap();
    assert_eq!(detail.merchant.id, first.id);
    let top: Vec<&str> = detail.top_items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(top, vec!["Nasi Goreng", "Es Teh"]);
}

#[tokio::test]
async fn menu_items_are_managed_by_the_merchant() {
    let (engine, _db) = engine_with_db().await;
    let (merchant, items) = merchant_with_menu(&engine, "sari").await;

    let err = engine
        .create_menu_item(NewMenuItemCmd::new(
            merchant.user_id,
            merchant.id,
            "Free Water",
            cents(0),
            MenuCategory::Drink,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let names: Vec<String> = engine
        .list_menu_items(merchant.id)
        .await
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["Es Teh".to_string(), "Nasi Goreng".to_string()]);

    let nasi = &items[0];
    let updated = engine
        .update_menu_item(
            UpdateMenuItemCmd::new(merchant.user_id, merchant.id, nasi.id)
                .price(cents(1200))
                .available(false),
        )
        .await
        .unwrap();
    assert_eq!(updated.price, cents(1200));
    assert!(!updated.is_available);

    engine
        .delete_menu_item(merchant.user_id, merchant.id, nasi.id)
        .await
        .unwrap();
    let err = engine.get_menu_item(merchant.id, nasi.id).await.unwrap_err();
    assert!(matches!(err, EngineError::MenuItemNotFound));
}

#[tokio::test]
async fn driver_registration_rejects_a_taken_plate() {
    let (engine, _db) = engine_with_db().await;
    online_driver(&engine, "dedi", "B1234XY").await;

    let err = engine
        .create_driver(NewDriverCmd::new(
            NewUserCmd::new("eko", "eko@dompet.test", "secret1"),
            "SIM-OTHER",
            "B1234XY",
            VehicleType::Car,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(ref key) if key == "B1234XY"));
    assert!(
        engine
            .authenticate("eko@dompet.test", "secret1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn drivers_manage_their_own_availability() {
    let (engine, _db) = engine_with_db().await;
    let driver = online_driver(&engine, "dedi", "B1234XY").await;

    let err = engine
        .set_driver_status(SetDriverStatusCmd::new(driver.user_id, DriverStatus::Sending))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let moved = engine
        .update_driver_location(driver.user_id, "Jl. Thamrin 10")
        .await
        .unwrap();
    assert_eq!(moved.current_location.as_deref(), Some("Jl. Thamrin 10"));

    let swapped = engine
        .update_driver(UpdateDriverCmd::new(driver.user_id).vehicle("B5555CC", VehicleType::Car))
        .await
        .unwrap();
    assert_eq!(swapped.vehicle_plate, "B5555CC");
    assert_eq!(swapped.vehicle_type, VehicleType::Car);

    let offline = engine
        .set_driver_status(SetDriverStatusCmd::new(driver.user_id, DriverStatus::Offline))
        .await
        .unwrap();
    assert_eq!(offline.status, DriverStatus::Offline);
    assert!(engine.list_available_drivers(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn available_drivers_can_be_filtered_by_vehicle() {
    let (engine, _db) = engine_with_db().await;
    let rider = online_driver(&engine, "dedi", "B1234XY").await;

    // Registered but never verified.
    engine
        .create_driver(NewDriverCmd::new(
            NewUserCmd::new("eko", "eko@dompet.test", "secret1"),
            "SIM-CAR",
            "B9999ZZ",
            VehicleType::Car,
        ))
        .await
        .unwrap();

    let all = engine.list_available_drivers(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, rider.id);

    let motorcycles = engine
        .list_available_drivers(Some(VehicleType::Motorcycle))
        .await
        .unwrap();
    assert_eq!(motorcycles.len(), 1);
    assert!(
        engine
            .list_available_drivers(Some(VehicleType::Car))
            .await
            .unwrap()
            .is_empty()
    );
}

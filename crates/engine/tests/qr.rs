mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};

use engine::{
    AccountSide, CreateQrCmd, EngineError, ScanQrCmd, ServiceType, TransactionCategory,
    TransactionStatus, TransactionType,
};

use common::{balance, cents, consumer, engine_with_db, engine_with_file_db};

const URL: &str = "https://pay.dompet.test/qr";

#[tokio::test]
async fn scan_pays_receiver_once() {
    let (engine, _db) = engine_with_db().await;
    let (shop, receiver) = consumer(&engine, "shop", 0).await;
    let (payer, sender) = consumer(&engine, "payer", 10_000).await;
    let now = Utc::now();

    let qr = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(2_500), URL, now))
        .await
        .unwrap();
    assert!(!qr.is_used);
    assert_eq!(qr.expires_at - qr.created_at, Duration::seconds(60));

    let tx = engine
        .scan_qr(ScanQrCmd::new(payer.id, qr.id, sender.id, now + Duration::seconds(5)))
        .await
        .unwrap();
    assert_eq!(tx.amount, cents(2_500));
    assert_eq!(tx.status, TransactionStatus::Completed);
    assert_eq!(tx.kind, TransactionType::Payment);
    assert_eq!(tx.category, TransactionCategory::Other);
    assert_eq!(tx.service_type, ServiceType::None);
    assert_eq!(tx.qr_code_id, Some(qr.id));
    assert!(engine.get_qr(qr.id).await.unwrap().is_used);
    assert_eq!(balance(&engine, &sender).await, 7_500);
    assert_eq!(balance(&engine, &receiver).await, 2_500);

    let again = engine
        .scan_qr(ScanQrCmd::new(payer.id, qr.id, sender.id, now + Duration::seconds(6)))
        .await
        .unwrap_err();
    assert_eq!(again, EngineError::QrAlreadyUsed);
    assert_eq!(balance(&engine, &sender).await, 7_500);
    assert_eq!(balance(&engine, &receiver).await, 2_500);
}

#[tokio::test]
async fn scan_respects_the_sixty_second_window() {
    let (engine, _db) = engine_with_db().await;
    let (shop, receiver) = consumer(&engine, "shop", 0).await;
    let (payer, sender) = consumer(&engine, "payer", 10_000).await;
    let now = Utc::now();

    let stale = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(1_000), URL, now))
        .await
        .unwrap();
    let err = engine
        .scan_qr(ScanQrCmd::new(payer.id, stale.id, sender.id, now + Duration::seconds(61)))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::QrExpired);
    assert!(!engine.get_qr(stale.id).await.unwrap().is_used);
    assert_eq!(balance(&engine, &sender).await, 10_000);

    let fresh = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(1_000), URL, now))
        .await
        .unwrap();
    engine
        .scan_qr(ScanQrCmd::new(payer.id, fresh.id, sender.id, now + Duration::seconds(59)))
        .await
        .unwrap();
    assert_eq!(balance(&engine, &receiver).await, 1_000);
}

#[tokio::test]
async fn scan_failures_leave_code_unused() {
    let (engine, _db) = engine_with_db().await;
    let (shop, receiver) = consumer(&engine, "shop", 0).await;
    let (payer, sender) = consumer(&engine, "payer", 500).await;
    let now = Utc::now();
    let qr = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(1_000), URL, now))
        .await
        .unwrap();

    let missing = engine
        .scan_qr(ScanQrCmd::new(payer.id, 9_999, sender.id, now))
        .await
        .unwrap_err();
    assert_eq!(missing, EngineError::QrNotFound);

    let broke = engine
        .scan_qr(ScanQrCmd::new(payer.id, qr.id, sender.id, now))
        .await
        .unwrap_err();
    assert_eq!(broke, EngineError::InsufficientBalance);

    let own = engine
        .scan_qr(ScanQrCmd::new(shop.id, qr.id, receiver.id, now))
        .await
        .unwrap_err();
    assert_eq!(own, EngineError::SameAccount);

    let no_account = engine
        .scan_qr(ScanQrCmd::new(payer.id, qr.id, 9_999, now))
        .await
        .unwrap_err();
    assert_eq!(no_account, EngineError::AccountNotFound(AccountSide::Sender));

    assert!(!engine.get_qr(qr.id).await.unwrap().is_used);
    assert_eq!(balance(&engine, &sender).await, 500);
}

#[tokio::test]
async fn create_validates_amount_url_and_ownership() {
    let (engine, _db) = engine_with_db().await;
    let (shop, receiver) = consumer(&engine, "shop", 0).await;
    let (other, _) = consumer(&engine, "other", 0).await;
    let now = Utc::now();

    let zero = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(0), URL, now))
        .await
        .unwrap_err();
    assert!(matches!(zero, EngineError::InvalidAmount(_)));

    let blank = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(100), "  ", now))
        .await
        .unwrap_err();
    assert!(matches!(blank, EngineError::Validation(_)));

    let missing = engine
        .create_qr(CreateQrCmd::new(shop.id, 9_999, cents(100), URL, now))
        .await
        .unwrap_err();
    assert_eq!(missing, EngineError::AccountNotFound(AccountSide::Receiver));

    let foreign = engine
        .create_qr(CreateQrCmd::new(other.id, receiver.id, cents(100), URL, now))
        .await
        .unwrap_err();
    assert!(matches!(foreign, EngineError::Forbidden(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_scans_pay_exactly_once() {
    let (engine, db, path) = engine_with_file_db().await;
    let engine = Arc::new(engine);
    let (shop, receiver) = consumer(&engine, "shop", 0).await;
    let now = Utc::now();
    let qr = engine
        .create_qr(CreateQrCmd::new(shop.id, receiver.id, cents(1_000), URL, now))
        .await
        .unwrap();

    let mut payers = Vec::new();
    for i in 0..5 {
        payers.push(consumer(&engine, &format!("payer{i}"), 5_000).await);
    }

    let mut handles = Vec::new();
    for (payer, account) in &payers {
        let engine = Arc::clone(&engine);
        let cmd = ScanQrCmd::new(payer.id, qr.id, account.id, now);
        handles.push(tokio::spawn(async move { engine.scan_qr(cmd).await }));
    }
    let mut paid = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => paid += 1,
            Err(err) => assert_eq!(err, EngineError::QrAlreadyUsed),
        }
    }

    assert_eq!(paid, 1);
    assert_eq!(balance(&engine, &receiver).await, 1_000);
    let mut total = 0;
    for (_, account) in &payers {
        total += balance(&engine, account).await;
    }
    assert_eq!(total, 5 * 5_000 - 1_000);

    drop(engine);
    drop(db);
    let _ = std::fs::remove_file(path);
}

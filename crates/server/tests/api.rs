use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Account, MoneyCents, NewUserCmd, User};

const PASSWORD: &str = "secret1";

/// The router plus a second engine on the same database for fixtures.
async fn setup() -> (Router, engine::Engine) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let fixtures = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    let served = engine::Engine::builder().database(db).build().await.unwrap();
    (server::app(served), fixtures)
}

async fn funded_user(engine: &engine::Engine, name: &str, cents: i64) -> (User, Account) {
    let user = engine
        .create_user(
            NewUserCmd::new(name, format!("{name}@dompet.test"), PASSWORD)
                .opening_balance(MoneyCents::new(cents)),
        )
        .await
        .unwrap();
    let account = engine.main_account(user.id).await.unwrap();
    (user, account)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    email: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(email) = email {
        let token = STANDARD.encode(format!("{email}:{PASSWORD}"));
        builder = builder.header(header::AUTHORIZATION, format!("Basic {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_is_public() {
    let (app, _engine) = setup().await;
    let (status, body) = call(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn protected_routes_require_valid_credentials() {
    let (app, engine) = setup().await;
    funded_user(&engine, "alice", 0).await;

    let (status, body) = call(&app, Method::GET, "/api/v1/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = call(
        &app,
        Method::GET,
        "/api/v1/users/me",
        Some("nobody@dompet.test"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/users/me",
        Some("alice@dompet.test"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@dompet.test");
    assert_eq!(body["data"]["kind"], "consumer");
}

#[tokio::test]
async fn public_signup_creates_wallets() {
    let (app, _engine) = setup().await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/public/users",
        None,
        Some(json!({
            "name": "Citra",
            "email": "citra@dompet.test",
            "password": PASSWORD,
            "phone": "0812345678"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Citra");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/users/me/accounts",
        Some("citra@dompet.test"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/public/users",
        None,
        Some(json!({"name": "Citra", "email": "citra@dompet.test", "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn transfer_updates_balances_and_reports_errors() {
    let (app, engine) = setup().await;
    let (_alice, a) = funded_user(&engine, "alice", 10_000).await;
    let (_bob, b) = funded_user(&engine, "bob", 0).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some("alice@dompet.test"),
        Some(json!({
            "sender_account_id": a.id,
            "receiver_account_id": b.id,
            "amount": 30.0,
            "category": "food"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["amount"], 30.0);
    assert_eq!(body["data"]["category"], "food");
    assert_eq!(body["data"]["status"], "pending");

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/accounts/{}/balance", a.id),
        Some("alice@dompet.test"),
        None,
    )
    .await;
    assert_eq!(body["data"]["balance"], 70.0);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some("alice@dompet.test"),
        Some(json!({
            "sender_account_id": a.id,
            "receiver_account_id": b.id,
            "amount": 70.01
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_BALANCE");
    assert_eq!(body["error"]["type"], "validation");

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/accounts/{}", a.id),
        Some("bob@dompet.test"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some("alice@dompet.test"),
        Some(json!({"sender_account_id": "one"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some("alice@dompet.test"),
        Some(json!({
            "sender_account_id": a.id,
            "receiver_account_id": b.id,
            "amount": 1.0,
            "status": "lost"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn qr_code_is_paid_once() {
    let (app, engine) = setup().await;
    let (_shop, receiver) = funded_user(&engine, "shop", 0).await;
    let (_payer, sender) = funded_user(&engine, "payer", 5_000).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/qr",
        Some("shop@dompet.test"),
        Some(json!({
            "receiver_account_id": receiver.id,
            "amount": 12.5,
            "url": "https://pay.dompet.test/qr"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_used"], false);
    let qr_id = body["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/qr/{qr_id}");
    let scan = json!({"sender_account_id": sender.id});
    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some("payer@dompet.test"),
        Some(scan.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], 12.5);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["qr_code_id"], qr_id);

    let (status, body) = call(&app, Method::PUT, &uri, Some("payer@dompet.test"), Some(scan)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "QR_ALREADY_USED");

    let (_, body) = call(&app, Method::GET, &uri, Some("payer@dompet.test"), None).await;
    assert_eq!(body["data"]["is_used"], true);
}

#[tokio::test]
async fn malformed_path_ids_use_the_error_envelope() {
    let (app, engine) = setup().await;
    funded_user(&engine, "payer", 0).await;

    for (method, uri) in [
        (Method::GET, "/api/v1/qr/abc"),
        (Method::DELETE, "/api/v1/merchants/1/menu-items/x1"),
    ] {
        let (status, body) = call(&app, method, uri, Some("payer@dompet.test"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["type"], "validation");
    }
}

#[tokio::test]
async fn order_flows_from_checkout_to_completion() {
    let (app, engine) = setup().await;
    let (_buyer, _wallet) = funded_user(&engine, "budi", 10_000).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/public/merchants",
        None,
        Some(json!({
            "name": "Sari",
            "email": "sari@dompet.test",
            "password": PASSWORD,
            "merchant_name": "Warung Sari",
            "location": "Jl. Sudirman 1",
            "phone": "0811111111",
            "open_hour": "08:00",
            "close_hour": "21:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let merchant_id = body["data"]["id"].as_i64().unwrap();

    let menu_uri = format!("/api/v1/merchants/{merchant_id}/menu-items");
    let mut item_ids = Vec::new();
    for (name, price, category) in [("Nasi Goreng", 10.0, "main_course"), ("Es Teh", 5.0, "drink")]
    {
        let (status, body) = call(
            &app,
            Method::POST,
            &menu_uri,
            Some("sari@dompet.test"),
            Some(json!({"name": name, "price": price, "category": category})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        item_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/public/drivers",
        None,
        Some(json!({
            "name": "Dodi",
            "email": "dodi@dompet.test",
            "password": PASSWORD,
            "license_number": "SIM-001",
            "vehicle_plate": "B 1234 XY",
            "vehicle_type": "motorcycle"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    engine
        .verify_driver(body["data"]["id"].as_i64().unwrap(), true)
        .await
        .unwrap();
    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/drivers/status",
        Some("dodi@dompet.test"),
        Some(json!({"status": "online"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/orders",
        Some("budi@dompet.test"),
        Some(json!({
            "merchant_id": merchant_id,
            "delivery_address": "Jl. Thamrin 2",
            "items": [
                {"menu_item_id": item_ids[0], "quantity": 2},
                {"menu_item_id": item_ids[1], "quantity": 1, "notes": "less sugar"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_amount"], 31.78);
    assert_eq!(body["data"]["delivery_fee"], 6.78);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    let order_id = body["data"]["id"].as_i64().unwrap();
    let tx_id = body["data"]["transaction_id"].as_i64().unwrap();

    let status_uri = format!("/api/v1/orders/{order_id}/status");
    let (status, body) = call(
        &app,
        Method::PUT,
        &status_uri,
        Some("dodi@dompet.test"),
        Some(json!({"status": "delivery"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_STATUS_TRANSITION");

    for (who, next) in [
        ("sari@dompet.test", "confirmed"),
        ("sari@dompet.test", "cooking"),
        ("sari@dompet.test", "ready"),
        ("dodi@dompet.test", "delivery"),
        ("dodi@dompet.test", "completed"),
    ] {
        let (status, body) = call(
            &app,
            Method::PUT,
            &status_uri,
            Some(who),
            Some(json!({"status": next})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{who} -> {next}");
        assert_eq!(body["data"]["status"], next);
    }

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/transactions/{tx_id}"),
        Some("budi@dompet.test"),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["service_type"], "food");
    assert_eq!(body["data"]["service_id"], order_id);

    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/drivers/profile",
        Some("dodi@dompet.test"),
        None,
    )
    .await;
    assert_eq!(body["data"]["status"], "online");

    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/orders",
        Some("budi@dompet.test"),
        None,
    )
    .await;
    assert_eq!(body["data"][0]["id"], order_id);
}

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{ServerError, accounts, drivers, merchants, ok, orders, qr, transactions, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Basic auth against the users table. The authenticated [`engine::User`] is
/// stored as a request extension for the handlers.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(ServerError::Unauthorized);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(ServerError::Unauthorized);
    }

    let user = state
        .engine
        .authenticate(auth_header.username(), auth_header.password())
        .await?;
    let Some(user) = user else {
        tracing::warn!("rejected credentials for {}", auth_header.username());
        return Err(ServerError::Unauthorized);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn health() -> crate::ApiResult<()> {
    ok("ok", ())
}

fn router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/public/users", post(users::sign_up))
        .route("/public/merchants", post(merchants::sign_up))
        .route("/public/drivers", post(drivers::sign_up));

    let protected = Router::new()
        .route("/users/me", get(users::me).put(users::update_me))
        .route("/users/me/accounts", get(accounts::list))
        .route("/accounts/{id}", get(accounts::get).put(accounts::rename))
        .route("/accounts/{id}/balance", get(accounts::balance))
        .route("/accounts/{id}/transactions", get(transactions::list))
        .route("/transactions", post(transactions::create))
        .route(
            "/transactions/{id}",
            get(transactions::get).patch(transactions::update),
        )
        .route("/qr", post(qr::create))
        .route("/qr/{id}", get(qr::get).put(qr::scan))
        .route("/orders", post(orders::create).get(orders::list))
        .route("/orders/{id}", get(orders::get))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/merchants", get(merchants::list))
        .route("/merchants/{id}", get(merchants::get).put(merchants::update))
        .route(
            "/merchants/{id}/menu-items",
            get(merchants::list_menu).post(merchants::add_menu_item),
        )
        .route(
            "/merchants/{id}/menu-items/{menu_id}",
            put(merchants::update_menu_item).delete(merchants::delete_menu_item),
        )
        .route("/drivers/available", get(drivers::available))
        .route(
            "/drivers/profile",
            get(drivers::profile).put(drivers::update_profile),
        )
        .route("/drivers/status", put(drivers::update_status))
        .route("/drivers/location", put(drivers::update_location))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .with_state(state)
}

/// The full application router, ready to be served or driven in tests.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

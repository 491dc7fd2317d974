//! Merchant signup, profile and menu management.

use api_types::merchant::{
    MenuItemNew, MenuItemUpdate, MenuItemView, MerchantDetailView, MerchantSignUp, MerchantUpdate,
    MerchantView,
};
use axum::{Extension, extract::State};
use engine::{
    MenuCategory, MoneyCents, NewMenuItemCmd, NewMerchantCmd, NewUserCmd, UpdateMenuItemCmd,
    UpdateMerchantCmd, User,
};

use crate::{ApiResult, Body, PathParam, created, ok, server::ServerState, views};

pub async fn sign_up(
    State(state): State<ServerState>,
    Body(payload): Body<MerchantSignUp>,
) -> ApiResult<MerchantView> {
    let user = NewUserCmd::new(payload.name, payload.email, payload.password)
        .phone(payload.phone.clone());
    let mut cmd = NewMerchantCmd::new(
        user,
        payload.merchant_name,
        payload.location,
        payload.phone,
        payload.open_hour,
        payload.close_hour,
    );
    cmd.description = payload.description;
    cmd.logo_url = payload.logo_url;
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }

    let merchant = state.engine.create_merchant(cmd).await?;
    created("Merchant registered", views::merchant(merchant))
}

pub async fn list(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
) -> ApiResult<Vec<MerchantView>> {
    let merchants = state.engine.list_merchants().await?;
    ok(
        "Merchants",
        merchants.into_iter().map(views::merchant).collect(),
    )
}

pub async fn get(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<MerchantDetailView> {
    let detail = state.engine.get_merchant(id).await?;
    ok("Merchant", views::merchant_detail(detail))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<MerchantUpdate>,
) -> ApiResult<MerchantView> {
    let cmd = UpdateMerchantCmd {
        user_id: user.id,
        merchant_id: id,
        name: payload.merchant_name,
        description: payload.description,
        location: payload.location,
        phone: payload.phone,
        category: payload.category,
        open_hour: payload.open_hour,
        close_hour: payload.close_hour,
        logo_url: payload.logo_url,
    };
    let merchant = state.engine.update_merchant(cmd).await?;
    ok("Merchant updated", views::merchant(merchant))
}

pub async fn list_menu(
    Extension(_user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<Vec<MenuItemView>> {
    let items = state.engine.list_menu_items(id).await?;
    ok("Menu items", items.into_iter().map(views::menu_item).collect())
}

pub async fn add_menu_item(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam(id): PathParam<i64>,
    Body(payload): Body<MenuItemNew>,
) -> ApiResult<MenuItemView> {
    let price = MoneyCents::from_major(payload.price)?;
    let category = MenuCategory::try_from(payload.category.as_str())?;
    let mut cmd = NewMenuItemCmd::new(user.id, id, payload.name, price, category)
        .available(payload.is_available.unwrap_or(true));
    cmd.description = payload.description;
    cmd.image_url = payload.image_url;

    let item = state.engine.create_menu_item(cmd).await?;
    created("Menu item created", views::menu_item(item))
}

pub async fn update_menu_item(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam((id, menu_id)): PathParam<(i64, i64)>,
    Body(payload): Body<MenuItemUpdate>,
) -> ApiResult<MenuItemView> {
    let mut cmd = UpdateMenuItemCmd::new(user.id, id, menu_id);
    cmd.name = payload.name;
    cmd.description = payload.description;
    cmd.image_url = payload.image_url;
    cmd.is_available = payload.is_available;
    if let Some(price) = payload.price {
        cmd.price = Some(MoneyCents::from_major(price)?);
    }
    if let Some(category) = payload.category.as_deref() {
        cmd.category = Some(MenuCategory::try_from(category)?);
    }

    let item = state.engine.update_menu_item(cmd).await?;
    ok("Menu item updated", views::menu_item(item))
}

pub async fn delete_menu_item(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    PathParam((id, menu_id)): PathParam<(i64, i64)>,
) -> ApiResult<()> {
    state.engine.delete_menu_item(user.id, id, menu_id).await?;
    ok("Menu item deleted", ())
}

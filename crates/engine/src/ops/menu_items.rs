use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, MenuItem, NewMenuItemCmd, ResultEngine, UpdateMenuItemCmd, menu_items,
    util::{ensure_positive, normalize_optional_text, normalize_required_text},
};

use super::Engine;

impl Engine {
    async fn require_menu_item<C: ConnectionTrait>(
        &self,
        db: &C,
        merchant_id: i64,
        menu_item_id: i64,
    ) -> ResultEngine<menu_items::Model> {
        menu_items::Entity::find_by_id(menu_item_id)
            .filter(menu_items::Column::MerchantId.eq(merchant_id))
            .one(db)
            .await?
            .ok_or(EngineError::MenuItemNotFound)
    }

    pub async fn create_menu_item(&self, cmd: NewMenuItemCmd) -> ResultEngine<MenuItem> {
        let name = normalize_required_text(&cmd.name, "menu name")?;
        ensure_positive(cmd.price, "price")?;
        self.require_owned_merchant(&self.database, cmd.merchant_id, cmd.user_id)
            .await?;

        let model = menu_items::ActiveModel {
            id: ActiveValue::NotSet,
            merchant_id: ActiveValue::Set(cmd.merchant_id),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(normalize_optional_text(cmd.description.as_deref())),
            price: ActiveValue::Set(cmd.price.cents()),
            category: ActiveValue::Set(cmd.category.as_str().to_string()),
            is_available: ActiveValue::Set(cmd.is_available),
            total_sold: ActiveValue::Set(0),
            image_url: ActiveValue::Set(normalize_optional_text(cmd.image_url.as_deref())),
            rating: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(&self.database)
        .await?;
        MenuItem::try_from(model)
    }

    /// Menu of a merchant, grouped by category then name.
    pub async fn list_menu_items(&self, merchant_id: i64) -> ResultEngine<Vec<MenuItem>> {
        self.require_merchant(&self.database, merchant_id).await?;
        menu_items::Entity::find()
            .filter(menu_items::Column::MerchantId.eq(merchant_id))
            .order_by_asc(menu_items::Column::Category)
            .order_by_asc(menu_items::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(MenuItem::try_from)
            .collect()
    }

    pub async fn get_menu_item(&self, merchant_id: i64, menu_item_id: i64) -> ResultEngine<MenuItem> {
        let model = self
            .require_menu_item(&self.database, merchant_id, menu_item_id)
            .await?;
        MenuItem::try_from(model)
    }

    pub async fn update_menu_item(&self, cmd: UpdateMenuItemCmd) -> ResultEngine<MenuItem> {
        self.require_owned_merchant(&self.database, cmd.merchant_id, cmd.user_id)
            .await?;
        let model = self
            .require_menu_item(&self.database, cmd.merchant_id, cmd.menu_item_id)
            .await?;

        let mut active: menu_items::ActiveModel = model.into();
        if let Some(name) = cmd.name {
            active.name = ActiveValue::Set(normalize_required_text(&name, "menu name")?);
        }
        if let Some(description) = cmd.description {
            active.description = ActiveValue::Set(normalize_optional_text(Some(&description)));
        }
        if let Some(price) = cmd.price {
            ensure_positive(price, "price")?;
            active.price = ActiveValue::Set(price.cents());
        }
        if let Some(category) = cmd.category {
            active.category = ActiveValue::Set(category.as_str().to_string());
        }
        if let Some(is_available) = cmd.is_available {
            active.is_available = ActiveValue::Set(is_available);
        }
        if let Some(image_url) = cmd.image_url {
            active.image_url = ActiveValue::Set(normalize_optional_text(Some(&image_url)));
        }
        let model = active.update(&self.database).await?;
        MenuItem::try_from(model)
    }

    pub async fn delete_menu_item(
        &self,
        user_id: i64,
        merchant_id: i64,
        menu_item_id: i64,
    ) -> ResultEngine<()> {
        self.require_owned_merchant(&self.database, merchant_id, user_id)
            .await?;
        let model = self
            .require_menu_item(&self.database, merchant_id, menu_item_id)
            .await?;
        menu_items::Entity::delete_by_id(model.id)
            .exec(&self.database)
            .await?;
        tracing::info!(merchant_id, menu_item_id, "menu item deleted");
        Ok(())
    }
}

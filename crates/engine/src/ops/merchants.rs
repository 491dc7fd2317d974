use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    MenuItem, Merchant, MerchantDetail, NewMerchantCmd, ResultEngine, UpdateMerchantCmd,
    menu_items, merchants,
    util::{
        normalize_optional_text, normalize_required_text, validate_opening_hours, validate_phone,
    },
};

use super::Engine;

/// Number of best sellers shown on a merchant page.
const TOP_MENU_ITEMS: u64 = 5;

impl Engine {
    /// Register a merchant user and its profile in one unit.
    pub async fn create_merchant(&self, cmd: NewMerchantCmd) -> ResultEngine<Merchant> {
        let NewMerchantCmd {
            user,
            name,
            description,
            location,
            phone,
            category,
            open_hour,
            close_hour,
            logo_url,
        } = cmd;
        let name = normalize_required_text(&name, "merchant name")?;
        let location = normalize_required_text(&location, "location")?;
        let phone = validate_phone(&phone)?;
        let category = normalize_required_text(&category, "category")?;
        validate_opening_hours(&open_hour, &close_hour)?;

        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let now = Utc::now();
                    let user = engine.insert_user(db_tx, user, now).await?;
                    let model = merchants::ActiveModel {
                        id: ActiveValue::NotSet,
                        user_id: ActiveValue::Set(user.id),
                        merchant_name: ActiveValue::Set(name),
                        description: ActiveValue::Set(normalize_optional_text(
                            description.as_deref(),
                        )),
                        location: ActiveValue::Set(location),
                        phone: ActiveValue::Set(phone),
                        category: ActiveValue::Set(category),
                        open_hour: ActiveValue::Set(open_hour.trim().to_string()),
                        close_hour: ActiveValue::Set(close_hour.trim().to_string()),
                        rating: ActiveValue::Set(0.0),
                        logo_url: ActiveValue::Set(normalize_optional_text(logo_url.as_deref())),
                        created_at: ActiveValue::Set(now),
                    }
                    .insert(db_tx)
                    .await?;
                    Ok(model)
                })
            })
            .await?;
        tracing::info!(merchant_id = model.id, user_id = model.user_id, "merchant created");
        Merchant::try_from(model)
    }

    pub async fn list_merchants(&self) -> ResultEngine<Vec<Merchant>> {
        merchants::Entity::find()
            .order_by_asc(merchants::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Merchant::try_from)
            .collect()
    }

    /// Merchant profile with its best-selling available menu items.
    pub async fn get_merchant(&self, merchant_id: i64) -> ResultEngine<MerchantDetail> {
        let model = self.require_merchant(&self.database, merchant_id).await?;
        let top_items = menu_items::Entity::find()
            .filter(menu_items::Column::MerchantId.eq(merchant_id))
            .filter(menu_items::Column::IsAvailable.eq(true))
            .order_by_desc(menu_items::Column::TotalSold)
            .order_by_asc(menu_items::Column::Id)
            .limit(TOP_MENU_ITEMS)
            .all(&self.database)
            .await?
            .into_iter()
            .map(MenuItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(MerchantDetail {
            merchant: Merchant::try_from(model)?,
            top_items,
        })
    }

    pub async fn update_merchant(&self, cmd: UpdateMerchantCmd) -> ResultEngine<Merchant> {
        let model = self
            .require_owned_merchant(&self.database, cmd.merchant_id, cmd.user_id)
            .await?;
        let open_hour = cmd.open_hour.as_deref().unwrap_or(&model.open_hour).to_string();
        let close_hour = cmd
            .close_hour
            .as_deref()
            .unwrap_or(&model.close_hour)
            .to_string();
        validate_opening_hours(&open_hour, &close_hour)?;

        let mut active: merchants::ActiveModel = model.into();
        if let Some(name) = cmd.name {
            active.merchant_name = ActiveValue::Set(normalize_required_text(&name, "merchant name")?);
        }
        if let Some(description) = cmd.description {
            active.description = ActiveValue::Set(normalize_optional_text(Some(&description)));
        }
        if let Some(location) = cmd.location {
            active.location = ActiveValue::Set(normalize_required_text(&location, "location")?);
        }
        if let Some(phone) = cmd.phone {
            active.phone = ActiveValue::Set(validate_phone(&phone)?);
        }
        if let Some(category) = cmd.category {
            active.category = ActiveValue::Set(normalize_required_text(&category, "category")?);
        }
        if cmd.open_hour.is_some() || cmd.close_hour.is_some() {
            active.open_hour = ActiveValue::Set(open_hour.trim().to_string());
            active.close_hour = ActiveValue::Set(close_hour.trim().to_string());
        }
        if let Some(logo_url) = cmd.logo_url {
            active.logo_url = ActiveValue::Set(normalize_optional_text(Some(&logo_url)));
        }
        let model = active.update(&self.database).await?;
        Merchant::try_from(model)
    }
}

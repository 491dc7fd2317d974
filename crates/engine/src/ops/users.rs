use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, prelude::*};

use crate::{
    AccountType, EngineError, MoneyCents, NewUserCmd, ResultEngine, UpdateUserCmd, User,
    accounts, users,
    util::{
        normalize_email, normalize_optional_text, normalize_required_text, validate_password,
        validate_phone,
    },
};

use super::Engine;

impl Engine {
    /// Register a user together with its `main_balance` and `points` accounts.
    pub async fn create_user(&self, cmd: NewUserCmd) -> ResultEngine<User> {
        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move { engine.insert_user(db_tx, cmd, Utc::now()).await })
            })
            .await?;
        tracing::info!(user_id = model.id, kind = %model.kind, "user created");
        User::try_from(model)
    }

    pub(super) async fn insert_user(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: NewUserCmd,
        now: DateTime<Utc>,
    ) -> ResultEngine<users::Model> {
        let name = normalize_required_text(&cmd.name, "name")?;
        let email = normalize_email(&cmd.email)?;
        validate_password(&cmd.password)?;
        let phone = cmd.phone.as_deref().map(validate_phone).transpose()?;
        if cmd.opening_balance.is_negative() {
            return Err(EngineError::InvalidAmount(
                "opening balance must be >= 0".to_string(),
            ));
        }

        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(db_tx)
            .await?;
        if taken.is_some() {
            return Err(EngineError::ExistingKey(email));
        }

        let user = users::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            password: ActiveValue::Set(cmd.password),
            phone: ActiveValue::Set(phone),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            profile_picture_url: ActiveValue::Set(normalize_optional_text(
                cmd.profile_picture_url.as_deref(),
            )),
            created_at: ActiveValue::Set(now),
        }
        .insert(db_tx)
        .await?;

        for (account_type, name, balance) in [
            (AccountType::MainBalance, "main wallet", cmd.opening_balance),
            (AccountType::Points, "points", MoneyCents::ZERO),
        ] {
            accounts::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name.to_string()),
                balance: ActiveValue::Set(balance.cents()),
                user_id: ActiveValue::Set(user.id),
                account_type: ActiveValue::Set(account_type.as_str().to_string()),
                created_at: ActiveValue::Set(now),
            }
            .insert(db_tx)
            .await?;
        }
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> ResultEngine<Option<User>> {
        let email = email.trim().to_lowercase();
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.database)
            .await?;
        match model {
            Some(model) if model.password == password => Ok(Some(User::try_from(model)?)),
            _ => Ok(None),
        }
    }

    pub async fn get_user(&self, user_id: i64) -> ResultEngine<User> {
        let model = self.require_user(&self.database, user_id).await?;
        User::try_from(model)
    }

    pub async fn update_user(&self, cmd: UpdateUserCmd) -> ResultEngine<User> {
        let UpdateUserCmd {
            user_id,
            name,
            phone,
            profile_picture_url,
            password,
        } = cmd;
        let model = self
            .with_tx(|engine, db_tx| {
                Box::pin(async move {
                    let model = engine.require_user(db_tx, user_id).await?;
                    let mut active: users::ActiveModel = model.into();
                    if let Some(name) = name {
                        active.name = ActiveValue::Set(normalize_required_text(&name, "name")?);
                    }
                    if let Some(phone) = phone {
                        active.phone = ActiveValue::Set(Some(validate_phone(&phone)?));
                    }
                    if let Some(url) = profile_picture_url {
                        active.profile_picture_url =
                            ActiveValue::Set(normalize_optional_text(Some(&url)));
                    }
                    if let Some(password) = password {
                        validate_password(&password)?;
                        active.password = ActiveValue::Set(password);
                    }
                    Ok(active.update(db_tx).await?)
                })
            })
            .await?;
        User::try_from(model)
    }
}

//! User repository - persistence for the user aggregate.
//!
//! The trait is the narrow interface the core consumes; the sea-orm
//! implementation translates the storage layer's own conflict signal
//! (unique-constraint violation on phone_number) into the domain's
//! `PhoneAlreadyExists`. Everything else passes through opaquely,
//! logged here at the storage boundary.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{ActiveModel, Column, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Storage owns the user records; the core never caches them beyond a
/// single request.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user with a freshly generated identifier.
    /// A phone-number conflict surfaces as `PhoneAlreadyExists`.
    async fn create(
        &self,
        full_name: String,
        phone_number: String,
        password_hash: String,
    ) -> AppResult<User>;

    /// Fetch a user by identifier; absent → `NotFound`
    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Fetch a user by phone number; absent → `NotFound`
    async fn get_by_phone(&self, phone_number: &str) -> AppResult<User>;

    /// Partial update: only the supplied fields are persisted,
    /// unspecified columns are left untouched
    async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> AppResult<()>;

    /// Increment the user's login counter by 1.
    /// Callers treat failure as best-effort (see the auth usecase).
    async fn increment_login_count(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by sea-orm.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create a new UserStore instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(
        &self,
        full_name: String,
        phone_number: String,
        password_hash: String,
    ) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(full_name),
            phone_number: Set(phone_number),
            password_hash: Set(password_hash),
            login_count: Set(0),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::PhoneAlreadyExists
            } else {
                tracing::error!("user create failed: {}", e);
                AppError::from(e)
            }
        })?;

        Ok(User::from(model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("user lookup by id failed: {}", e);
                AppError::from(e)
            })?;

        model.map(User::from).ok_or(AppError::NotFound)
    }

    async fn get_by_phone(&self, phone_number: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::PhoneNumber.eq(phone_number))
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("user lookup by phone failed: {}", e);
                AppError::from(e)
            })?;

        model.map(User::from).ok_or(AppError::NotFound)
    }

    async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> AppResult<()> {
        let mut active_model = ActiveModel {
            id: Set(id),
            full_name: NotSet,
            phone_number: NotSet,
            password_hash: NotSet,
            login_count: NotSet,
            created_at: NotSet,
            updated_at: Set(Some(Utc::now())),
        };

        if let Some(full_name) = full_name {
            active_model.full_name = Set(full_name);
        }
        if let Some(phone_number) = phone_number {
            active_model.phone_number = Set(phone_number);
        }

        active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound,
            _ => {
                tracing::error!("user update failed: {}", e);
                AppError::from(e)
            }
        })?;

        Ok(())
    }

    async fn increment_login_count(&self, id: Uuid) -> AppResult<()> {
        UserEntity::update_many()
            .col_expr(
                Column::LoginCount,
                Expr::col(Column::LoginCount).add(1),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("login count increment failed: {}", e);
                AppError::from(e)
            })?;

        Ok(())
    }
}

//! Authentication service - the account business flows.
//!
//! Orchestrates the field validators, the password hasher, and the token
//! service over the user repository. Holds no cross-request state; the
//! repository is the only persistent substrate.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_full_name, validate_password, validate_phone, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;
use crate::services::token_service::{AccessToken, TokenService};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(
        &self,
        full_name: String,
        phone_number: String,
        password: String,
    ) -> AppResult<User>;

    /// Verify credentials and issue an access token
    async fn login(&self, phone_number: &str, password: &str) -> AppResult<(User, AccessToken)>;

    /// Fetch a user profile by identifier
    async fn get_profile(&self, user_id: Uuid) -> AppResult<User>;

    /// Partial profile update: absent fields keep their stored values
    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> AppResult<()>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        full_name: String,
        phone_number: String,
        password: String,
    ) -> AppResult<User> {
        // Password before phone; first violation wins
        validate_password(&password)?;
        validate_phone(&phone_number)?;

        let password_hash = Password::new(&password)?.into_string();

        // The repository enforces phone uniqueness and translates its
        // conflict signal into PhoneAlreadyExists
        self.users
            .create(full_name, phone_number, password_hash)
            .await
    }

    async fn login(&self, phone_number: &str, password: &str) -> AppResult<(User, AccessToken)> {
        let user = self.users.get_by_phone(phone_number).await?;

        if !Password::from_hash(user.password_hash.clone()).verify(password) {
            return Err(AppError::InvalidPassword);
        }

        let token = self.tokens.issue(user.id)?;

        // Best-effort: a failed counter update never fails the login,
        // but the discarded error stays observable
        if let Err(e) = self.users.increment_login_count(user.id).await {
            tracing::warn!(user_id = %user.id, error = %e, "failed to increment login count");
        }

        Ok((user, token))
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<User> {
        self.users.get_by_id(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
        phone_number: Option<String>,
    ) -> AppResult<()> {
        // Empty strings are treated as absent: this is a partial-update
        // contract, not "empty string is invalid"
        let full_name = full_name.filter(|s| !s.is_empty());
        let phone_number = phone_number.filter(|s| !s.is_empty());

        // Phone before full name; only supplied fields are validated
        if let Some(phone) = &phone_number {
            validate_phone(phone)?;
        }
        if let Some(name) = &full_name {
            validate_full_name(name)?;
        }

        // Lookup-then-act duplicate detection; "not found" is the success
        // path, and a phone already owned by the caller is not a conflict
        if let Some(phone) = &phone_number {
            match self.users.get_by_phone(phone).await {
                Ok(existing) if existing.id == user_id => {}
                Ok(_) => return Err(AppError::PhoneAlreadyExists),
                Err(AppError::NotFound) => {}
                Err(e) => return Err(e),
            }
        }

        self.users.update(user_id, full_name, phone_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use std::time::Duration;

    use crate::infra::repositories::MockUserRepository;
    use crate::services::token_service::MockTokenService;

    const PHONE: &str = "+628123456789";
    const PASSWORD: &str = "5awitPro!";

    fn sample_user(id: Uuid, phone: &str, password: &str) -> User {
        User {
            id,
            full_name: "John Smith".to_string(),
            phone_number: phone.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            login_count: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn sample_token() -> AccessToken {
        AccessToken {
            value: "signed.token.value".to_string(),
            lifetime: Duration::from_secs(3600),
        }
    }

    fn authenticator(
        users: MockUserRepository,
        tokens: MockTokenService,
    ) -> Authenticator {
        Authenticator::new(Arc::new(users), Arc::new(tokens))
    }

    #[tokio::test]
    async fn register_creates_user_with_hashed_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|name, phone, hash| {
                name == "John Smith"
                    && phone == PHONE
                    && !hash.is_empty()
                    && hash != PASSWORD
                    && Password::from_hash(hash.clone()).verify(PASSWORD)
            })
            .returning(|name, phone, hash| {
                Ok(User {
                    id: Uuid::new_v4(),
                    full_name: name,
                    phone_number: phone,
                    password_hash: hash,
                    login_count: 0,
                    created_at: Utc::now(),
                    updated_at: None,
                })
            });

        let service = authenticator(users, MockTokenService::new());
        let user = service
            .register(
                "John Smith".to_string(),
                PHONE.to_string(),
                PASSWORD.to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.full_name, "John Smith");
        assert_eq!(user.phone_number, PHONE);
    }

    #[tokio::test]
    async fn register_weak_password_short_circuits_before_storage() {
        // No expectations: any storage call would panic the test
        let users = MockUserRepository::new();
        let service = authenticator(users, MockTokenService::new());

        let err = service
            .register("John Smith".to_string(), PHONE.to_string(), "weak".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PasswordLength));
    }

    #[tokio::test]
    async fn register_validates_password_before_phone() {
        let users = MockUserRepository::new();
        let service = authenticator(users, MockTokenService::new());

        // Both fields invalid: the password error must surface first
        let err = service
            .register("John Smith".to_string(), "12345".to_string(), "weak".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PasswordLength));
    }

    #[tokio::test]
    async fn register_rejects_ineligible_phone() {
        let users = MockUserRepository::new();
        let service = authenticator(users, MockTokenService::new());

        let err = service
            .register(
                "John Smith".to_string(),
                "+18123456789".to_string(),
                PASSWORD.to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IneligiblePhone));
    }

    #[tokio::test]
    async fn register_translates_phone_conflict() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|_, _, _| Err(AppError::PhoneAlreadyExists));

        let service = authenticator(users, MockTokenService::new());
        let err = service
            .register(
                "John Smith".to_string(),
                PHONE.to_string(),
                PASSWORD.to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PhoneAlreadyExists));
    }

    #[tokio::test]
    async fn login_issues_token_and_increments_counter() {
        let user_id = Uuid::new_v4();
        let user = sample_user(user_id, PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        let fetched = user.clone();
        users
            .expect_get_by_phone()
            .with(eq(PHONE))
            .returning(move |_| Ok(fetched.clone()));
        users
            .expect_increment_login_count()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .with(eq(user_id))
            .returning(|_| Ok(sample_token()));

        let service = authenticator(users, tokens);
        let (logged_in, token) = service.login(PHONE, PASSWORD).await.unwrap();

        assert_eq!(logged_in.id, user_id);
        assert_eq!(token.value, "signed.token.value");
    }

    #[tokio::test]
    async fn login_wrong_password_yields_no_token() {
        let user = sample_user(Uuid::new_v4(), PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(move |_| Ok(user.clone()));

        // No issue expectation: issuing a token here would panic the test
        let tokens = MockTokenService::new();

        let service = authenticator(users, tokens);
        let err = service.login(PHONE, "WrongPass1!").await.unwrap_err();

        assert!(matches!(err, AppError::InvalidPassword));
    }

    #[tokio::test]
    async fn login_unknown_phone_fails_with_not_found() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(|_| Err(AppError::NotFound));

        let service = authenticator(users, MockTokenService::new());
        let err = service.login(PHONE, PASSWORD).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn login_survives_counter_failure() {
        let user_id = Uuid::new_v4();
        let user = sample_user(user_id, PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(move |_| Ok(user.clone()));
        users
            .expect_increment_login_count()
            .returning(|_| Err(AppError::internal("counter unavailable")));

        let mut tokens = MockTokenService::new();
        tokens.expect_issue().returning(|_| Ok(sample_token()));

        let service = authenticator(users, tokens);
        let (logged_in, token) = service.login(PHONE, PASSWORD).await.unwrap();

        assert_eq!(logged_in.id, user_id);
        assert!(!token.value.is_empty());
    }

    #[tokio::test]
    async fn get_profile_propagates_storage_result() {
        let user_id = Uuid::new_v4();
        let user = sample_user(user_id, PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(user.clone()));

        let service = authenticator(users, MockTokenService::new());
        let profile = service.get_profile(user_id).await.unwrap();

        assert_eq!(profile.id, user_id);
        assert_eq!(profile.phone_number, PHONE);
    }

    #[tokio::test]
    async fn update_name_only_skips_phone_lookup() {
        let user_id = Uuid::new_v4();

        // No get_by_phone expectation: a uniqueness check would panic
        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(move |id, name, phone| {
                *id == user_id
                    && name.as_deref() == Some("Jane Smith")
                    && phone.is_none()
            })
            .returning(|_, _, _| Ok(()));

        let service = authenticator(users, MockTokenService::new());
        service
            .update_profile(user_id, Some("Jane Smith".to_string()), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_to_foreign_phone_conflicts() {
        let user_id = Uuid::new_v4();
        let other = sample_user(Uuid::new_v4(), PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .with(eq(PHONE))
            .returning(move |_| Ok(other.clone()));

        let service = authenticator(users, MockTokenService::new());
        let err = service
            .update_profile(user_id, None, Some(PHONE.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PhoneAlreadyExists));
    }

    #[tokio::test]
    async fn update_to_own_phone_is_not_a_conflict() {
        let user_id = Uuid::new_v4();
        let own = sample_user(user_id, PHONE, PASSWORD);

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(move |_| Ok(own.clone()));
        users
            .expect_update()
            .returning(|_, _, _| Ok(()));

        let service = authenticator(users, MockTokenService::new());
        service
            .update_profile(user_id, None, Some(PHONE.to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_unclaimed_phone_proceeds() {
        let user_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(|_| Err(AppError::NotFound));
        users
            .expect_update()
            .withf(move |id, name, phone| {
                *id == user_id && name.is_none() && phone.as_deref() == Some(PHONE)
            })
            .returning(|_, _, _| Ok(()));

        let service = authenticator(users, MockTokenService::new());
        service
            .update_profile(user_id, None, Some(PHONE.to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_propagates_non_not_found_lookup_errors() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_phone()
            .returning(|_| Err(AppError::internal("storage down")));

        let service = authenticator(users, MockTokenService::new());
        let err = service
            .update_profile(Uuid::new_v4(), None, Some(PHONE.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn update_validates_phone_before_full_name() {
        let users = MockUserRepository::new();
        let service = authenticator(users, MockTokenService::new());

        // Both supplied fields invalid: the phone error must surface first
        let err = service
            .update_profile(
                Uuid::new_v4(),
                Some("ab".to_string()),
                Some("12345".to_string()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::IneligiblePhone));
    }

    #[tokio::test]
    async fn update_rejects_short_full_name() {
        let users = MockUserRepository::new();
        let service = authenticator(users, MockTokenService::new());

        let err = service
            .update_profile(Uuid::new_v4(), Some("ab".to_string()), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FullNameLength));
    }

    #[tokio::test]
    async fn update_treats_empty_strings_as_absent() {
        let user_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_update()
            .withf(|_, name, phone| name.is_none() && phone.is_none())
            .returning(|_, _, _| Ok(()));

        let service = authenticator(users, MockTokenService::new());
        service
            .update_profile(user_id, Some(String::new()), Some(String::new()))
            .await
            .unwrap();
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::Order;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::OrderClient;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, OC>
where
    UR: UserRepository,
    OC: OrderClient,
{
    repository: Arc<UR>,
    order_client: Arc<OC>,
    authenticator: Arc<Authenticator>,
}

impl<UR, OC> UserService<UR, OC>
where
    UR: UserRepository,
    OC: OrderClient,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `order_client` - Downstream order service client
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(
        repository: Arc<UR>,
        order_client: Arc<OC>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            order_client,
            authenticator,
        }
    }

    async fn find_user(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFoundByUsername(username.to_string()))
    }
}

#[async_trait]
impl<UR, OC> UserServicePort for UserService<UR, OC>
where
    UR: UserRepository,
    OC: OrderClient,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;

        Ok(created_user.id)
    }

    async fn login(&self, command: LoginUserCommand) -> Result<String, UserError> {
        let user = match self.repository.find_by_username(&command.username).await? {
            Some(user) => user,
            None => {
                self.authenticator.verify_unknown_user(&command.password);
                return Err(UserError::InvalidCredentials);
            }
        };

        // iat is the account creation time, expiry counts from now
        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                &user.id.to_string(),
                user.created_at,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => UserError::Password(err),
                AuthenticationError::TokenError(err) => UserError::Token(err),
            })?;

        Ok(result.access_token)
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<UserView, UserError> {
        self.find_user(username).await.map(UserView::from)
    }

    async fn get_order_by_username(&self, username: &Username) -> Result<Order, UserError> {
        let user = self.find_user(username).await?;

        Ok(self.order_client.fetch_order(&user.username).await?)
    }
}

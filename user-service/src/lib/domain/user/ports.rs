use async_trait::async_trait;

use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::Order;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::user::errors::OrderError;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Normalized username and plaintext password
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserId, UserError>;

    /// Exchange credentials for a signed access token.
    ///
    /// Unknown usernames and wrong passwords fail the same way.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Username unknown or password mismatch
    /// * `Token` - Token configuration missing or signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginUserCommand) -> Result<String, UserError>;

    /// Retrieve the public view of a user by username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<UserView, UserError>;

    /// Fetch the order belonging to a user from the order service.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `Order` - Order service unreachable or replied with an error
    /// * `DatabaseError` - Database operation failed
    async fn get_order_by_username(&self, username: &Username) -> Result<Order, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}

/// Client for the downstream order service.
#[async_trait]
pub trait OrderClient: Send + Sync + 'static {
    /// Fetch the order for a username.
    ///
    /// # Errors
    /// * `RequestFailed` - Transport failure or timeout
    /// * `UnexpectedStatus` - Non-200 reply
    /// * `InvalidResponse` - Body is not an order
    async fn fetch_order(&self, username: &Username) -> Result<Order, OrderError>;
}

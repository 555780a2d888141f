use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Command to register a new email/password user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: String,
    pub full_name: Option<String>,
}

impl RegisterUserCommand {
    /// Construct a new register user command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service)
    /// * `full_name` - Optional display name
    pub fn new(email: EmailAddress, password: String, full_name: Option<String>) -> Self {
        Self {
            email,
            password,
            full_name,
        }
    }
}

/// Result of a successful login: the authenticated user and a bearer token
/// proving it on subsequent requests.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
}

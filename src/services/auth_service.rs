//! Authentication service: registration, login and token refresh.
//!
//! Passwords are hashed with Argon2id before they reach the repository.
//! Login failures never reveal whether the email or the password was
//! wrong; both cases answer "Invalid credentials".

use crate::api::dto::{LoginRequest, RegisterRequest};
use crate::config::JwtSettings;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserRepo;
use crate::utils::{hash_password, sign_token, verify_password};

/// A freshly issued bearer token with its lifetime in seconds.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Authentication service wrapping the user repository and JWT settings.
///
/// Cloning is cheap: the repository holds a pooled connection handle and
/// the JWT settings are a small owned struct.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepo,
    jwt: JwtSettings,
}

impl AuthService {
    pub fn new(users: UserRepo, jwt: JwtSettings) -> Self {
        Self { users, jwt }
    }

    /// Registers a new account.
    ///
    /// The payload has already passed field validation; a duplicate email
    /// surfaces from the unique constraint as `AppError::Duplicate`.
    pub async fn register(&self, payload: RegisterRequest) -> AppResult<User> {
        let name = payload
            .name
            .ok_or_else(|| AppError::invalid_field("name", "The name field is required."))?;
        let email = payload
            .email
            .ok_or_else(|| AppError::invalid_field("email", "The email field is required."))?;
        let password = payload
            .password
            .ok_or_else(|| AppError::invalid_field("password", "The password field is required."))?;

        let password = hash_password(&password)?;
        self.users
            .create(NewUser {
                name,
                email,
                password,
            })
            .await
    }

    /// Authenticates by email and password, issuing a bearer token.
    pub async fn login(&self, payload: LoginRequest) -> AppResult<IssuedToken> {
        let email = payload
            .email
            .ok_or_else(|| AppError::invalid_field("email", "The email field is required."))?;
        let password = payload
            .password
            .ok_or_else(|| AppError::invalid_field("password", "The password field is required."))?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(Self::invalid_credentials)?;
        if !verify_password(&password, &user.password)? {
            return Err(Self::invalid_credentials());
        }

        self.issue_token(&user)
    }

    /// Issues a fresh token for an already-authenticated caller.
    pub fn refresh(&self, caller: &User) -> AppResult<IssuedToken> {
        self.issue_token(caller)
    }

    fn issue_token(&self, user: &User) -> AppResult<IssuedToken> {
        let access_token = sign_token(
            user.id,
            user.email.clone(),
            user.name.clone(),
            &self.jwt.secret,
            self.jwt.token_expiration,
        )?;
        Ok(IssuedToken {
            access_token,
            expires_in: self.jwt.token_expiration * 3600,
        })
    }

    fn invalid_credentials() -> AppError {
        AppError::Unauthorized {
            message: "Invalid credentials".to_string(),
        }
    }
}

//! Credential header decoding and user authentication
//!
//! Protected endpoints expect the `Authorization` header to carry the raw
//! base64 encoding of `username:password`, without any scheme prefix. Every
//! request is authenticated from scratch; no session is kept.

use std::fmt;

use axum::http::HeaderValue;
use base64::{Engine, engine::general_purpose::STANDARD as B64};
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    models::User,
    password,
    repositories::UserStore,
};

/// Username and password carried by a credential header
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity of the user a request was authenticated as
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Decode a credential header value into username and password.
///
/// The value is base64 decoded, the result must be UTF-8 and is trimmed, then
/// split on the first colon. The password may itself contain colons.
pub fn decode_credentials(header: &str) -> ApiResult<Credentials> {
    let decoded = B64
        .decode(header.trim())
        .map_err(|_| ApiError::MalformedCredentials)?;
    let text = String::from_utf8(decoded).map_err(|_| ApiError::MalformedCredentials)?;

    let (username, password) = text
        .trim()
        .split_once(':')
        .ok_or(ApiError::MalformedCredentials)?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Look a user up and check the password against the stored hash.
///
/// An unknown username and a wrong password both yield
/// [`ApiError::InvalidCredentials`].
pub async fn verify_credentials(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> ApiResult<User> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify_password(password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}

/// Authenticate a request from its (possibly absent) credential header.
///
/// An unknown user or a wrong password yields [`ApiError::InvalidUser`].
pub async fn authenticate(
    users: &dyn UserStore,
    header: Option<&HeaderValue>,
) -> ApiResult<AuthUser> {
    let header = header.ok_or(ApiError::MissingHeader)?;
    let header = header.to_str().map_err(|_| ApiError::MalformedCredentials)?;
    let credentials = decode_credentials(header)?;

    let user = verify_credentials(users, &credentials.username, &credentials.password)
        .await
        .map_err(|e| match e {
            ApiError::InvalidCredentials => {
                warn!("Rejected credentials for user: {}", credentials.username);
                ApiError::InvalidUser
            }
            other => other,
        })?;

    Ok(user.into())
}

//! Password hashing and the rolling JWT session cookie.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{invalid, ApiError};
use caixa_core::users::User;

pub const SESSION_COOKIE: &str = "session_token";
/// Short rolling sessions: every authenticated request renews the cookie.
pub const SESSION_TTL_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| invalid(format!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn issue_session_token(user: &User, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| invalid(format!("token issuing failed: {e}")))
}

pub fn decode_session_token(token: &str, secret: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// The Set-Cookie value carrying a fresh session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Max-Age={SESSION_TTL_SECS}; Path=/; HttpOnly; SameSite=Lax")
}

/// The Set-Cookie value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        let now = Utc::now().naive_utc();
        User {
            id: "user-1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn password_hash_verifies_only_the_right_password() {
        let hash = hash_password("segredo-forte").unwrap();
        assert!(verify_password("segredo-forte", &hash));
        assert!(!verify_password("segredo-errado", &hash));
        assert!(!verify_password("segredo-forte", "not-a-phc-string"));
    }

    #[test]
    fn session_token_roundtrip() {
        let token = issue_session_token(&user(), "secret").unwrap();
        let claims = decode_session_token(&token, "secret").expect("valid token");
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "ana@example.com");

        // A different secret must not validate.
        assert!(decode_session_token(&token, "other-secret").is_none());
    }

    #[test]
    fn cookies_carry_the_session_name() {
        assert!(session_cookie("abc").starts_with("session_token=abc;"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}

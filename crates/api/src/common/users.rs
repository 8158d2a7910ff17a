use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use chrono::Utc;
use db::{models::User, schema::users, types::DbId};
use diesel::insert_into;
use diesel_async::RunQueryDsl;
use lazy_static::lazy_static;
use regex::Regex;
use web::AppState;

pub const USERNAME_RE: &str = r"^[a-z0-9_]+([a-z0-9_.-]*[a-z0-9_]+)?$";
pub const EMAIL_RE: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(USERNAME_RE).unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(EMAIL_RE).unwrap();
}

pub fn valid_username(name: &str) -> bool {
    (1..=50).contains(&name.len()) && USERNAME_REGEX.is_match(name)
}

pub fn valid_email(email: &str) -> bool {
    email.len() <= 200 && EMAIL_REGEX.is_match(email)
}

pub fn valid_password(password: &str) -> bool {
    password.len() >= 8
}

pub async fn hash_password(password: String) -> anyhow::Result<String> {
    let password_hash = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|f| f.to_string())
    })
    .await?;

    match password_hash {
        Ok(hash) => Ok(hash),
        Err(_) => Err(anyhow!("password hashing failed")),
    }
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn register(
    name: String,
    email: String,
    password: String,
    display_name: Option<String>,
    state: &Arc<AppState>,
) -> anyhow::Result<User> {
    let mut conn = state.db_pool.get().await?;

    let password_hash = hash_password(password).await?;

    let user = User {
        id: DbId::default(),
        name,
        email,
        display_name,
        bio: None,
        password_encrypted: password_hash,
        admin: false,
        rating: 0,
        published: Utc::now(),
        updated: None,
    };

    Ok(insert_into(users::table)
        .values(user)
        .get_result::<User>(&mut conn)
        .await?)
}

#[cfg(test)]
mod tests {
    use crate::common::users::{valid_email, valid_username};

    #[test]
    fn usernames() {
        assert!(valid_username("maksales"));
        assert!(valid_username("vector1.dev"));
        assert!(valid_username("a"));

        assert!(!valid_username(""));
        assert!(!valid_username("Maksales"));
        assert!(!valid_username(".maksales"));
        assert!(!valid_username("maksales."));
        assert!(!valid_username("mak sales"));
    }

    #[test]
    fn emails() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("first.last@sub.example.org"));

        assert!(!valid_email("user"));
        assert!(!valid_email("user@"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("us er@example.com"));
    }
}

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::debug;

use crate::db::{DbUser, NewUser, UserStorage};
use crate::error::PortalError;
use crate::types::auth::RegisterRequest;

#[derive(Debug)]
pub enum RegisterOutcome {
    Created(DbUser),
    AlreadyRegistered,
}

/// Local identity store: credential checks and account creation.
#[derive(Clone)]
pub struct AuthService {
    users: UserStorage,
}

impl AuthService {
    pub fn new(users: UserStorage) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &UserStorage {
        &self.users
    }

    /// `None` for an unknown user or a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<DbUser>, PortalError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username, "login for unknown user");
            return Ok(None);
        };

        let password = password.to_owned();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await?;

        Ok(valid.then_some(user))
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterOutcome, PortalError> {
        if self.users.exists(&req.user_name).await? {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }
        debug!(username = %req.user_name, "new user");

        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let created = self
            .users
            .insert(NewUser {
                username: req.user_name,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
                email: req.email,
            })
            .await?;

        Ok(match created {
            Some(user) => RegisterOutcome::Created(user),
            None => RegisterOutcome::AlreadyRegistered,
        })
    }
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, PortalError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC hash string. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

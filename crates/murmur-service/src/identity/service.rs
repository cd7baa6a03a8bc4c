//! Registration, authentication, and public identity projection.
//!
//! This is the only service that holds full [`User`] rows. Everything it
//! hands out is a [`PublicUser`], with the avatar recomputed from the
//! stored email on every read.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, error, info, warn};

use murmur_auth::{AvatarResolver, PasswordHasher};
use murmur_core::error::{AppError, ErrorKind};
use murmur_core::types::UserId;
use murmur_database::{UserStore, constraint};
use murmur_entity::user::{NewUser, PublicUser, User};

use crate::input::{LoginForm, RegistrationForm};
use crate::validation::{self, normalize};

/// The only message a failed login ever reports.
pub const LOGIN_FAILED: &str = "Invalid username / password.";
/// Reported when the requested username belongs to someone else.
pub const USERNAME_TAKEN: &str = "Username is already taken";
/// Reported when the email is already registered.
pub const EMAIL_TAKEN: &str = "Email is already being used";

/// Hashed once, then verified against whenever the username is unknown.
const DECOY_PASSWORD: &str = "murmur-decoy-credential";

/// Owns the user collection and every credential hash in it.
#[derive(Debug, Clone)]
pub struct IdentityService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Argon2id hasher.
    hasher: Arc<PasswordHasher>,
    /// Avatar address derivation.
    avatars: Arc<AvatarResolver>,
    /// Lazily computed hash of [`DECOY_PASSWORD`].
    decoy_hash: Arc<OnceLock<String>>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        avatars: Arc<AvatarResolver>,
    ) -> Self {
        Self {
            users,
            hasher,
            avatars,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Registers a new account.
    ///
    /// Every format problem and both uniqueness problems are reported
    /// together as a single validation error. Nothing is written unless
    /// the whole form is acceptable.
    pub async fn register(&self, form: RegistrationForm) -> Result<PublicUser, AppError> {
        let username = normalize(&form.username);
        let email = normalize(&form.email);

        let mut problems = validation::registration_problems(&username, &email, &form.password);

        if validation::username_is_well_formed(&username)
            && self.users.username_exists(&username).await?
        {
            problems.push(USERNAME_TAKEN.to_string());
        }
        if validation::email_is_well_formed(&email) && self.users.email_exists(&email).await? {
            problems.push(EMAIL_TAKEN.to_string());
        }

        if !problems.is_empty() {
            debug!(username = %username, problems = problems.len(), "Registration rejected");
            return Err(AppError::validation(problems));
        }

        let password_hash = self.hash_off_thread(form.password).await?;

        let user = self
            .users
            .insert(&NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(registration_conflict)?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(self.public(&user))
    }

    /// Checks a username and password pair.
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller.
    pub async fn authenticate(&self, form: LoginForm) -> Result<PublicUser, AppError> {
        let username = normalize(&form.username);

        let Some(user) = self.users.find_by_username(&username).await? else {
            if let Err(e) = self.verify_decoy(form.password).await {
                error!(error = %e, "Decoy password verification failed");
            }
            warn!(username = %username, "Login rejected: unknown user");
            return Err(AppError::authentication(LOGIN_FAILED));
        };

        match self
            .verify_off_thread(form.password, user.password_hash.clone())
            .await?
        {
            Ok(true) => {
                info!(user_id = %user.id, "User authenticated");
                Ok(self.public(&user))
            }
            Ok(false) => {
                warn!(user_id = %user.id, "Login rejected: password mismatch");
                Err(AppError::authentication(LOGIN_FAILED))
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(AppError::authentication(LOGIN_FAILED))
            }
        }
    }

    /// Public identity for `username`, or `NotFound`.
    pub async fn find_public_by_username(&self, username: &str) -> Result<PublicUser, AppError> {
        self.lookup_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Public identity for `username`, if the account exists.
    pub async fn lookup_username(&self, username: &str) -> Result<Option<PublicUser>, AppError> {
        let username = normalize(username);
        if username.is_empty() {
            return Ok(None);
        }
        Ok(self
            .users
            .find_by_username(&username)
            .await?
            .map(|user| self.public(&user)))
    }

    /// Public identity for `id`, if the account exists.
    pub async fn lookup_id(&self, id: UserId) -> Result<Option<PublicUser>, AppError> {
        Ok(self
            .users
            .find_by_id(id)
            .await?
            .map(|user| self.public(&user)))
    }

    /// Batch lookup used by joins. Ids without an account are absent from
    /// the map.
    pub async fn public_by_ids(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, PublicUser>, AppError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let users = self.users.find_by_ids(&unique).await?;
        debug!(requested = unique.len(), found = users.len(), "Resolved user batch");

        Ok(users
            .iter()
            .map(|user| (user.id, self.public(user)))
            .collect())
    }

    /// Whether an account already uses this username.
    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        self.users.username_exists(&normalize(username)).await
    }

    /// Whether an account already uses this email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        self.users.email_exists(&normalize(email)).await
    }

    fn public(&self, user: &User) -> PublicUser {
        PublicUser::from_user(user, self.avatars.avatar_for(&user.email))
    }

    /// Verification is CPU-bound and runs on the blocking pool. The outer
    /// error is a task failure; the inner one an unreadable hash.
    async fn verify_off_thread(
        &self,
        password: String,
        stored: String,
    ) -> Result<Result<bool, AppError>, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &stored))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }

    /// Spend one full verify on a miss. The result is discarded.
    async fn verify_decoy(&self, password: String) -> Result<(), AppError> {
        let hasher = Arc::clone(&self.hasher);
        let decoy_hash = Arc::clone(&self.decoy_hash);
        tokio::task::spawn_blocking(move || {
            let stored = match decoy_hash.get() {
                Some(hash) => hash.clone(),
                None => {
                    let hash = hasher.hash_password(DECOY_PASSWORD)?;
                    decoy_hash.get_or_init(|| hash).clone()
                }
            };
            hasher.verify_password(&password, &stored).map(|_| ())
        })
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }

    /// Hashing is CPU-bound and runs on the blocking pool.
    async fn hash_off_thread(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }
}

/// A uniqueness constraint that fired at insert means another
/// registration won the race. Report it as the check would have.
fn registration_conflict(err: AppError) -> AppError {
    if err.kind != ErrorKind::Conflict {
        return err;
    }
    match err.message.as_str() {
        constraint::USERNAME => AppError::validation(vec![USERNAME_TAKEN.to_string()]),
        constraint::EMAIL => AppError::validation(vec![EMAIL_TAKEN.to_string()]),
        _ => err,
    }
}

#[cfg(test)]
mod tests {
    use murmur_core::config::{AuthConfig, AvatarConfig};
    use murmur_database::MemoryStore;

    use super::*;

    fn identity() -> IdentityService {
        let auth = AuthConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        IdentityService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PasswordHasher::new(&auth).expect("hasher")),
            Arc::new(AvatarResolver::new(&AvatarConfig::default())),
        )
    }

    #[tokio::test]
    async fn test_unknown_user_still_runs_a_verify() {
        let identity = identity();
        assert!(identity.decoy_hash.get().is_none());

        let err = identity
            .authenticate(LoginForm::new("ghost", "whatever-password"))
            .await
            .expect_err("unknown user");
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, LOGIN_FAILED);

        let first = identity.decoy_hash.get().cloned().expect("decoy hashed");
        identity
            .authenticate(LoginForm::new("ghost", "another-password"))
            .await
            .expect_err("unknown user");
        assert_eq!(identity.decoy_hash.get(), Some(&first));
    }

    #[test]
    fn test_constraint_conflicts_become_validation() {
        let err = registration_conflict(AppError::conflict(constraint::USERNAME));
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.details, vec![USERNAME_TAKEN]);

        let err = registration_conflict(AppError::conflict(constraint::EMAIL));
        assert_eq!(err.details, vec![EMAIL_TAKEN]);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = registration_conflict(AppError::internal("boom"));
        assert_eq!(err.kind, ErrorKind::Internal);

        let err = registration_conflict(AppError::conflict("some_other_key"));
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}

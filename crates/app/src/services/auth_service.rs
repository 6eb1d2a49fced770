//! Auth service — registration, login, token checks and user administration.

use hospital_domain::error::{AuthError, ConflictError, HospitalError, NotFoundError};
use hospital_domain::id::UserId;
use hospital_domain::record::Record;
use hospital_domain::time::{self, Timestamp};
use hospital_domain::user::{self, AccessClaims, User};

use crate::ports::{PasswordHasher, TokenCodec, UserRepository};

/// Permission granting every action on every resource.
pub const ADMIN_PERMISSION: &str = "*";

/// Token lifetime and the permissions handed to self-registered users.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    pub token_ttl: chrono::Duration,
    pub default_permissions: Vec<String>,
}

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: User,
}

/// Application service for users and their access tokens.
pub struct AuthService<S, H, C> {
    store: S,
    hasher: H,
    codec: C,
    policy: AuthPolicy,
}

impl<S, H, C> AuthService<S, H, C>
where
    S: UserRepository + Sync,
    H: PasswordHasher,
    C: TokenCodec,
{
    pub fn new(store: S, hasher: H, codec: C, policy: AuthPolicy) -> Self {
        Self {
            store,
            hasher,
            codec,
            policy,
        }
    }

    /// Create a user with the default permission set and log them in.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] for an empty username or a short
    /// password, [`ConflictError::Duplicate`] when the username is taken, or
    /// a storage or hashing error.
    #[tracing::instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, HospitalError> {
        let user = self
            .create_user(username, password, self.policy.default_permissions.clone())
            .await?;
        tracing::info!(user_id = %user.id, "user registered");
        self.issue(user)
    }

    /// Check credentials and issue a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or a
    /// wrong password alike, or a storage error.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, HospitalError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            tracing::debug!("unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::debug!("wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        self.issue(user)
    }

    /// Decode `token` and check that it grants `required`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for a bad or expired token, or
    /// [`AuthError::Forbidden`] when the permission is not granted.
    pub fn authorize(&self, token: &str, required: &str) -> Result<AccessClaims, HospitalError> {
        let claims = self.codec.decode(token)?;
        if claims.can(required) {
            Ok(claims)
        } else {
            tracing::debug!(username = %claims.username, required, "permission denied");
            Err(AuthError::Forbidden {
                permission: required.to_string(),
            }
            .into())
        }
    }

    /// Create an administrator holding every permission unless `username`
    /// already exists. Returns whether a user was created.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register), except an existing username is
    /// not an error.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, HospitalError> {
        if self.store.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        let admin = self
            .create_user(username, password, vec![ADMIN_PERMISSION.to_string()])
            .await?;
        tracing::info!(user_id = %admin.id, username, "administrator created");
        Ok(true)
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<User>, HospitalError> {
        self.store.get_all().await
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] when no user with `id` exists, or
    /// a storage error.
    pub async fn get_user(&self, id: UserId) -> Result<User, HospitalError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: User::NAME,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Replace the permission set of a user. Tokens already issued keep
    /// their old permissions until they expire.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::Validation`] for a malformed permission,
    /// [`HospitalError::NotFound`] for an unknown user, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn set_permissions(
        &self,
        id: UserId,
        permissions: Vec<String>,
    ) -> Result<User, HospitalError> {
        user::validate_permissions(&permissions)?;
        let mut user = self.get_user(id).await?;
        user.permissions = permissions;
        self.store.update(user).await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::NotFound`] for an unknown user, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), HospitalError> {
        self.get_user(id).await?;
        self.store.delete(id).await
    }

    async fn create_user(
        &self,
        username: &str,
        password: &str,
        permissions: Vec<String>,
    ) -> Result<User, HospitalError> {
        user::validate_password(password)?;
        let user = User::new(username.trim(), String::new(), permissions);
        user.validate()?;
        if self.store.find_by_username(&user.username).await?.is_some() {
            return Err(ConflictError::Duplicate { entity: User::NAME }.into());
        }
        let user = User {
            password_hash: self.hasher.hash(password)?,
            ..user
        };
        self.store.create(user).await
    }

    fn issue(&self, user: User) -> Result<Session, HospitalError> {
        let issued_at = time::now();
        let expires_at = issued_at + self.policy.token_ttl;
        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
            permissions: user.permissions.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = self.codec.encode(&claims)?;
        Ok(Session {
            token,
            expires_at,
            user,
        })
    }
}

//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hospital.toml` in the working directory. Every field has a
//! default so the file is optional, except `auth.jwt_secret`, which must be
//! set in the file or through `HOSPITAL_JWT_SECRET`. Environment variables
//! take precedence over file values.

use serde::Deserialize;

/// Bootstrap administrator password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "change-me-now";

/// Read access on every record resource. `users` is left out so that a
/// self-registered account cannot enumerate accounts.
const DEFAULT_PERMISSIONS: &[&str] = &[
    "buildings.read",
    "floors.read",
    "room-types.read",
    "rooms.read",
    "staff.read",
    "doctors.read",
    "patients.read",
    "pharmacies.read",
    "clinics.read",
    "warehouses.read",
    "suppliers.read",
    "medicines.read",
    "reservations.read",
    "prescriptions.read",
];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Token signing and the bootstrap administrator.
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Access-token and user settings.
#[derive(Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens. No default.
    pub jwt_secret: String,
    /// Lifetime of an access token, in seconds.
    pub token_ttl_secs: u64,
    /// Permissions granted to self-registered users.
    pub default_permissions: Vec<String>,
    /// Administrator created on startup when missing.
    pub admin_username: String,
    pub admin_password: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("default_permissions", &self.default_permissions)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from `hospital.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hospital.toml")?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOSPITAL_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("HOSPITAL_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("HOSPITAL_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("HOSPITAL_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("HOSPITAL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("HOSPITAL_JWT_SECRET") {
            self.auth.jwt_secret = val;
        }
        if let Some(ttl) = var("HOSPITAL_TOKEN_TTL_SECS").and_then(|val| val.parse().ok()) {
            self.auth.token_ttl_secs = ttl;
        }
        if let Some(val) = var("HOSPITAL_ADMIN_USERNAME") {
            self.auth.admin_username = val;
        }
        if let Some(val) = var("HOSPITAL_ADMIN_PASSWORD") {
            self.auth.admin_password = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Validation(
                "auth.jwt_secret must be set (or HOSPITAL_JWT_SECRET)".to_string(),
            ));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "token_ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.checked_token_ttl().is_none() {
            return Err(ConfigError::Validation(
                "token_ttl_secs is too large".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the bootstrap administrator still has the built-in password.
    #[must_use]
    pub fn uses_default_admin_password(&self) -> bool {
        self.auth.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Token lifetime as a signed duration.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        self.checked_token_ttl().unwrap_or(chrono::Duration::MAX)
    }

    fn checked_token_ttl(&self) -> Option<chrono::Duration> {
        i64::try_from(self.auth.token_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:hospital.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hospitald=info,hospital=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 3600,
            default_permissions: DEFAULT_PERMISSIONS.iter().map(ToString::to_string).collect(),
            admin_username: "admin".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hospital_domain::permission;

    use super::*;

    /// Defaults plus the one setting that has none.
    fn valid() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "test-secret".to_string();
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:hospital.db?mode=rwc");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.auth.default_permissions.len(), 14);
        assert!(config.auth.jwt_secret.is_empty());
    }

    #[test]
    fn should_not_grant_user_administration_by_default() {
        let config = Config::default();
        let granted = config.auth.default_permissions.as_slice();
        assert!(permission::any_grants(granted, "patients.read"));
        assert!(permission::any_grants(granted, "room-types.read"));
        assert!(!permission::any_grants(granted, "users.read"));
        assert!(!permission::any_grants(granted, "patients.write"));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.admin_username, "admin");
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [auth]
            jwt_secret = 's3cret'
            token_ttl_secs = 60
            default_permissions = ['patients.read', 'reservations.*']
            admin_username = 'root'
            admin_password = 'hunter2hunter2'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.token_ttl_secs, 60);
        assert_eq!(config.auth.default_permissions.len(), 2);
        assert_eq!(config.auth.admin_username, "root");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("HOSPITAL_PORT", "8081"),
            ("HOSPITAL_DATABASE_URL", "sqlite::memory:"),
            ("HOSPITAL_JWT_SECRET", "from-env"),
            ("HOSPITAL_TOKEN_TTL_SECS", "120"),
            ("HOSPITAL_ADMIN_USERNAME", "chief"),
        ]));
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.auth.token_ttl_secs, 120);
        assert_eq!(config.auth.admin_username, "chief");
    }

    #[test]
    fn should_let_bind_override_host_and_port() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("HOSPITAL_HOST", "10.0.0.1"),
            ("HOSPITAL_BIND", "127.0.0.1:4000"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn should_prefer_rust_log_over_hospital_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("HOSPITAL_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("HOSPITAL_PORT", "eighty")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = valid();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_ttl() {
        let mut config = valid();
        config.auth.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults_once_secret_is_set() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn should_require_jwt_secret() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn should_accept_jwt_secret_from_env() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("HOSPITAL_JWT_SECRET", "from-env")]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_detect_default_admin_password() {
        let mut config = valid();
        assert!(config.uses_default_admin_password());
        config.auth.admin_password = "a-real-password".to_string();
        assert!(!config.uses_default_admin_password());
    }

    #[test]
    fn should_reject_ttl_out_of_range() {
        let mut config = valid();
        config.auth.token_ttl_secs = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_convert_ttl_to_duration() {
        let mut config = Config::default();
        config.auth.token_ttl_secs = 90;
        assert_eq!(config.token_ttl(), chrono::Duration::seconds(90));
    }

    #[test]
    fn should_redact_secrets_in_debug_output() {
        let debug = format!("{:?}", valid().auth);
        assert!(!debug.contains("test-secret"));
        assert!(!debug.contains(DEFAULT_ADMIN_PASSWORD));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}

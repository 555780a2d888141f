use std::env;
use std::str::FromStr;

use auth::TokenCodec;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub federation: FederationConfig,
}

/// Token-signing configuration.
///
/// All three values are required; the process must not come up without them.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub expire_minutes: i64,
}

/// External identity provider configuration. Defaults to Google Sign-In.
#[derive(Debug, Deserialize, Clone)]
pub struct FederationConfig {
    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,
    #[serde(default = "default_issuers")]
    pub issuers: Vec<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

fn default_jwks_url() -> String {
    auth::federation::verifier::GOOGLE_JWKS_URL.to_string()
}

fn default_issuers() -> Vec<String> {
    auth::federation::verifier::GOOGLE_ISSUERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            jwks_url: default_jwks_url(),
            issuers: default_issuers(),
            audience: None,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, JWT__EXPIRE_MINUTES, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Validation runs as part of loading: an absent or malformed value is a
    /// startup-time error, never a per-request one.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }
        self.jwt.signing_algorithm()?;
        if self.jwt.expire_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expire_minutes must be positive, got {}",
                self.jwt.expire_minutes
            )));
        }
        if self.federation.jwks_url.is_empty() {
            return Err(ConfigError::Message(
                "federation.jwks_url must not be empty".to_string(),
            ));
        }
        if self.federation.issuers.is_empty() {
            return Err(ConfigError::Message(
                "federation.issuers must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl JwtConfig {
    /// Parse the configured algorithm identifier.
    ///
    /// Only the HMAC family is accepted: the codec signs and verifies with
    /// the same shared secret.
    pub fn signing_algorithm(&self) -> Result<Algorithm, ConfigError> {
        let algorithm = Algorithm::from_str(&self.algorithm).map_err(|_| {
            ConfigError::Message(format!("unknown jwt.algorithm: {}", self.algorithm))
        })?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
            other => Err(ConfigError::Message(format!(
                "jwt.algorithm {:?} is not an HMAC algorithm",
                other
            ))),
        }
    }

    /// Configured token lifetime.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expire_minutes)
    }

    /// Build the token codec from this configuration.
    pub fn codec(&self) -> Result<TokenCodec, ConfigError> {
        Ok(TokenCodec::new(
            self.secret.as_bytes(),
            self.signing_algorithm()?,
            self.token_ttl(),
        ))
    }
}

//! Deployment configuration, read from the process environment.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::CatalogError;

pub const PRODUCTION_GRAPH_URL: &str = "https://api.hypercerts.org/v1/graphql";
pub const STAGING_GRAPH_URL: &str = "https://staging-api.hypercerts.org/v1/graphql";
pub const PRODUCTION_CHAIN_ID: &str = "8453";
pub const STAGING_CHAIN_ID: &str = "84532";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const EXPLORER_TX_URL: &str = "https://celo.blockscout.com/tx/";
pub const TOKEN_SYMBOL: &str = "CELO";

pub const ENVIRONMENT_VAR: &str = "NEXT_PUBLIC_ENVIRONMENT";
pub const GRAPH_URL_VAR: &str = "HYPERCERTS_GRAPH_URL";
pub const APP_URL_VAR: &str = "NEXT_PUBLIC_URL";
pub const ASSOCIATION_HEADER_VAR: &str = "ACCOUNT_ASSOCIATION_HEADER";
pub const ASSOCIATION_PAYLOAD_VAR: &str = "ACCOUNT_ASSOCIATION_PAYLOAD";
pub const ASSOCIATION_SIGNATURE_VAR: &str = "ACCOUNT_ASSOCIATION_SIGNATURE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Production,
    #[default]
    Staging,
}

impl Environment {
    pub fn graph_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_GRAPH_URL,
            Environment::Staging => STAGING_GRAPH_URL,
        }
    }

    pub fn chain_id(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_CHAIN_ID,
            Environment::Staging => STAGING_CHAIN_ID,
        }
    }
}

impl FromStr for Environment {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" | "test" | "sandbox" | "" => Ok(Environment::Staging),
            other => Err(CatalogError::Config(format!(
                "unknown environment '{}'",
                other
            ))),
        }
    }
}

/// Signed account-association block of the mini-app manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountAssociation {
    pub header: String,
    pub payload: String,
    pub signature: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub environment: Environment,
    pub graph_url: String,
    pub chain_id: String,
    pub items_per_page: u32,
    pub timeout: Duration,
    pub app_url: String,
    pub account_association: AccountAssociation,
}

impl CatalogConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            graph_url: environment.graph_url().to_string(),
            chain_id: environment.chain_id().to_string(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            timeout: DEFAULT_TIMEOUT,
            app_url: String::new(),
            account_association: AccountAssociation::default(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unrecognized environments fall back to
    /// staging with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup(ENVIRONMENT_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; using staging", e);
                Environment::Staging
            }),
            None => Environment::Staging,
        };

        let mut config = Self::for_environment(environment);
        if let Some(url) = lookup(GRAPH_URL_VAR).filter(|u| !u.is_empty()) {
            config.graph_url = url;
        }
        config.app_url = lookup(APP_URL_VAR)
            .map(|u| crate::utils::remove_trailing_slash(&u))
            .unwrap_or_default();
        config.account_association = AccountAssociation {
            header: lookup(ASSOCIATION_HEADER_VAR).unwrap_or_default(),
            payload: lookup(ASSOCIATION_PAYLOAD_VAR).unwrap_or_default(),
            signature: lookup(ASSOCIATION_SIGNATURE_VAR).unwrap_or_default(),
        };
        config
    }

    pub fn with_graph_url(mut self, url: &str) -> Self {
        self.graph_url = url.to_string();
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

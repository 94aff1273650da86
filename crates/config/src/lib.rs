use anyhow::{Context, Result};
use efax_core::{Configuration, Priority, Resolution, SelfBusy};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "efax-client";
const KEYCHAIN_SERVICE: &str = "efax.client.credentials";

/// Keychain entry holding the account password.
pub const PASSWORD_SECRET: &str = "efax_password";
/// Environment variable that overrides the keychain password.
pub const PASSWORD_ENV: &str = "EFAX_PASSWORD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub account: AccountConfig,
}

/// Everything about the account except the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default = "default_account_id")]
    pub account_id: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub self_busy: SelfBusy,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            account_id: default_account_id(),
            username: default_username(),
            resolution: Resolution::default(),
            priority: Priority::default(),
            self_busy: SelfBusy::default(),
        }
    }
}

fn default_account_id() -> String {
    Configuration::default().account_id
}

fn default_username() -> String {
    Configuration::default().username
}

impl AccountConfig {
    /// Combine the stored settings with a password into a request configuration.
    pub fn to_configuration(&self, password: Option<String>) -> Configuration {
        let defaults = Configuration::default();
        Configuration {
            account_id: self.account_id.clone(),
            username: self.username.clone(),
            password: password.unwrap_or(defaults.password),
            resolution: self.resolution,
            priority: self.priority,
            self_busy: self.self_busy,
        }
    }
}

pub fn load() -> Result<AppConfig> {
    let cfg: AppConfig = confy::load(APP_NAME, None).context("Failed to load app config")?;
    Ok(cfg)
}

pub fn store(cfg: &AppConfig) -> Result<()> {
    confy::store(APP_NAME, None, cfg).context("Failed to store app config")?;
    Ok(())
}

/// Build the request configuration, taking the password from the
/// environment, then the keychain, then the built-in default.
pub fn resolve(cfg: &AppConfig) -> Configuration {
    let password = std::env::var(PASSWORD_ENV)
        .ok()
        .or_else(|| get_secret(PASSWORD_SECRET).ok());
    cfg.account.to_configuration(password)
}

/// Store a secret in the OS keychain
pub fn store_secret(key: &str, value: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    entry.set_password(value)?;
    Ok(())
}

/// Retrieve a secret from the OS keychain
pub fn get_secret(key: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    let password = entry.get_password()?;
    Ok(password)
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resolution {
    #[default]
    Standard,
    Fine,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// Whether the service should refuse to send while the account is already
/// transmitting to the same number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SelfBusy {
    #[default]
    Disable,
    Enable,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Standard => "STANDARD",
            Resolution::Fine => "FINE",
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "NORMAL",
            Priority::High => "HIGH",
        }
    }
}

impl SelfBusy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelfBusy::Disable => "DISABLE",
            SelfBusy::Enable => "ENABLE",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SelfBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(Resolution::Standard),
            "FINE" => Ok(Resolution::Fine),
            other => Err(format!("unknown resolution: {other}")),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Priority::Normal),
            "HIGH" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl FromStr for SelfBusy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DISABLE" => Ok(SelfBusy::Disable),
            "ENABLE" => Ok(SelfBusy::Enable),
            other => Err(format!("unknown self-busy mode: {other}")),
        }
    }
}

/// Account credentials and outbound transmission defaults.
///
/// Built once by the embedding application and passed by reference into every
/// encoder; nothing in this crate keeps a copy between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub account_id: String,
    pub username: String,
    pub password: String,
    pub resolution: Resolution,
    pub priority: Priority,
    pub self_busy: SelfBusy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            account_id: "0000".to_string(),
            username: "test".to_string(),
            password: "test".to_string(),
            resolution: Resolution::default(),
            priority: Priority::default(),
            self_busy: SelfBusy::default(),
        }
    }
}

impl Configuration {
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_self_busy(mut self, self_busy: SelfBusy) -> Self {
        self.self_busy = self_busy;
        self
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed `cloze/bank.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    pub bank: BankInfo,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankInfo {
    pub name: String,
}

/// Validation policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// When true, a passage with zero blank tokens is a validation error.
    #[serde(default = "default_require_blanks")]
    pub require_blanks: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            require_blanks: true,
        }
    }
}

fn default_require_blanks() -> bool {
    true
}

/// TUI appearance overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Named color overrides, `key = "#rrggbb"`. Applied in file order.
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

impl BankConfig {
    pub fn new(name: String) -> Self {
        BankConfig {
            bank: BankInfo { name },
            policy: PolicyConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Headline figures shown on the overview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Balance {
    pub current: f64,
    pub income: f64,
    pub expenses: f64,
}

/// Per-document display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "Settings::default_currency")]
    pub currency: String,
    #[serde(default = "Settings::default_locale")]
    pub locale: String,
}

impl Settings {
    fn default_currency() -> String {
        "USD".into()
    }

    fn default_locale() -> String {
        "en-US".into()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Coarse health signal of a device (connectivity / heartbeat).
///
/// This is rolled independently every tick and carries no relation to the
/// sustained-threshold alerts: an `Online` device may hold an active CPU alert.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Online,
    Warning,
    Error,
    Offline,
}

impl DeviceStatus {
    pub const ALL: [Self; 4] = [Self::Online, Self::Warning, Self::Error, Self::Offline];

    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Online => "🟢",
            Self::Warning => "🟡",
            Self::Error => "🔴",
            Self::Offline => "⚫",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "ONLINE"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Offline => write!(f, "OFFLINE"),
        }
    }
}

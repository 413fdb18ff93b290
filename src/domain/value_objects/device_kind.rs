use serde::{Deserialize, Serialize};

/// Hardware role of a simulated device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Server,
    Router,
    Database,
    Iot,
}

impl DeviceKind {
    pub const ALL: [Self; 4] = [Self::Server, Self::Router, Self::Database, Self::Iot];

    /// Short prefix used when naming devices of this kind.
    #[must_use]
    pub const fn name_prefix(self) -> &'static str {
        match self {
            Self::Server => "SRV",
            Self::Router => "RTR",
            Self::Database => "DB",
            Self::Iot => "IOT",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "SERVER"),
            Self::Router => write!(f, "ROUTER"),
            Self::Database => write!(f, "DATABASE"),
            Self::Iot => write!(f, "IOT"),
        }
    }
}

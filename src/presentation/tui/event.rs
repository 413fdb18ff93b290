use std::fmt;

use crate::domain::value_objects::device_status::DeviceStatus;

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Fleet,
    Alerts,
}

impl ActivePanel {
    /// Cycle to the next panel.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Fleet => Self::Alerts,
            Self::Alerts => Self::Fleet,
        }
    }

    /// Cycle to the previous panel.
    #[must_use]
    pub const fn prev(self) -> Self {
        // two panels: backward and forward coincide
        self.next()
    }
}

impl fmt::Display for ActivePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fleet => write!(f, "Fleet"),
            Self::Alerts => write!(f, "Alerts"),
        }
    }
}

/// Column used for sorting the fleet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
    Cpu,
    Ram,
    Status,
}

impl SortColumn {
    /// Cycle to the next sort column.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Cpu,
            Self::Cpu => Self::Ram,
            Self::Ram => Self::Status,
            Self::Status => Self::Name,
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "Name"),
            Self::Cpu => write!(f, "CPU"),
            Self::Ram => write!(f, "RAM"),
            Self::Status => write!(f, "Status"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Toggle the sort direction.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "↑"),
            Self::Desc => write!(f, "↓"),
        }
    }
}

/// Status filter applied to the fleet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DeviceStatus),
}

impl StatusFilter {
    /// All → Online → Warning → Error → Offline → All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(DeviceStatus::Online),
            Self::Only(DeviceStatus::Online) => Self::Only(DeviceStatus::Warning),
            Self::Only(DeviceStatus::Warning) => Self::Only(DeviceStatus::Error),
            Self::Only(DeviceStatus::Error) => Self::Only(DeviceStatus::Offline),
            Self::Only(DeviceStatus::Offline) => Self::All,
        }
    }

    #[must_use]
    pub fn matches(self, status: DeviceStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(status) => write!(f, "{}", status.to_string().to_lowercase()),
        }
    }
}

/// Whether keystrokes drive commands or edit the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

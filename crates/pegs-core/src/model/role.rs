use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Roles a participant can be granted by configuration.
///
/// Only [`Role::Unmetered`] matters to the engine (it is the default quota
/// exemption); the rest gate operator commands in the surrounding bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Unmetered,
    Reset,
    Finish,
    Config,
}

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Unmetered,
        Self::Reset,
        Self::Finish,
        Self::Config,
    ];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Unmetered => "UNMETERED",
            Self::Reset => "RESET",
            Self::Finish => "FINISH",
            Self::Config => "CONFIG",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name does not match any [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    pub got: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: '{}'", self.got)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ParseRoleError { got: s.to_string() })
    }
}

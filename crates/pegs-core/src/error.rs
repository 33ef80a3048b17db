use std::fmt;

use crate::model::role::ParseRoleError;

/// Machine-readable error codes for scripts and report tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidRole,
    MissingLimit,
    InvalidSetting,
    MissingEventField,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidRole => "E1002",
            Self::MissingLimit => "E1003",
            Self::InvalidSetting => "E1004",
            Self::MissingEventField => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidRole => "Unknown role name",
            Self::MissingLimit => "Peg limit not configured",
            Self::InvalidSetting => "Numeric setting out of range",
            Self::MissingEventField => "Peg event is missing a required id",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the pegs config.toml and retry."),
            Self::InvalidRole => Some("Use one of ADMIN, UNMETERED, RESET, FINISH, CONFIG."),
            Self::MissingLimit => Some("Set `limit` under [numbers] or pass --limit."),
            Self::InvalidSetting => {
                Some("Settings must be >= 0 and `minimum` must not exceed `limit`.")
            }
            Self::MissingEventField => {
                Some("Re-export the cycle snapshot; every peg needs sender and receiver ids.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Which id field of a [`PegEvent`](crate::model::peg::PegEvent) was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    SenderId,
    ReceiverId,
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SenderId => "sender_id",
            Self::ReceiverId => "receiver_id",
        })
    }
}

/// Errors surfaced by the engine and its configuration layer.
///
/// The engine never returns partial output: any of these aborts the whole
/// computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PegError {
    /// An event in the snapshot has a blank id.
    #[error("peg event #{index} has no {field}")]
    MissingField { index: usize, field: EventField },

    /// Quota was requested for a metered person but no limit is configured.
    #[error("no peg limit configured; cannot compute allowance for '{person_id}'")]
    MissingLimit { person_id: String },

    /// A role name in configuration did not parse.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),

    /// The configuration document is not valid TOML for the expected shape.
    #[error("invalid config: {message}")]
    Config { message: String },

    /// A numeric setting parsed but is out of range.
    #[error("invalid setting '{name}': {message}")]
    InvalidSetting { name: String, message: String },
}

impl PegError {
    /// Stable error code for this failure.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingField { .. } => ErrorCode::MissingEventField,
            Self::MissingLimit { .. } => ErrorCode::MissingLimit,
            Self::InvalidRole(_) => ErrorCode::InvalidRole,
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::InvalidSetting { .. } => ErrorCode::InvalidSetting,
        }
    }

    /// Operator-facing suggestion, falling back to a generic one.
    #[must_use]
    pub fn suggestion(&self) -> String {
        self.error_code()
            .hint()
            .unwrap_or("Check the input snapshot and configuration.")
            .to_string()
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::award::AwardPolicy;
use crate::error::PegError;
use crate::model::Role;
use crate::quota::QuotaPolicy;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PEGS_CONFIG";

/// On-disk shape of `config.toml`. Role names stay strings until validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    numbers: BTreeMap<String, i64>,
    #[serde(default)]
    strings: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    quota: QuotaSection,
    #[serde(default)]
    roles: Vec<RoleGrant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuotaSection {
    #[serde(default = "default_exempt_role")]
    exempt_role: String,
}

impl Default for QuotaSection {
    fn default() -> Self {
        Self {
            exempt_role: default_exempt_role(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoleGrant {
    user_id: String,
    role: String,
}

/// Validated engine configuration.
///
/// Numeric and string setting names are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    numbers: BTreeMap<String, i64>,
    strings: BTreeMap<String, Vec<String>>,
    exempt_role: Role,
    roles: BTreeMap<String, BTreeSet<Role>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            numbers: BTreeMap::new(),
            strings: BTreeMap::new(),
            exempt_role: Role::Unmetered,
            roles: BTreeMap::new(),
        }
    }
}

impl TryFrom<ConfigFile> for EngineConfig {
    type Error = PegError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let exempt_role = file.quota.exempt_role.parse::<Role>()?;

        let mut roles: BTreeMap<String, BTreeSet<Role>> = BTreeMap::new();
        for grant in file.roles {
            let role = grant.role.parse::<Role>()?;
            roles.entry(grant.user_id).or_default().insert(role);
        }

        let numbers: BTreeMap<String, i64> = file
            .numbers
            .into_iter()
            .map(|(name, value)| (setting_key(&name), value))
            .collect();
        validate_numbers(&numbers)?;

        Ok(Self {
            numbers,
            strings: file
                .strings
                .into_iter()
                .map(|(name, values)| (setting_key(&name), values))
                .collect(),
            exempt_role,
            roles,
        })
    }
}

impl EngineConfig {
    /// A numeric setting, if configured.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<i64> {
        self.numbers.get(&setting_key(name)).copied()
    }

    /// A named string list; empty when not configured.
    #[must_use]
    pub fn strings(&self, name: &str) -> &[String] {
        self.strings
            .get(&setting_key(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Per-cycle peg limit (`numbers.limit`).
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        self.number("limit")
    }

    /// Category labels to report, in configured order (`strings.keyword`).
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.strings("keyword")
    }

    #[must_use]
    pub const fn exempt_role(&self) -> Role {
        self.exempt_role
    }

    /// Quota policy from the configured limit and exemption role.
    #[must_use]
    pub fn quota_policy(&self) -> QuotaPolicy {
        QuotaPolicy::new(self.limit()).with_exempt_role(self.exempt_role)
    }

    /// Roles granted to `user_id`; empty when none are configured.
    #[must_use]
    pub fn roles_for(&self, user_id: &str) -> BTreeSet<Role> {
        self.roles.get(user_id).cloned().unwrap_or_default()
    }

    /// Award rules from `numbers.minimum` (default 0) and `numbers.winners`.
    #[must_use]
    pub fn award_policy(&self) -> AwardPolicy {
        AwardPolicy::new(
            self.number("minimum").unwrap_or(0),
            self.number("winners")
                .and_then(|places| usize::try_from(places).ok()),
        )
    }
}

/// Every numeric setting is non-negative, and `minimum` may not exceed `limit`.
fn validate_numbers(numbers: &BTreeMap<String, i64>) -> Result<(), PegError> {
    if let Some((name, value)) = numbers.iter().find(|(_, value)| **value < 0) {
        return Err(PegError::InvalidSetting {
            name: name.clone(),
            message: format!("{value} is below 0"),
        });
    }

    match (numbers.get("minimum"), numbers.get("limit")) {
        (Some(&minimum), Some(&limit)) if minimum > limit => Err(PegError::InvalidSetting {
            name: "minimum".to_string(),
            message: format!("{minimum} is greater than the peg limit {limit}"),
        }),
        _ => Ok(()),
    }
}

/// Parse and validate a TOML config document.
///
/// # Errors
///
/// Returns [`PegError::Config`] for malformed TOML,
/// [`PegError::InvalidRole`] for an unknown role name and
/// [`PegError::InvalidSetting`] for an out-of-range number.
pub fn parse_config(text: &str) -> Result<EngineConfig, PegError> {
    let file = toml::from_str::<ConfigFile>(text).map_err(|err| PegError::Config {
        message: err.to_string(),
    })?;
    EngineConfig::try_from(file)
}

/// Read and validate the config file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or does not validate.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// `<user config dir>/pegs/config.toml`, when the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pegs/config.toml"))
}

/// Resolve the effective configuration.
///
/// Precedence:
/// 1. `explicit` path (must exist)
/// 2. `PEGS_CONFIG` env var (must exist)
/// 3. `<user config dir>/pegs/config.toml` if present
/// 4. built-in defaults
///
/// # Errors
///
/// Fails if a named file is missing or any chosen file does not validate.
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let env_path = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config_inner(explicit, env_path.as_deref(), default_config_path().as_deref())
}

fn resolve_config_inner(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    user_path: Option<&Path>,
) -> Result<EngineConfig> {
    if let Some(path) = explicit.or(env_path) {
        debug!(path = %path.display(), "loading config");
        return load_config(path);
    }

    match user_path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading user config");
            load_config(path)
        }
        _ => {
            debug!("no config file found, using defaults");
            Ok(EngineConfig::default())
        }
    }
}

fn setting_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn default_exempt_role() -> String {
    Role::Unmetered.to_string()
}

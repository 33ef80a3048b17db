//! pegs-core library.
//!
//! Turns a cycle's classified peg events into a ranked leaderboard,
//! per-category boards, and per-person allowances. The engine entry points
//! are pure functions of their inputs; only [`config`] touches the filesystem.
//!
//! # Conventions
//!
//! - **Errors**: engine failures are [`PegError`]; file loading uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod award;
pub mod category;
pub mod config;
pub mod error;
pub mod model;
pub mod quota;
pub mod rank;
pub mod report;

pub use aggregate::{Standings, aggregate};
pub use award::{AwardPolicy, split_winners};
pub use category::{CategorySection, project_all, project_by_category};
pub use config::EngineConfig;
pub use error::{ErrorCode, PegError};
pub use model::{CategoryView, PegEvent, PersonResult, QuotaState, Remaining, Role};
pub use quota::{QuotaPolicy, compute_remaining};
pub use rank::rank;
pub use report::{CycleReport, StatusReport, close_out, status};

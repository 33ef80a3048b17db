//! The peg event record.
//!
//! A [`PegEvent`] is one recognition (or penalty) action, already classified
//! upstream: categories are resolved and the penalty flag is set. Events are
//! immutable once created; the engine only ever reads them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{EventField, PegError};

/// One recognition or penalty action.
///
/// Display names are not join keys: the same id may appear with different
/// names across a cycle. When `is_valid` is `false` the receiver is usually
/// a placeholder sink rather than a tracked participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PegEvent {
    #[serde(alias = "senderId")]
    pub sender_id: String,
    #[serde(alias = "senderName")]
    pub sender_name: String,
    #[serde(alias = "receiverId")]
    pub receiver_id: String,
    #[serde(alias = "receiverName")]
    pub receiver_name: String,
    pub comment: String,
    pub categories: BTreeSet<String>,
    #[serde(alias = "isValid")]
    pub is_valid: bool,
}

impl PegEvent {
    /// True when this event is a penalty against its sender.
    #[must_use]
    pub const fn is_penalty(&self) -> bool {
        !self.is_valid
    }

    /// Case-sensitive exact label match.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Check that both ids are present.
    ///
    /// `index` is the event's position in the snapshot and is carried in the
    /// error so the operator can find the offending record.
    ///
    /// # Errors
    ///
    /// Returns [`PegError::MissingField`] for a blank sender or receiver id.
    pub fn validate(&self, index: usize) -> Result<(), PegError> {
        if self.sender_id.trim().is_empty() {
            return Err(PegError::MissingField {
                index,
                field: EventField::SenderId,
            });
        }
        if self.receiver_id.trim().is_empty() {
            return Err(PegError::MissingField {
                index,
                field: EventField::ReceiverId,
            });
        }
        Ok(())
    }
}

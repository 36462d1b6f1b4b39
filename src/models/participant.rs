//! Participant model.
//!
//! Participants are the people rotating through the duty roster. The
//! engine treats them as opaque: only the identifier matters for
//! constraint matching and assignment; the display name passes through
//! to the caller's rendering layer untouched.

use serde::{Deserialize, Serialize};

/// A member of the duty rotation pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique participant identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Participant {
    /// Creates a new participant.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

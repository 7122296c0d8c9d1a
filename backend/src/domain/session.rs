//! Authenticated-caller identity passed explicitly into every service call.
//!
//! Credential verification belongs to the external identity provider; the
//! backend only ever sees the provider's opaque uid and uses it as the
//! partition key for all stored data.

use anyhow::{anyhow, Result};

/// The caller of one request. Constructed by the IO layer from the
/// authenticated uid and threaded through every service method, so no
/// code path depends on global session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    /// Create a session for the given uid. The uid is opaque; the only
    /// requirement is that it is non-empty.
    pub fn new(user_id: &str) -> Result<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(anyhow!("Session requires a non-empty user id"));
        }
        Ok(Self {
            user_id: user_id.to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

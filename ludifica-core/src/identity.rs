use std::collections::HashSet;

use crate::error::{Error, Result};

pub const CAP_EDIT_OWN_PROFILE: &str = "moodle/user:editownprofile";
pub const CAP_MANAGE: &str = "block/ludifica:manage";

/// The acting user of a request, as resolved by the host session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    /// Zero when nobody is logged in.
    pub user_id: u64,
    pub is_guest: bool,
    pub full_name: String,
    capabilities: HashSet<String>,
}

impl Identity {
    pub fn user(user_id: u64, full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            is_guest: false,
            full_name: full_name.into(),
            capabilities: HashSet::new(),
        }
    }

    pub fn guest(user_id: u64) -> Self {
        Self {
            user_id,
            is_guest: true,
            full_name: "Guest user".to_owned(),
            capabilities: HashSet::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id != 0
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(Error::Forbidden("requireloginerror"))
        }
    }

    pub fn require_capability(&self, capability: &str) -> Result<()> {
        if self.has_capability(capability) {
            Ok(())
        } else {
            Err(Error::Forbidden("nopermissions"))
        }
    }
}

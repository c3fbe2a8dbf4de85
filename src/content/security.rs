//! Access control: permission flags, role rules and the principal they are checked against.

use crate::types::NodeRef;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Role that every principal, including anonymous visitors, holds
pub const EVERYONE: &str = "Everyone";

bitflags! {
    /// Permissions an item can customise away from what it inherits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Permission: u32 {
        const READ = 1;
        const WRITE = 1 << 1;
        const PUBLISH = 1 << 2;
        const ADMINISTER = 1 << 3;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
        const FULL = Self::READ.bits() | Self::WRITE.bits() | Self::PUBLISH.bits() | Self::ADMINISTER.bits();
    }
}

/// The identity an authorization check is made for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub name: String,
    pub roles: Vec<String>,
    pub authenticated: bool,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self {
            name: String::new(),
            roles: Vec::new(),
            authenticated: false,
        }
    }

    pub fn user(name: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            name: name.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            authenticated: true,
        }
    }

    pub fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

/// A role allowed to read an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedRole {
    pub id: i32,
    pub role: String,
    /// The item this rule belongs to
    pub item: Option<NodeRef>,
}

impl AuthorizedRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            id: 0,
            role: role.into(),
            item: None,
        }
    }

    /// Copy of this rule bound to another item
    pub fn rebound_to(&self, item: Option<NodeRef>) -> Self {
        Self {
            id: 0,
            role: self.role.clone(),
            item,
        }
    }

    pub fn is_authorized(&self, principal: &Principal) -> bool {
        self.role.eq_ignore_ascii_case(EVERYONE) || principal.is_in_role(&self.role)
    }
}

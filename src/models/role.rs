use serde::{Deserialize, Serialize};

/// User role. The original system stored these as raw strings and compared
/// them against ad hoc arrays in route guards; here they are an enum and
/// authorization goes through the capability table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Administrator,
    Keuangan,
    Pimpinan,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Keuangan => "keuangan",
            Role::Pimpinan => "pimpinan",
        }
    }
}

/// Privileged operations gated per-route by the capability middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List the audit trail.
    ViewAuditTrails,
    /// List and edit other users' accounts.
    ManageUsers,
}

impl Role {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewAuditTrails => matches!(self, Role::Administrator),
            Capability::ManageUsers => matches!(self, Role::Administrator),
        }
    }
}

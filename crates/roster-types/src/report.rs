use serde::{Deserialize, Serialize};

use crate::{UserId, UserRole};

// ============================================================================
// User snapshot
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub label: String,
    pub description: String,
}

// ============================================================================
// Scenario report
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterReport {
    pub users: Vec<UserRecord>,
    pub capacity: usize,
    pub container_size: usize,
    pub admin_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weak_lookup: Option<String>,
    #[serde(default)]
    pub rejected: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailCheck {
    pub email: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

use std::fmt;
use std::ops::{Deref, DerefMut};

use roster_types::UserRole;
use tracing::debug;

use crate::ids::IdAllocator;
use crate::user::{describe_user, HasRole, Principal, User};

/// An administrator. Always constructed with the `Admin` role and carries an
/// explicit permission list; permission checks consult only that list.
#[derive(Debug)]
pub struct AdminUser {
    user: User,
    permissions: Vec<String>,
}

impl AdminUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new_in(IdAllocator::global(), name, email)
    }

    pub fn new_in(ids: &IdAllocator, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user: User::new_in(ids, name, email, UserRole::Admin),
            permissions: Vec::new(),
        }
    }

    /// Appends `permission`. Duplicates are kept.
    pub fn add_permission(&mut self, permission: impl Into<String>) {
        let permission = permission.into();
        debug!(user = %self.user.id(), %permission, "granting permission");
        self.permissions.push(permission);
    }

    /// Removes every occurrence of `permission`, keeping the order of the
    /// rest. Returns how many entries were dropped.
    pub fn remove_permission(&mut self, permission: &str) -> usize {
        let before = self.permissions.len();
        self.permissions.retain(|p| p != permission);
        let removed = before - self.permissions.len();
        debug!(user = %self.user.id(), permission, removed, "revoking permission");
        removed
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }
}

impl Clone for AdminUser {
    fn clone(&self) -> Self {
        Self {
            user: self.user.clone(),
            permissions: self.permissions.clone(),
        }
    }

    /// Assignment: copies fields and permissions, keeps this admin's id.
    fn clone_from(&mut self, source: &Self) {
        self.user.assign(&source.user);
        self.permissions.clone_from(&source.permissions);
    }
}

impl Deref for AdminUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl DerefMut for AdminUser {
    fn deref_mut(&mut self) -> &mut User {
        &mut self.user
    }
}

impl PartialEq for AdminUser {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user
    }
}

impl Eq for AdminUser {}

impl fmt::Display for AdminUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.user, f)
    }
}

impl HasRole for AdminUser {
    fn role(&self) -> UserRole {
        self.user.role()
    }
}

impl Principal for AdminUser {
    fn user(&self) -> &User {
        &self.user
    }

    fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    fn describe(&self) -> String {
        format!(
            "{}\nPermissions: {}",
            describe_user(&self.user),
            self.permissions.join(" ")
        )
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    fn permissions(&self) -> Option<&[String]> {
        Some(&self.permissions)
    }
}

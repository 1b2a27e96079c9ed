use std::fmt;
use std::hash::{Hash, Hasher};

use roster_types::{UserId, UserInfo, UserRecord, UserRole, DEFAULT_NAME};

use crate::ids::IdAllocator;

/// Anything that carries a role. Used to build role predicates that work on
/// plain users, administrators and shared handles alike.
pub trait HasRole {
    fn role(&self) -> UserRole;
}

/// Behavior shared by every kind of user record.
///
/// Implementors expose their base [`User`]; `describe` and `has_permission`
/// have role-based defaults that specialised records override.
pub trait Principal: fmt::Debug {
    fn user(&self) -> &User;

    fn user_mut(&mut self) -> &mut User;

    /// Human-readable rendering with id, name and email.
    fn describe(&self) -> String {
        describe_user(self.user())
    }

    /// Coarse check: admins may do anything, everyone else nothing.
    fn has_permission(&self, _permission: &str) -> bool {
        self.user().role() == UserRole::Admin
    }

    /// Explicit permission list, for records that keep one.
    fn permissions(&self) -> Option<&[String]> {
        None
    }

    fn to_record(&self) -> UserRecord {
        let user = self.user();
        UserRecord {
            id: user.id(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            role: user.role(),
            active: user.is_active(),
            permissions: self.permissions().map(<[String]>::to_vec),
            label: user.to_string(),
            description: self.describe(),
        }
    }
}

pub(crate) fn describe_user(user: &User) -> String {
    format!(
        "User{{id={}, name={}, email={}}}",
        user.id, user.name, user.email
    )
}

/// A user record. Identity is the id alone: two records are equal iff their
/// ids match, whatever their other fields say.
///
/// Cloning produces a *different* user with a freshly allocated id. Use
/// [`User::assign`] (or `clone_from`) to copy fields while keeping identity.
#[derive(Debug)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    active: bool,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self::new_in(IdAllocator::global(), name, email, role)
    }

    pub fn new_in(
        ids: &IdAllocator,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            email: email.into(),
            role,
            active: true,
        }
    }

    /// A guest with no email, named `placeholder`.
    pub fn placeholder_in(ids: &IdAllocator, placeholder: impl Into<String>) -> Self {
        Self::new_in(ids, placeholder, String::new(), UserRole::Guest)
    }

    pub fn from_info(info: UserInfo) -> Self {
        Self::from_info_in(IdAllocator::global(), info)
    }

    pub fn from_info_in(ids: &IdAllocator, info: UserInfo) -> Self {
        let mut user = Self::new_in(ids, info.name, info.email, info.role);
        user.active = info.active;
        user
    }

    /// Copies every field except the id, which is freshly allocated.
    pub fn duplicate_in(&self, ids: &IdAllocator) -> Self {
        Self {
            id: ids.next_id(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            active: self.active,
        }
    }

    /// Overwrites name, email, role and active flag from `other`. The id is
    /// never touched.
    pub fn assign(&mut self, other: &User) {
        self.name.clone_from(&other.name);
        self.email.clone_from(&other.email);
        self.role = other.role;
        self.active = other.active;
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn info(&self) -> UserInfo {
        UserInfo {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            active: self.active,
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::placeholder_in(IdAllocator::global(), DEFAULT_NAME)
    }
}

impl Clone for User {
    fn clone(&self) -> Self {
        self.duplicate_in(IdAllocator::global())
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({}, {})", self.id, self.name)
    }
}

impl HasRole for User {
    fn role(&self) -> UserRole {
        self.role
    }
}

impl Principal for User {
    fn user(&self) -> &User {
        self
    }

    fn user_mut(&mut self) -> &mut User {
        self
    }
}

//! Reference-counted user handles.
//!
//! A [`Shared`] handle owns its record together with every other clone of the
//! handle; the record is dropped with the last one. Mutation through any
//! handle is visible through all of them. [`WeakShared`] observes a record
//! without keeping it alive.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use roster_types::UserRole;

use crate::user::{HasRole, Principal};

pub type SharedUser = Shared<dyn Principal>;
pub type WeakUser = WeakShared<dyn Principal>;

pub struct Shared<P: ?Sized = dyn Principal> {
    inner: Rc<RefCell<P>>,
}

impl<P: Principal + 'static> Shared<P> {
    pub fn new(value: P) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Converts into a handle over the polymorphic record. Both handles keep
    /// pointing at the same record.
    pub fn into_dyn(self) -> SharedUser {
        let inner: Rc<RefCell<dyn Principal>> = self.inner;
        Shared { inner }
    }

    pub fn to_dyn(&self) -> SharedUser {
        self.clone().into_dyn()
    }
}

impl<P: ?Sized> Shared<P> {
    /// Panics if the record is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, P> {
        self.inner.borrow()
    }

    /// Panics if the record is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, P> {
        self.inner.borrow_mut()
    }

    pub fn downgrade(&self) -> WeakShared<P> {
        WeakShared {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// True when both handles point at the same record.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P: ?Sized> Clone for Shared<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: ?Sized + fmt::Debug> fmt::Debug for Shared<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

impl<P: ?Sized + Principal> fmt::Display for Shared<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.borrow().user(), f)
    }
}

impl<P: ?Sized + Principal> HasRole for Shared<P> {
    fn role(&self) -> UserRole {
        self.borrow().user().role()
    }
}

pub struct WeakShared<P: ?Sized = dyn Principal> {
    inner: Weak<RefCell<P>>,
}

impl<P: ?Sized> WeakShared<P> {
    /// A strong handle, if the record is still alive.
    pub fn upgrade(&self) -> Option<Shared<P>> {
        self.inner.upgrade().map(|inner| Shared { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<P: ?Sized> Clone for WeakShared<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<P: ?Sized> fmt::Debug for WeakShared<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakShared(alive={})", self.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminUser;
    use crate::ids::IdAllocator;
    use crate::user::User;

    #[test]
    fn test_mutation_is_visible_through_every_handle() {
        let ids = IdAllocator::new();
        let first = Shared::new(User::new_in(&ids, "Bob", "bob@example.com", UserRole::User));
        let second = first.clone();

        second.borrow_mut().set_name("Robert");
        assert_eq!(first.borrow().name(), "Robert");
        assert!(first.ptr_eq(&second));
        assert_eq!(first.strong_count(), 2);
    }

    #[test]
    fn test_weak_handle_does_not_keep_record_alive() {
        let ids = IdAllocator::new();
        let strong = Shared::new(User::new_in(&ids, "Bob", "bob@example.com", UserRole::User))
            .into_dyn();
        let weak = strong.downgrade();

        assert!(weak.is_alive());
        let upgraded = weak.upgrade().expect("record should be alive");
        assert_eq!(upgraded.borrow().user().name(), "Bob");
        assert_eq!(strong.strong_count(), 2);

        drop(upgraded);
        drop(strong);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_typed_admin_handle_shares_with_dyn_handle() {
        let ids = IdAllocator::new();
        let admin = Shared::new(AdminUser::new_in(&ids, "Alice", "alice@example.com"));
        let as_user = admin.to_dyn();

        admin.borrow_mut().add_permission("audit");
        assert!(as_user.borrow().has_permission("audit"));
        assert_eq!(as_user.role(), UserRole::Admin);
        assert_eq!(as_user.to_string(), "User(1, Alice)");
        assert_eq!(admin.strong_count(), 2);
    }
}

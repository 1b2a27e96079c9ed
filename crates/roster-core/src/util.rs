use std::collections::BTreeMap;

use fastrace::trace;
use roster_types::{UserId, UserRole};

use crate::error::ValidationError;
use crate::shared::{Shared, SharedUser};
use crate::user::{HasRole, User};

/// Shared users keyed (and ordered) by id.
pub type UserMap = BTreeMap<UserId, SharedUser>;

/// Syntactic check only: an address is accepted iff it contains `@`.
#[trace]
pub fn validate_email(email: &str) -> bool {
    email.contains('@')
}

/// Enforces [`validate_email`], turning a rejected address into an error the
/// caller has to handle.
pub fn enforce_email(email: &str) -> Result<(), ValidationError> {
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Creates a shared user with the `User` role.
#[trace]
pub fn create_user(name: &str, email: &str) -> SharedUser {
    create_user_with_role(name, email, UserRole::User)
}

#[trace]
pub fn create_user_with_role(name: &str, email: &str, role: UserRole) -> SharedUser {
    Shared::new(User::new(name, email, role)).into_dyn()
}

/// Predicate matching values whose role is `role`.
pub fn make_role_filter<T>(role: UserRole) -> impl Fn(&T) -> bool
where
    T: HasRole + ?Sized,
{
    move |value| value.role() == role
}

pub fn index_by_id<'a, I>(users: I) -> UserMap
where
    I: IntoIterator<Item = &'a SharedUser>,
{
    users
        .into_iter()
        .map(|user| (user.borrow().user().id(), user.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminUser;
    use crate::container::BoundedContainer;
    use crate::ids::IdAllocator;

    #[test]
    fn test_validate_email_is_weak() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("@"));
        assert!(validate_email("no-dot@host"));
        assert!(!validate_email("invalid-email"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_enforce_email_reports_rejected_address() {
        assert_eq!(enforce_email("a@b.com"), Ok(()));
        let err = enforce_email("invalid-email").unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("invalid-email".to_string()));
        assert_eq!(err.to_string(), "Invalid email format: invalid-email");
    }

    #[test]
    fn test_setters_through_shared_handle_are_visible_everywhere() {
        let first = create_user("Hank", "hank@example.com");
        let second = first.clone();
        let observer = first.downgrade();

        {
            let mut record = second.borrow_mut();
            let user = record.user_mut();
            user.deactivate();
            user.set_name("Henry");
            user.set_email("henry@example.com");
            user.set_role(UserRole::Moderator);
        }

        assert!(!first.borrow().user().is_active());
        assert_eq!(first.borrow().user().name(), "Henry");
        assert_eq!(first.role(), UserRole::Moderator);

        let upgraded = observer.upgrade().expect("handles are still held");
        assert!(upgraded.ptr_eq(&first));
        assert!(!upgraded.borrow().user().is_active());
        assert_eq!(upgraded.borrow().user().email(), "henry@example.com");

        upgraded.borrow_mut().user_mut().activate();
        assert!(second.borrow().user().is_active());
    }

    #[test]
    fn test_create_user_defaults_to_user_role() {
        let bob = create_user("Bob", "bob@x.com");
        assert_eq!(bob.role(), UserRole::User);
        assert_eq!(bob.borrow().user().name(), "Bob");
        assert!(!bob.borrow().has_permission("read"));
    }

    #[test]
    fn test_created_admin_has_every_permission() {
        let eve = create_user_with_role("Eve", "eve@x.com", UserRole::Admin);
        assert_eq!(eve.role(), UserRole::Admin);
        for permission in ["read", "write", "launch-missiles", ""] {
            assert!(eve.borrow().has_permission(permission));
        }
    }

    #[test]
    fn test_role_filter_on_plain_users() {
        let ids = IdAllocator::new();
        let is_moderator = make_role_filter::<User>(UserRole::Moderator);
        let moderator = User::new_in(&ids, "Mo", "mo@example.com", UserRole::Moderator);
        let guest = User::new_in(&ids, "Gus", "gus@example.com", UserRole::Guest);
        assert!(is_moderator(&moderator));
        assert!(!is_moderator(&guest));

        let is_admin = make_role_filter::<AdminUser>(UserRole::Admin);
        assert!(is_admin(&AdminUser::new_in(&ids, "Alice", "alice@example.com")));
    }

    #[test]
    fn test_role_filter_selects_from_container() {
        let mut container: BoundedContainer<SharedUser> = BoundedContainer::new(10);
        let admin = Shared::new(AdminUser::new("Alice", "alice@example.com")).into_dyn();
        let bob = create_user_with_role("Bob", "bob@example.com", UserRole::Moderator);
        let carl = create_user("Carl", "carl@example.com");
        let dora = create_user("Dora", "dora@example.com");
        for user in [&admin, &bob, &carl, &dora] {
            assert!(container.add(user.clone()));
        }

        let regular = container.filter(make_role_filter::<SharedUser>(UserRole::User));
        assert_eq!(regular.len(), 2);
        assert!(regular[0].ptr_eq(&carl));
        assert!(regular[1].ptr_eq(&dora));

        let admins = container.filter(make_role_filter::<SharedUser>(UserRole::Admin));
        assert_eq!(admins.len(), 1);
        assert!(admins[0].ptr_eq(&admin));

        assert!(container
            .filter(make_role_filter::<SharedUser>(UserRole::Guest))
            .is_empty());
    }

    #[test]
    fn test_index_by_id_orders_by_id() {
        let first = create_user("First", "first@example.com");
        let second = create_user("Second", "second@example.com");
        let map = index_by_id([&second, &first]);

        let ids: Vec<UserId> = map.keys().copied().collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);
        assert!(map[&ids[0]].ptr_eq(&first));
    }
}

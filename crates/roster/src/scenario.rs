use roster_core::{
    create_user, create_user_with_role, enforce_email, make_role_filter, AdminUser,
    BoundedContainer, IdAllocator, Principal, Shared, SharedUser, User, UserRole,
};
use roster_types::{EmailCheck, RosterReport};
use tracing::{info, warn};

pub fn check_emails<S: AsRef<str>>(emails: &[S]) -> Vec<EmailCheck> {
    emails
        .iter()
        .map(|email| {
            let email = email.as_ref();
            let error = enforce_email(email).err().map(|e| e.to_string());
            EmailCheck {
                email: email.to_string(),
                valid: error.is_none(),
                error,
            }
        })
        .collect()
}

/// Builds a small registry, exercises it and reports what it saw.
pub fn run(capacity: usize, placeholder: &str, extra_emails: &[String]) -> RosterReport {
    let mut container: BoundedContainer<SharedUser> = BoundedContainer::new(capacity);
    let mut rejected = 0;

    let admin = Shared::new(AdminUser::new("Alice", "alice@example.com"));
    {
        let mut alice = admin.borrow_mut();
        for permission in ["read", "write", "delete"] {
            alice.add_permission(permission);
        }
    }
    let moderator = create_user_with_role("Bob", "bob@example.com", UserRole::Moderator);
    let regular = create_user("Charlie", "charlie@example.com");
    let walk_in = Shared::new(User::placeholder_in(IdAllocator::global(), placeholder)).into_dyn();

    for user in [admin.to_dyn(), moderator.clone(), regular, walk_in] {
        if !container.add(user) {
            rejected += 1;
        }
    }
    info!(size = container.len(), rejected, "registry populated");

    let mut users = Vec::with_capacity(container.len());
    container.for_each(|user| users.push(user.borrow().to_record()));

    let admin_count = container
        .filter(make_role_filter::<SharedUser>(UserRole::Admin))
        .len();

    let observer = moderator.downgrade();
    let weak_lookup = observer.upgrade().map(|user| {
        let user = user.borrow();
        user.user().name().to_string()
    });

    let first = container.get(0).map(|user| user.to_string());

    let mut errors = Vec::new();
    let candidates = std::iter::once("invalid-email").chain(extra_emails.iter().map(String::as_str));
    for email in candidates {
        if let Err(e) = enforce_email(email) {
            warn!(email, "rejected email");
            errors.push(e.to_string());
        }
    }

    RosterReport {
        users,
        capacity: container.capacity(),
        container_size: container.len(),
        admin_count,
        first,
        weak_lookup,
        rejected,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let report = run(100, "Unknown", &[]);
        assert_eq!(report.container_size, 4);
        assert_eq!(report.capacity, 100);
        assert_eq!(report.admin_count, 1);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.weak_lookup.as_deref(), Some("Bob"));
        assert!(report.first.as_deref().unwrap().ends_with(", Alice)"));
        assert_eq!(report.errors, vec!["Invalid email format: invalid-email"]);

        let names: Vec<&str> = report.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie", "Unknown"]);
        assert_eq!(report.users[2].role, UserRole::User);
        assert_eq!(report.users[3].role, UserRole::Guest);
        assert_eq!(
            report.users[0].permissions.as_deref(),
            Some(&["read".to_string(), "write".to_string(), "delete".to_string()][..])
        );
    }

    #[test]
    fn test_small_capacity_rejects_overflow() {
        let report = run(2, "Unknown", &[]);
        assert_eq!(report.container_size, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.users.len(), 2);
        assert_eq!(report.weak_lookup.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_placeholder_name_and_extra_emails() {
        let extra = vec!["ok@example.com".to_string(), "nope".to_string()];
        let report = run(10, "Anonymous", &extra);
        assert_eq!(report.users.last().unwrap().name, "Anonymous");
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[1].ends_with("nope"));
    }

    #[test]
    fn test_check_emails() {
        let checks = check_emails(&["a@b.com", "invalid-email"]);
        assert!(checks[0].valid);
        assert!(checks[0].error.is_none());
        assert!(!checks[1].valid);
        assert_eq!(
            checks[1].error.as_deref(),
            Some("Invalid email format: invalid-email")
        );
    }
}

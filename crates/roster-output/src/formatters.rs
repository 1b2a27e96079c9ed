use serde::Serialize;

use roster_types::*;

pub fn format_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn format_user_listing(users: &[UserRecord]) -> String {
    users
        .iter()
        .map(|u| u.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_user_details(users: &[UserRecord]) -> String {
    users
        .iter()
        .map(|u| u.description.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_container_summary(size: usize, capacity: usize) -> String {
    format!("Container size: {} (capacity {})", size, capacity)
}

pub fn format_roster_report(report: &RosterReport) -> String {
    let mut lines = Vec::new();

    if !report.users.is_empty() {
        lines.push(format_user_listing(&report.users));
        lines.push(String::new());
        lines.push(format_user_details(&report.users));
        lines.push(String::new());
    }

    lines.push(format!("Admin count: {}", report.admin_count));

    match &report.weak_lookup {
        Some(name) => lines.push(format!("User still exists: {}", name)),
        None => lines.push("User no longer exists".to_string()),
    }

    if let Some(first) = &report.first {
        lines.push(format!("Found user: {}", first));
    }

    lines.push(format_container_summary(report.container_size, report.capacity));

    if report.rejected > 0 {
        lines.push(format!(
            "Rejected {} user(s): container is full",
            report.rejected
        ));
    }

    lines.join("\n")
}

pub fn format_email_checks(checks: &[EmailCheck]) -> String {
    checks
        .iter()
        .map(|check| {
            if check.valid {
                format!("{}: valid", check.email)
            } else {
                format!("{}: invalid", check.email)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

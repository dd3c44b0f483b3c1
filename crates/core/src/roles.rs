//! Well-known role name constants and capability predicates.
//!
//! Role names must match the seed data in
//! `20260405000001_create_users_table.sql`.

/// Full administrative access.
pub const ROLE_ADMIN: &str = "admin";

/// Eligible to be assigned sub-workflow tasks (catering, room, flyer).
pub const ROLE_LEAD: &str = "lead";

/// Regular member with no special capability.
pub const ROLE_MEMBER: &str = "member";

/// Authorized to decide catering approvals.
pub const ROLE_FINANCE: &str = "finance";

/// Authorized to mark catering payments as paid.
pub const ROLE_PAYMENT_ADMIN: &str = "payment_admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_LEAD,
    ROLE_MEMBER,
    ROLE_FINANCE,
    ROLE_PAYMENT_ADMIN,
];

/// Whether the role may move a catering record out of `AWAITING_APPROVAL`.
pub fn can_decide_catering(role: &str) -> bool {
    role == ROLE_FINANCE || role == ROLE_ADMIN
}

/// Whether the role may mark a catering payment as `PAID`.
///
/// Finance approvers double as payment processors in small deployments, so
/// both capabilities accept the payment.
pub fn can_mark_paid(role: &str) -> bool {
    role == ROLE_PAYMENT_ADMIN || role == ROLE_FINANCE || role == ROLE_ADMIN
}

/// Whether a user with this role may be assigned a sub-workflow task.
pub fn is_assignable(role: &str) -> bool {
    role == ROLE_LEAD
}

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

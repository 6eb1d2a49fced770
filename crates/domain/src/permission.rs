//! Permissions carried by users and checked on every protected route.
//!
//! A permission is written `<resource>.<access>` where `resource` is the
//! route segment after `/api/` (e.g. `buildings`) and `access` is `read` or
//! `write`. Either half may be `*`, and a bare `*` grants everything.

use std::fmt;

use crate::error::ValidationError;

/// The kind of access a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the permission required for `access` on `resource`.
#[must_use]
pub fn required(resource: &str, access: Access) -> String {
    format!("{resource}.{access}")
}

/// Check that `permission` is well formed.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPermission`] otherwise.
pub fn validate(permission: &str) -> Result<(), ValidationError> {
    if permission == "*" {
        return Ok(());
    }
    let invalid = || ValidationError::InvalidPermission(permission.to_string());
    let (resource, access) = permission.split_once('.').ok_or_else(invalid)?;
    let resource_ok = resource == "*"
        || (!resource.is_empty()
            && resource
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-' || c == '_'));
    let access_ok = matches!(access, "*" | "read" | "write");
    if resource_ok && access_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Whether the `granted` permission covers the concrete `required` one.
#[must_use]
pub fn grants(granted: &str, required: &str) -> bool {
    if granted == "*" || granted == required {
        return true;
    }
    let (Some((g_res, g_acc)), Some((r_res, r_acc))) =
        (granted.split_once('.'), required.split_once('.'))
    else {
        return false;
    };
    (g_res == "*" || g_res == r_res) && (g_acc == "*" || g_acc == r_acc)
}

/// Whether any permission in `granted` covers `required`.
#[must_use]
pub fn any_grants<S: AsRef<str>>(granted: &[S], required: &str) -> bool {
    granted.iter().any(|g| grants(g.as_ref(), required))
}

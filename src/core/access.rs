//! Edit-permission rule for meals, recipes, lists, and templates.
//!
//! A [`Principal`] carries the caller's identity together with the two
//! session-local toggles (admin mode and impersonation). The toggles are
//! plain fields threaded into every call; nothing here reads ambient state.
//!
//! Branches are evaluated in order and the first match decides:
//!
//! 1. admin + impersonating `X`: allowed iff the resource owner is exactly `X`
//! 2. admin + admin mode: always allowed
//! 3. otherwise: allowed iff caller and owner are both present, non-empty, and equal
//!
//! Impersonation is checked before admin mode so that an admin acting as an
//! ordinary user never keeps the admin override.
//!
//! ```rust
//! use meal_queue_core::core::access::{compute_can_edit, Principal};
//!
//! let admin = Principal::user("admin-1")
//!     .as_admin()
//!     .with_admin_mode(true)
//!     .impersonating("owner-1");
//! assert!(compute_can_edit(&admin, Some("owner-1")));
//! assert!(!compute_can_edit(&admin, Some("someone-else")));
//! ```

use serde::{Deserialize, Serialize};

use crate::util::serde::UserId;

/// The acting identity for an authorization check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Authenticated caller, absent when unauthenticated.
    pub current_user_id: Option<UserId>,
    /// Whether the caller's account has administrative privilege.
    pub is_admin: bool,
    /// Session-local admin override. Only meaningful when `is_admin` is set.
    pub admin_mode_active: bool,
    /// Identity the caller is acting as for ownership checks.
    pub impersonated_user_id: Option<UserId>,
}

impl Principal {
    /// An unauthenticated caller.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An ordinary authenticated user.
    #[must_use]
    pub fn user(id: impl Into<UserId>) -> Self {
        Self {
            current_user_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Mark the caller's account as administrative.
    #[must_use]
    pub const fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Set the admin-mode toggle.
    #[must_use]
    pub const fn with_admin_mode(mut self, active: bool) -> Self {
        self.admin_mode_active = active;
        self
    }

    /// Act as another user for ownership checks.
    #[must_use]
    pub fn impersonating(mut self, id: impl Into<UserId>) -> Self {
        self.impersonated_user_id = Some(id.into());
        self
    }

    /// Stop impersonating.
    #[must_use]
    pub fn clear_impersonation(mut self) -> Self {
        self.impersonated_user_id = None;
        self
    }

    /// The identity ownership is compared against: the impersonated user
    /// for an impersonating admin, the caller otherwise.
    #[must_use]
    pub fn effective_user_id(&self) -> Option<&str> {
        match (&self.impersonated_user_id, self.is_admin) {
            (Some(target), true) => Some(target.as_str()),
            _ => self.current_user_id.as_deref(),
        }
    }

    /// Whether this principal may edit `resource`.
    #[must_use]
    pub fn can_edit<R: Owned + ?Sized>(&self, resource: &R) -> bool {
        compute_can_edit(self, resource.owner_id())
    }
}

/// Anything with an optional owning user.
pub trait Owned {
    /// Owner of the resource, if it has one.
    fn owner_id(&self) -> Option<&str>;
}

/// A bare resource reference carrying only its owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Owner of the resource.
    pub owner_id: Option<UserId>,
}

impl Resource {
    /// Resource owned by `owner`.
    #[must_use]
    pub fn owned_by(owner: impl Into<UserId>) -> Self {
        Self {
            owner_id: Some(owner.into()),
        }
    }
}

impl Owned for Resource {
    fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }
}

/// Which branch of the rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPath {
    /// Admin impersonating another user; owner compared to the impersonated id.
    Impersonation,
    /// Admin with admin mode on.
    AdminMode,
    /// Caller owns the resource.
    Ownership,
    /// No branch granted access.
    Denied,
}

/// Result of evaluating the edit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether editing is allowed.
    pub allowed: bool,
    /// Branch that decided.
    pub path: AccessPath,
}

/// Evaluate the edit rule and report which branch decided.
#[must_use]
pub fn decide(principal: &Principal, resource_owner_id: Option<&str>) -> AccessDecision {
    if principal.is_admin {
        if let Some(target) = principal.impersonated_user_id.as_deref() {
            let allowed = resource_owner_id == Some(target);
            return AccessDecision {
                allowed,
                path: if allowed {
                    AccessPath::Impersonation
                } else {
                    AccessPath::Denied
                },
            };
        }
        if principal.admin_mode_active {
            return AccessDecision {
                allowed: true,
                path: AccessPath::AdminMode,
            };
        }
    }

    let owns = match (principal.current_user_id.as_deref(), resource_owner_id) {
        (Some(user), Some(owner)) => !user.is_empty() && !owner.is_empty() && user == owner,
        _ => false,
    };
    AccessDecision {
        allowed: owns,
        path: if owns {
            AccessPath::Ownership
        } else {
            AccessPath::Denied
        },
    }
}

/// Whether `principal` may edit or delete a resource owned by `resource_owner_id`.
///
/// Never fails: missing identities resolve to `false`.
#[must_use]
pub fn compute_can_edit(principal: &Principal, resource_owner_id: Option<&str>) -> bool {
    let decision = decide(principal, resource_owner_id);
    tracing::debug!(
        allowed = decision.allowed,
        path = ?decision.path,
        "edit access evaluated"
    );
    decision.allowed
}

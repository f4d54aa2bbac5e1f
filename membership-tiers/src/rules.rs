//! Transition rule table.
//!
//! Each tier accepts a fixed set of target identifiers. Any other target, including
//! the tier's own identifier, zero, and anything out of range, is a silent no-op:
//! the current tier comes back unchanged and no error is raised.
//!
//! ```text
//! current   valid targets
//! -------   -------------
//! free      1 2 3 4
//! basic       2 3 4
//! family    1   3 4
//! offline   1 2   4
//! pro       1 2 3
//! ```
//!
//! No row reaches Free. The only way back to Free is cancellation.

use std::sync::Arc;

use crate::{
    catalog::{TierKind, build},
    membership::Tier,
};

const FREE_TARGETS: &[u8] = &[1, 2, 3, 4];
const BASIC_TARGETS: &[u8] = &[2, 3, 4];
const FAMILY_TARGETS: &[u8] = &[1, 3, 4];
const OFFLINE_TARGETS: &[u8] = &[1, 2, 4];
const PRO_TARGETS: &[u8] = &[1, 2, 3];

/// Returns the target identifiers `current` may transition to.
#[must_use]
pub const fn valid_targets(current: TierKind) -> &'static [u8] {
    match current {
        TierKind::Free => FREE_TARGETS,
        TierKind::Basic => BASIC_TARGETS,
        TierKind::Family => FAMILY_TARGETS,
        TierKind::Offline => OFFLINE_TARGETS,
        TierKind::Pro => PRO_TARGETS,
    }
}

/// Checks whether `current` may transition to `target_id`.
///
/// # Examples
///
/// ```
/// use membership_tiers::{catalog::TierKind, rules::is_valid};
///
/// assert!(is_valid(TierKind::Basic, 4));
/// assert!(!is_valid(TierKind::Basic, 1));
/// assert!(!is_valid(TierKind::Pro, 0));
/// ```
#[must_use]
pub fn is_valid(current: TierKind, target_id: i64) -> bool {
    u8::try_from(target_id).is_ok_and(|id| valid_targets(current).contains(&id))
}

/// Applies the rule table to `current`.
///
/// Returns `current` untouched when the target is not allowed, otherwise a freshly
/// built tier sharing the same identity.
#[must_use]
pub fn apply(current: Tier, target_id: i64) -> Tier {
    if !is_valid(current.kind(), target_id) {
        return current;
    }

    // Valid targets are always buildable, so the error arm only guards the table.
    match build(target_id, Arc::clone(current.identity())) {
        Ok(next) => next,
        Err(_) => current,
    }
}

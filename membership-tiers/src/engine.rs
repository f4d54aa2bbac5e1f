//! Tier transition engine: the public call surface.
//!
//! Every function here is pure and synchronous. Changes take the current tier by
//! value and hand back its successor; cancellation borrows it, so the caller keeps
//! the tier when the cancel is rejected. There is nothing to lock even when
//! independent callers process different subscribers in parallel.

use tracing::{debug, info, instrument, warn};

use crate::{
    error::Result,
    membership::{Membership, Tier},
    rules,
};

/// Signs up a new subscriber on the Free tier.
///
/// # Examples
///
/// ```
/// use membership_tiers::{catalog::TierKind, new_free_tier};
///
/// let tier = new_free_tier("correo@prueba.cl", "123 456 789");
/// assert_eq!(tier.kind(), TierKind::Free);
/// assert_eq!(tier.email(), "correo@prueba.cl");
/// ```
#[instrument(skip_all)]
pub fn new_free_tier(email: impl Into<String>, card_number: impl Into<String>) -> Tier {
    let membership = Membership::signup(email, card_number);
    info!(
        subscriber = %membership.identity().redacted_email(),
        "subscriber signed up on free tier"
    );
    membership.into_tier()
}

/// Requests a transition of `current` to the tier identified by `target_id`.
///
/// If the rule table for the current tier does not list `target_id`, the very same
/// tier is returned. This is not an error: out-of-policy requests are silent no-ops.
///
/// # Examples
///
/// ```
/// use membership_tiers::{catalog::TierKind, change_tier, new_free_tier};
///
/// let basic = change_tier(new_free_tier("correo@prueba.cl", "123 456 789"), 1);
/// assert_eq!(basic.kind(), TierKind::Basic);
///
/// // Basic cannot request Basic again.
/// let still_basic = change_tier(basic.clone(), 1);
/// assert_eq!(still_basic, basic);
/// ```
#[must_use]
#[instrument(
    skip(current),
    fields(from = %current.kind(), subscriber = %current.identity().redacted_email())
)]
pub fn change_tier(current: Tier, target_id: i64) -> Tier {
    let from = current.kind();
    let next = rules::apply(current, target_id);

    if next.kind() == from {
        debug!(allowed = ?rules::valid_targets(from), "transition rejected, tier unchanged");
    } else {
        info!(to = %next.kind(), cost = next.cost(), "tier changed");
    }
    next
}

/// Cancels a paid tier, returning a Free tier with the same identity.
///
/// `current` is only borrowed: on success the caller replaces it with the returned
/// Free tier, on failure it is still there to keep using.
///
/// # Errors
///
/// Returns [`TierError::UnsupportedOperation`](crate::TierError::UnsupportedOperation)
/// when `current` is already Free.
///
/// # Examples
///
/// ```
/// use membership_tiers::{TierError, cancel_tier, catalog::TierKind, change_tier, new_free_tier};
///
/// let free = new_free_tier("correo@prueba.cl", "123 456 789");
/// assert!(matches!(cancel_tier(&free), Err(TierError::UnsupportedOperation { .. })));
///
/// let pro = change_tier(free, 4);
/// assert_eq!(cancel_tier(&pro)?.kind(), TierKind::Free);
/// # Ok::<(), TierError>(())
/// ```
#[instrument(
    skip(current),
    fields(from = %current.kind(), subscriber = %current.identity().redacted_email())
)]
pub fn cancel_tier(current: &Tier) -> Result<Tier> {
    match current.cancelled() {
        Ok(free) => {
            info!("tier cancelled, back on free");
            Ok(free.into_tier())
        }
        Err(err) => {
            warn!(error = %err, "cancellation rejected");
            Err(err)
        }
    }
}

/// Returns the cost of `tier`.
#[must_use]
pub fn cost(tier: &Tier) -> u32 {
    tier.cost()
}

/// Returns the device limit of `tier`.
#[must_use]
pub fn device_limit(tier: &Tier) -> u32 {
    tier.device_limit()
}

/// Returns the subscriber email of `tier`.
#[must_use]
pub fn email(tier: &Tier) -> &str {
    tier.email()
}

/// Returns the subscriber card number of `tier`.
#[must_use]
pub fn card_number(tier: &Tier) -> &str {
    tier.card_number()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{catalog::TierKind, error::TierError, identity::SubscriberIdentity};

    const EMAIL: &str = "correo@prueba.cl";
    const CARD: &str = "123 456 789";

    #[test]
    fn test_new_free_tier_attributes() {
        let tier = new_free_tier(EMAIL, CARD);
        assert_eq!(tier.kind(), TierKind::Free);
        assert_eq!(cost(&tier), 0);
        assert_eq!(device_limit(&tier), 1);
        assert_eq!(email(&tier), EMAIL);
        assert_eq!(card_number(&tier), CARD);
    }

    #[test]
    fn test_change_tier_from_free_to_each_target() {
        for (id, kind) in
            [(1, TierKind::Basic), (2, TierKind::Family), (3, TierKind::Offline), (4, TierKind::Pro)]
        {
            let tier = change_tier(new_free_tier(EMAIL, CARD), id);
            assert_eq!(tier.kind(), kind);
        }
    }

    #[test]
    fn test_change_tier_rejected_returns_same_value() {
        let family = change_tier(new_free_tier(EMAIL, CARD), 2);
        let identity = Arc::clone(family.identity());
        let expected = family.clone();

        let after = change_tier(family, 2);

        assert_eq!(after, expected);
        assert!(Arc::ptr_eq(after.identity(), &identity));
    }

    #[test]
    fn test_change_tier_never_reaches_free() {
        for kind in TierKind::ALL.into_iter().filter(|k| k.is_paid()) {
            for id in -2..=6 {
                let tier = Tier::with_kind(kind, SubscriberIdentity::shared(EMAIL, CARD));
                assert_ne!(change_tier(tier, id).kind(), TierKind::Free);
            }
        }
    }

    #[test]
    fn test_cancel_tier_on_free_fails() {
        let err = cancel_tier(&new_free_tier(EMAIL, CARD)).unwrap_err();
        assert_eq!(
            err,
            TierError::UnsupportedOperation { operation: "cancel", tier: TierKind::Free }
        );
    }

    #[test]
    fn test_cancel_tier_rejected_keeps_free_tier() {
        let free = new_free_tier(EMAIL, CARD);
        let identity = Arc::clone(free.identity());

        assert!(cancel_tier(&free).is_err());

        assert_eq!(free.kind(), TierKind::Free);
        assert!(Arc::ptr_eq(free.identity(), &identity));
        let basic = change_tier(free, 1);
        assert_eq!(basic.kind(), TierKind::Basic);
        assert!(Arc::ptr_eq(basic.identity(), &identity));
    }

    #[test]
    fn test_cancel_tier_lands_on_free() {
        for id in 1..=4 {
            let paid = change_tier(new_free_tier(EMAIL, CARD), id);
            let free = cancel_tier(&paid).unwrap();
            assert_eq!(free.kind(), TierKind::Free);
            assert_eq!(free.cost(), 0);
            assert_eq!(free.device_limit(), 1);
            assert_eq!(free.email(), EMAIL);
            assert_eq!(free.card_number(), CARD);
        }
    }

    #[test]
    fn test_tier_methods_delegate_to_engine() {
        let pro = new_free_tier(EMAIL, CARD).change(4);
        assert_eq!(pro.kind(), TierKind::Pro);
        let free = pro.cancel().unwrap();
        assert_eq!(free.kind(), TierKind::Free);
        assert!(free.cancel().is_err());
    }
}

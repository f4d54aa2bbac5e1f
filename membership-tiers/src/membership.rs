//! Membership tiers using typestate pattern.
//!
//! [`Membership<L>`] tracks the tier level in its type, so operations a level does not
//! offer are compile-time errors. You cannot call `cancel()` on a `Membership<Free>`.
//!
//! [`Tier`] is the runtime counterpart, used when the level is only known after a
//! transition has been evaluated against the rule table.

use std::{fmt, marker::PhantomData, sync::Arc};

use serde::Serialize;

use crate::{
    catalog::{Perks, TierKind},
    error::{Result, TierError},
    identity::SubscriberIdentity,
};

// ============================================================================
// Level Marker Types (Zero-Sized)
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// A tier level usable as the type parameter of [`Membership`].
///
/// Sealed: the set of levels is closed.
pub trait Level: sealed::Sealed + fmt::Debug + Clone + Copy + PartialEq + Eq {
    /// Catalog entry for this level.
    const KIND: TierKind;

    /// Wraps a typed membership into the runtime [`Tier`].
    fn into_tier(membership: Membership<Self>) -> Tier;
}

/// Levels at or above Basic. Only these can be cancelled.
pub trait PaidLevel: Level {}

macro_rules! levels {
    (@paid $name:ident paid) => { impl PaidLevel for $name {} };
    (@paid $name:ident free) => {};
    ($($(#[$doc:meta])* $name:ident => $paid:tt;)+) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl Level for $name {
                const KIND: TierKind = TierKind::$name;

                fn into_tier(membership: Membership<Self>) -> Tier {
                    Tier::$name(membership)
                }
            }

            levels!(@paid $name $paid);
        )+
    };
}

levels! {
    /// Free level - no cost, single device.
    Free => free;
    /// Basic level.
    Basic => paid;
    /// Family level.
    Family => paid;
    /// Offline level.
    Offline => paid;
    /// Pro level.
    Pro => paid;
}

// ============================================================================
// Membership with Typestate
// ============================================================================

/// Membership instance with compile-time level tracking.
///
/// # State Machine
///
/// ```text
/// Free ── change(1..=4) ──► Basic / Family / Offline / Pro ◄─┐
///  ▲                              │       │                   │
///  └─────────── cancel() ─────────┘       └── change(rule) ───┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership<L> {
    /// Shared subscriber identity.
    identity: Arc<SubscriberIdentity>,
    /// Gift days derived when this membership was built.
    gift_days: Option<u32>,
    /// Phantom marker for level.
    _level: PhantomData<L>,
}

impl<L: Level> Membership<L> {
    /// Creates a membership at level `L` for an existing identity.
    #[must_use]
    pub fn with_identity(identity: Arc<SubscriberIdentity>) -> Self {
        Self { identity, gift_days: L::KIND.gift_days(), _level: PhantomData }
    }

    /// Returns the catalog entry for this level.
    #[must_use]
    pub fn kind(&self) -> TierKind {
        L::KIND
    }

    /// Returns the tier cost.
    #[must_use]
    pub fn cost(&self) -> u32 {
        L::KIND.cost()
    }

    /// Returns the maximum number of devices.
    #[must_use]
    pub fn device_limit(&self) -> u32 {
        L::KIND.device_limit()
    }

    /// Returns the perks of this level.
    #[must_use]
    pub fn perks(&self) -> Perks {
        L::KIND.perks()
    }

    /// Returns the shared subscriber identity.
    #[must_use]
    pub fn identity(&self) -> &Arc<SubscriberIdentity> {
        &self.identity
    }

    /// Returns the subscriber email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.identity.email()
    }

    /// Returns the subscriber card number.
    #[must_use]
    pub fn card_number(&self) -> &str {
        self.identity.card_number()
    }

    /// Erases the level into a runtime [`Tier`].
    #[must_use]
    pub fn into_tier(self) -> Tier {
        L::into_tier(self)
    }
}

// --- Free Level Methods ---

impl Membership<Free> {
    /// Signs up a new subscriber on the Free level.
    #[must_use]
    pub fn signup(email: impl Into<String>, card_number: impl Into<String>) -> Self {
        Self::with_identity(SubscriberIdentity::shared(email, card_number))
    }
}

// --- Paid Level Methods ---

impl<L: PaidLevel> Membership<L> {
    /// Cancels the membership, returning to Free with the same identity.
    #[must_use]
    pub fn cancel(self) -> Membership<Free> {
        Membership::with_identity(self.identity)
    }
}

// ============================================================================
// Runtime Tier
// ============================================================================

/// Membership whose level is determined at runtime.
///
/// Exactly one variant is active. Changes consume the tier and return its successor,
/// which is either a new variant or the same value untouched. Cancellation borrows
/// the tier, so a rejected cancel leaves it in the caller's hands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    /// Free tier.
    Free(Membership<Free>),
    /// Basic tier.
    Basic(Membership<Basic>),
    /// Family tier.
    Family(Membership<Family>),
    /// Offline tier.
    Offline(Membership<Offline>),
    /// Pro tier.
    Pro(Membership<Pro>),
}

impl Tier {
    /// Builds the tier of the given kind for an existing identity.
    #[must_use]
    pub fn with_kind(kind: TierKind, identity: Arc<SubscriberIdentity>) -> Self {
        match kind {
            TierKind::Free => Self::Free(Membership::with_identity(identity)),
            TierKind::Basic => Self::Basic(Membership::with_identity(identity)),
            TierKind::Family => Self::Family(Membership::with_identity(identity)),
            TierKind::Offline => Self::Offline(Membership::with_identity(identity)),
            TierKind::Pro => Self::Pro(Membership::with_identity(identity)),
        }
    }

    /// Returns the active tier variant.
    #[must_use]
    pub fn kind(&self) -> TierKind {
        match self {
            Self::Free(_) => TierKind::Free,
            Self::Basic(_) => TierKind::Basic,
            Self::Family(_) => TierKind::Family,
            Self::Offline(_) => TierKind::Offline,
            Self::Pro(_) => TierKind::Pro,
        }
    }

    /// Returns the shared subscriber identity.
    #[must_use]
    pub fn identity(&self) -> &Arc<SubscriberIdentity> {
        match self {
            Self::Free(m) => m.identity(),
            Self::Basic(m) => m.identity(),
            Self::Family(m) => m.identity(),
            Self::Offline(m) => m.identity(),
            Self::Pro(m) => m.identity(),
        }
    }

    #[cfg(test)]
    fn gift_days(&self) -> Option<u32> {
        match self {
            Self::Free(m) => m.gift_days,
            Self::Basic(m) => m.gift_days,
            Self::Family(m) => m.gift_days,
            Self::Offline(m) => m.gift_days,
            Self::Pro(m) => m.gift_days,
        }
    }

    /// Returns the tier cost.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.kind().cost()
    }

    /// Returns the maximum number of devices.
    #[must_use]
    pub fn device_limit(&self) -> u32 {
        self.kind().device_limit()
    }

    /// Returns the perks of the active tier.
    #[must_use]
    pub fn perks(&self) -> Perks {
        self.kind().perks()
    }

    /// Returns the subscriber email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.identity().email()
    }

    /// Returns the subscriber card number.
    #[must_use]
    pub fn card_number(&self) -> &str {
        self.identity().card_number()
    }

    /// Requests a transition to `target_id`. See [`change_tier`](crate::change_tier).
    #[must_use]
    pub fn change(self, target_id: i64) -> Self {
        crate::engine::change_tier(self, target_id)
    }

    /// Cancels the tier. See [`cancel_tier`](crate::cancel_tier).
    ///
    /// The receiver is borrowed, so a rejected cancel leaves it usable.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::UnsupportedOperation`] on a Free tier.
    pub fn cancel(&self) -> Result<Self> {
        crate::engine::cancel_tier(self)
    }

    /// Downgrades a paid tier to Free without logging.
    pub(crate) fn cancelled(&self) -> Result<Membership<Free>> {
        match self {
            Self::Free(_) => {
                Err(TierError::UnsupportedOperation { operation: "cancel", tier: TierKind::Free })
            }
            Self::Basic(m) => Ok(m.clone().cancel()),
            Self::Family(m) => Ok(m.clone().cancel()),
            Self::Offline(m) => Ok(m.clone().cancel()),
            Self::Pro(m) => Ok(m.clone().cancel()),
        }
    }

    /// Returns a serializable view of the tier. The card number is left out.
    #[must_use]
    pub fn snapshot(&self) -> TierSnapshot {
        TierSnapshot {
            tier: self.kind(),
            cost: self.cost(),
            device_limit: self.device_limit(),
            email: self.email().to_owned(),
        }
    }
}

impl<L: Level> From<Membership<L>> for Tier {
    fn from(membership: Membership<L>) -> Self {
        membership.into_tier()
    }
}

/// Serializable view of a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSnapshot {
    /// Active tier.
    pub tier: TierKind,
    /// Tier cost.
    pub cost: u32,
    /// Maximum number of devices.
    pub device_limit: u32,
    /// Subscriber email.
    pub email: String,
}

#[cfg(test)]
#[allow(
    clippy::unreachable,
    reason = "Test code uses unreachable! for invalid variant assertions"
)]
mod tests {
    use super::*;

    // ========================================================================
    // Test Helpers
    // ========================================================================

    fn create_test_identity() -> Arc<SubscriberIdentity> {
        SubscriberIdentity::shared("correo@prueba.cl", "123 456 789")
    }

    // ========================================================================
    // Typestate Tests
    // ========================================================================

    #[test]
    fn test_signup_is_free() {
        let free = Membership::signup("correo@prueba.cl", "123 456 789");
        assert_eq!(free.kind(), TierKind::Free);
        assert_eq!(free.cost(), 0);
        assert_eq!(free.device_limit(), 1);
        assert_eq!(free.gift_days, None);
    }

    #[test]
    fn test_gift_days_derived_on_construction() {
        let identity = create_test_identity();
        assert_eq!(Membership::<Basic>::with_identity(Arc::clone(&identity)).gift_days, None);
        assert_eq!(Membership::<Family>::with_identity(Arc::clone(&identity)).gift_days, Some(7));
        assert_eq!(Membership::<Offline>::with_identity(Arc::clone(&identity)).gift_days, Some(7));
        assert_eq!(Membership::<Pro>::with_identity(identity).gift_days, Some(15));
    }

    #[test]
    fn test_paid_cancel_returns_free_with_same_identity() {
        let identity = create_test_identity();
        let pro = Membership::<Pro>::with_identity(Arc::clone(&identity));

        let free = pro.cancel();

        assert_eq!(free.kind(), TierKind::Free);
        assert_eq!(free.gift_days, None);
        assert!(Arc::ptr_eq(free.identity(), &identity));
    }

    #[test]
    fn test_membership_accessors() {
        let family = Membership::<Family>::with_identity(create_test_identity());
        assert_eq!(family.email(), "correo@prueba.cl");
        assert_eq!(family.card_number(), "123 456 789");
        assert_eq!(family.cost(), 5000);
        assert!(family.perks().parental_controls);
    }

    #[test]
    fn test_into_tier_matches_level() {
        let tier: Tier = Membership::<Offline>::with_identity(create_test_identity()).into();
        match tier {
            Tier::Offline(m) => assert_eq!(m.device_limit(), 2),
            _ => unreachable!("Expected Offline tier"),
        }
    }

    // ========================================================================
    // Runtime Tier Tests
    // ========================================================================

    #[test]
    fn test_with_kind_matches_kind() {
        for kind in TierKind::ALL {
            let tier = Tier::with_kind(kind, create_test_identity());
            assert_eq!(tier.kind(), kind);
            assert_eq!(tier.cost(), kind.cost());
            assert_eq!(tier.device_limit(), kind.device_limit());
            assert_eq!(tier.gift_days(), kind.gift_days());
        }
    }

    #[test]
    fn test_cancelled_on_free_is_unsupported() {
        let tier = Tier::with_kind(TierKind::Free, create_test_identity());
        let err = tier.cancelled().unwrap_err();
        assert_eq!(
            err,
            TierError::UnsupportedOperation { operation: "cancel", tier: TierKind::Free }
        );
    }

    #[test]
    fn test_cancelled_on_each_paid_tier() {
        for kind in TierKind::ALL.into_iter().filter(|k| k.is_paid()) {
            let identity = create_test_identity();
            let tier = Tier::with_kind(kind, Arc::clone(&identity));
            let free = tier.cancelled().unwrap();
            assert_eq!(free.cost(), 0);
            assert!(Arc::ptr_eq(free.identity(), &identity));
        }
    }

    // ========================================================================
    // Snapshot Serialization Tests
    // ========================================================================

    #[test]
    fn test_snapshot_pro_serialization() {
        let tier = Tier::with_kind(TierKind::Pro, create_test_identity());
        let json = serde_json::to_value(tier.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "tier": "pro",
                "cost": 7000,
                "device_limit": 6,
                "email": "correo@prueba.cl",
            })
        );
    }

    #[test]
    fn test_snapshot_never_carries_card_or_gift_days() {
        for kind in TierKind::ALL {
            let tier = Tier::with_kind(kind, create_test_identity());
            let json = serde_json::to_string(&tier.snapshot()).unwrap();
            assert!(!json.contains("gift_days"), "{kind} snapshot leaked gift days");
            assert!(!json.contains("123 456 789"), "{kind} snapshot leaked card number");
        }
    }

    #[test]
    fn test_cancelled_borrows_and_leaves_tier_intact() {
        let identity = create_test_identity();
        let free = Tier::with_kind(TierKind::Free, Arc::clone(&identity));

        assert!(free.cancelled().is_err());

        assert_eq!(free.kind(), TierKind::Free);
        assert!(Arc::ptr_eq(free.identity(), &identity));
    }
}

//! Tier catalog: the closed set of membership tiers and their static attributes.
//!
//! | Tier    | id | cost | devices |
//! |---------|----|------|---------|
//! | Free    | -  | 0    | 1       |
//! | Basic   | 1  | 3000 | 2       |
//! | Family  | 2  | 5000 | 5       |
//! | Offline | 3  | 3500 | 2       |
//! | Pro     | 4  | 7000 | 6       |
//!
//! Offline has no device allowance of its own and shares Basic's limit of 2.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TierError},
    identity::SubscriberIdentity,
    membership::Tier,
};

/// Membership tier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    /// Free tier. Has no identifier; reached only by signup or cancellation.
    Free,
    /// Basic paid tier (id 1).
    Basic,
    /// Family tier (id 2) with parental controls.
    Family,
    /// Offline tier (id 3) with offline downloads.
    Offline,
    /// Pro tier (id 4) combining Family and Offline perks.
    Pro,
}

impl TierKind {
    /// Every tier, Free first and then in identifier order.
    pub const ALL: [Self; 5] = [Self::Free, Self::Basic, Self::Family, Self::Offline, Self::Pro];

    /// Resolves a numeric target identifier to a buildable tier.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::InvalidTierIdentifier`] for anything outside `1..=4`.
    pub const fn from_id(id: i64) -> Result<Self> {
        match id {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Family),
            3 => Ok(Self::Offline),
            4 => Ok(Self::Pro),
            _ => Err(TierError::InvalidTierIdentifier(id)),
        }
    }

    /// Returns the numeric identifier used to request this tier, `None` for Free.
    #[must_use]
    pub const fn id(self) -> Option<u8> {
        match self {
            Self::Free => None,
            Self::Basic => Some(1),
            Self::Family => Some(2),
            Self::Offline => Some(3),
            Self::Pro => Some(4),
        }
    }

    /// Returns the tier cost.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Free => 0,
            Self::Basic => 3000,
            Self::Family => 5000,
            Self::Offline => 3500,
            Self::Pro => 7000,
        }
    }

    /// Returns the maximum number of devices.
    #[must_use]
    pub const fn device_limit(self) -> u32 {
        match self {
            Self::Free => 1,
            Self::Basic | Self::Offline => 2,
            Self::Family => 5,
            Self::Pro => 6,
        }
    }

    /// Returns the perks granted by this tier.
    #[must_use]
    pub const fn perks(self) -> Perks {
        match self {
            Self::Free | Self::Basic => Perks::NONE,
            Self::Family => Perks { parental_controls: true, offline_downloads: false },
            Self::Offline => Perks { parental_controls: false, offline_downloads: true },
            Self::Pro => Perks { parental_controls: true, offline_downloads: true },
        }
    }

    /// Complimentary days granted when a membership of this tier is built.
    ///
    /// Absent, not zero, for Free and Basic. Kept internal to the crate.
    pub(crate) const fn gift_days(self) -> Option<u32> {
        match self {
            Self::Free | Self::Basic => None,
            Self::Family | Self::Offline => Some(7),
            Self::Pro => Some(15),
        }
    }

    /// Returns true for every tier at or above Basic.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Returns the lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Family => "family",
            Self::Offline => "offline",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Capabilities derived from a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Perks {
    /// Whether the tier offers parental controls.
    pub parental_controls: bool,
    /// Whether the tier allows offline downloads.
    pub offline_downloads: bool,
}

impl Perks {
    /// No perks at all.
    pub const NONE: Self = Self { parental_controls: false, offline_downloads: false };
}

/// Builds the tier named by `target_id` for `identity`.
///
/// Maps `1 -> Basic`, `2 -> Family`, `3 -> Offline`, `4 -> Pro`. The identity is shared,
/// not copied.
///
/// # Errors
///
/// Returns [`TierError::InvalidTierIdentifier`] if `target_id` is outside `1..=4`.
///
/// # Examples
///
/// ```
/// use membership_tiers::{
///     catalog::{TierKind, build},
///     identity::SubscriberIdentity,
/// };
///
/// let identity = SubscriberIdentity::shared("correo@prueba.cl", "123 456 789");
/// let tier = build(2, identity)?;
/// assert_eq!(tier.kind(), TierKind::Family);
/// assert_eq!(tier.device_limit(), 5);
/// # Ok::<(), membership_tiers::TierError>(())
/// ```
pub fn build(target_id: i64, identity: Arc<SubscriberIdentity>) -> Result<Tier> {
    let kind = TierKind::from_id(target_id)?;
    Ok(Tier::with_kind(kind, identity))
}

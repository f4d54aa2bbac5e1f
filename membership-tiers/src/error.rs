//! Error types for the membership tier engine.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Catalog Errors** ([`TierError::InvalidTierIdentifier`]): a numeric tier identifier
//!   that does not name a buildable tier
//! - **Capability Errors** ([`TierError::UnsupportedOperation`]): an operation the current
//!   tier does not expose
//!
//! Rejected transitions are not errors. [`change_tier`](crate::change_tier) returns the
//! current tier unchanged when the rule table refuses a target.
//!
//! # Examples
//!
//! ```
//! use membership_tiers::error::{Result, TierError};
//!
//! fn parse_target(raw: i64) -> Result<u8> {
//!     u8::try_from(raw)
//!         .ok()
//!         .filter(|id| (1..=4).contains(id))
//!         .ok_or(TierError::InvalidTierIdentifier(raw))
//! }
//!
//! assert!(parse_target(2).is_ok());
//! assert!(parse_target(9).is_err());
//! ```

use thiserror::Error;

use crate::catalog::TierKind;

/// Result type alias for tier operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, TierError>;

/// Errors that can occur in the membership tier engine.
///
/// Neither variant is transient, so there is nothing to retry.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    /// Tier identifier outside the buildable range `1..=4`.
    ///
    /// Returned by [`build`](crate::catalog::build) and
    /// [`TierKind::from_id`](crate::catalog::TierKind::from_id). The transition rule
    /// table filters targets before building, so [`change_tier`](crate::change_tier)
    /// never surfaces this error.
    ///
    /// # Recovery
    ///
    /// Use one of `1` (Basic), `2` (Family), `3` (Offline) or `4` (Pro). Free has no
    /// identifier and is only reachable through cancellation.
    #[error("Invalid tier identifier: {0} (expected 1..=4)")]
    InvalidTierIdentifier(i64),

    /// Operation is not available on the current tier.
    ///
    /// Currently only produced by [`cancel_tier`](crate::cancel_tier) on a Free tier.
    ///
    /// # Recovery
    ///
    /// Check [`TierKind::is_paid`](crate::catalog::TierKind::is_paid) before cancelling,
    /// or work with the typed [`Membership`](crate::membership::Membership), where
    /// `cancel` only exists on paid levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_tiers::{catalog::TierKind, error::TierError};
    ///
    /// let err = TierError::UnsupportedOperation { operation: "cancel", tier: TierKind::Free };
    /// assert_eq!(err.to_string(), "Operation `cancel` is not supported by the free tier");
    /// ```
    #[error("Operation `{operation}` is not supported by the {tier} tier")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Tier the operation was attempted on.
        tier: TierKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tier_identifier_display() {
        let error = TierError::InvalidTierIdentifier(7);
        assert_eq!(error.to_string(), "Invalid tier identifier: 7 (expected 1..=4)");
    }

    #[test]
    fn test_invalid_tier_identifier_negative() {
        let error = TierError::InvalidTierIdentifier(-3);
        assert!(error.to_string().contains("-3"));
    }

    #[test]
    fn test_unsupported_operation_display() {
        let error = TierError::UnsupportedOperation { operation: "cancel", tier: TierKind::Free };
        assert_eq!(error.to_string(), "Operation `cancel` is not supported by the free tier");
    }
}

//! Subscriber identity carried by every tier.
//!
//! The identity is created once at signup and shared, never copied, into every tier
//! derived from it. Transitions clone the [`Arc`], so the successor tier points at the
//! very same identity value as its predecessor.

use std::{fmt, sync::Arc};

use serde::Serialize;

/// Number of trailing card characters left visible when masking.
const VISIBLE_CARD_CHARS: usize = 4;

/// Immutable subscriber identity.
///
/// Neither field is validated here; validating email addresses or card numbers is the
/// job of whatever system collected them.
///
/// `Debug` masks the card number, and serialization skips it entirely.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SubscriberIdentity {
    email: String,
    #[serde(skip)]
    card_number: String,
}

impl SubscriberIdentity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(email: impl Into<String>, card_number: impl Into<String>) -> Self {
        Self { email: email.into(), card_number: card_number.into() }
    }

    /// Creates a new identity ready to be shared between tiers.
    #[must_use]
    pub fn shared(email: impl Into<String>, card_number: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(email, card_number))
    }

    /// Returns the subscriber email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the subscriber card number exactly as provided.
    #[must_use]
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    /// Returns the email with the local part redacted, for logging.
    ///
    /// The first character of the local part and the full domain stay visible.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_tiers::identity::SubscriberIdentity;
    ///
    /// let identity = SubscriberIdentity::new("correo@prueba.cl", "123 456 789");
    /// assert_eq!(identity.redacted_email(), "c*****@prueba.cl");
    /// ```
    #[must_use]
    pub fn redacted_email(&self) -> String {
        let Some((local, domain)) = self.email.split_once('@') else {
            return "*".repeat(self.email.chars().count());
        };

        let mut chars = local.chars();
        match chars.next() {
            Some(first) => format!("{first}{}@{domain}", "*".repeat(chars.count())),
            None => format!("@{domain}"),
        }
    }

    /// Returns the card number with every character but the last four replaced by `*`.
    ///
    /// Whitespace and hyphens count as separators and are kept in place. Anything else,
    /// digit or not, is masked. A card of four characters or fewer is masked entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use membership_tiers::identity::SubscriberIdentity;
    ///
    /// let identity = SubscriberIdentity::new("correo@prueba.cl", "123 456 789");
    /// assert_eq!(identity.masked_card_number(), "*** **6 789");
    /// ```
    #[must_use]
    pub fn masked_card_number(&self) -> String {
        let significant = self.card_number.chars().filter(|&c| !is_card_separator(c)).count();
        let hidden = if significant > VISIBLE_CARD_CHARS {
            significant - VISIBLE_CARD_CHARS
        } else {
            significant
        };

        let mut seen = 0;
        self.card_number
            .chars()
            .map(|c| {
                if is_card_separator(c) {
                    return c;
                }
                seen += 1;
                if seen <= hidden { '*' } else { c }
            })
            .collect()
    }
}

fn is_card_separator(c: char) -> bool {
    c == '-' || c.is_whitespace()
}

impl fmt::Debug for SubscriberIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberIdentity")
            .field("email", &self.email)
            .field("card_number", &self.masked_card_number())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_return_raw_values() {
        let identity = SubscriberIdentity::new("correo@prueba.cl", "123 456 789");
        assert_eq!(identity.email(), "correo@prueba.cl");
        assert_eq!(identity.card_number(), "123 456 789");
    }

    #[test]
    fn test_shared_identity_clones_pointer() {
        let identity = SubscriberIdentity::shared("a@b.c", "1");
        let other = Arc::clone(&identity);
        assert!(Arc::ptr_eq(&identity, &other));
    }

    #[test]
    fn test_redacted_email_without_at_sign() {
        let identity = SubscriberIdentity::new("nobody", "1");
        assert_eq!(identity.redacted_email(), "******");
    }

    #[test]
    fn test_redacted_email_empty_local_part() {
        let identity = SubscriberIdentity::new("@host.cl", "1");
        assert_eq!(identity.redacted_email(), "@host.cl");
    }

    #[test]
    fn test_masked_card_number_sixteen_digits() {
        let identity = SubscriberIdentity::new("a@b.c", "4111-1111-1111-1234");
        assert_eq!(identity.masked_card_number(), "****-****-****-1234");
    }

    #[test]
    fn test_masked_card_number_short_input_fully_masked() {
        assert_eq!(SubscriberIdentity::new("a@b.c", "12").masked_card_number(), "**");
        assert_eq!(SubscriberIdentity::new("a@b.c", "12 34").masked_card_number(), "** **");
        assert_eq!(SubscriberIdentity::new("a@b.c", "").masked_card_number(), "");
    }

    #[test]
    fn test_masked_card_number_masks_non_digits() {
        let identity = SubscriberIdentity::new("a@b.c", "ABCD-EFGH-IJKL-MNOP");
        assert_eq!(identity.masked_card_number(), "****-****-****-MNOP");

        let mixed = SubscriberIdentity::new("a@b.c", "4111.1111/X1Z2");
        assert_eq!(mixed.masked_card_number(), "**********X1Z2");
    }

    #[test]
    fn test_debug_masks_card_number() {
        let identity = SubscriberIdentity::new("correo@prueba.cl", "4111111111111234");
        let debug = format!("{identity:?}");
        assert!(debug.contains("************1234"));
        assert!(!debug.contains("4111111111111234"));
    }

    #[test]
    fn test_debug_masks_card_number_without_digits() {
        let identity = SubscriberIdentity::new("correo@prueba.cl", "ABCD-EFGH-IJKL-MNOP");
        let debug = format!("{identity:?}");
        assert!(debug.contains("****-****-****-MNOP"));
        assert!(!debug.contains("ABCD"));
        assert!(!debug.contains("IJKL"));
    }

    #[test]
    fn test_serialization_skips_card_number() {
        let identity = SubscriberIdentity::new("correo@prueba.cl", "123 456 789");
        let json = serde_json::to_string(&identity).unwrap();
        assert_eq!(json, r#"{"email":"correo@prueba.cl"}"#);
    }
}

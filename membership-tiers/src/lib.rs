//! Membership Tiers: subscription tier state machine for media-streaming accounts
//!
//! A fixed catalog of membership tiers, each with its own cost and device limit, and a
//! rule table that decides which tier changes are permitted from which current tier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  SubscriberIdentity  │  email + card number, shared by every tier
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │     Tier Catalog     │  Free, Basic, Family, Offline, Pro
//! │  (cost, devices,     │  + derived perks (gift days, parental
//! │   perks, build)      │    controls, offline downloads)
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │  Transition Rules    │  per-tier valid targets, silent no-op
//! │  (is_valid, apply)   │  otherwise
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │       Engine         │  new_free_tier, change_tier, cancel_tier
//! └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use membership_tiers::{cancel_tier, catalog::TierKind, change_tier, new_free_tier};
//!
//! # fn example() -> membership_tiers::Result<()> {
//! let free = new_free_tier("correo@prueba.cl", "123 456 789");
//! let basic = change_tier(free, 1);
//! let family = change_tier(basic, 2);
//! assert_eq!(family.kind(), TierKind::Family);
//! assert_eq!(family.device_limit(), 5);
//!
//! // Family may not request Family again; the same tier comes back.
//! let family = change_tier(family, 2);
//! assert_eq!(family.kind(), TierKind::Family);
//!
//! let free = cancel_tier(&family)?;
//! assert_eq!(free.cost(), 0);
//! assert_eq!(free.email(), "correo@prueba.cl");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Typed Memberships
//!
//! When the level is known statically, [`membership::Membership`] makes unsupported
//! operations fail to compile:
//!
//! ```rust
//! use membership_tiers::membership::{Membership, Pro};
//! use membership_tiers::identity::SubscriberIdentity;
//!
//! let identity = SubscriberIdentity::shared("correo@prueba.cl", "123 456 789");
//! let pro = Membership::<Pro>::with_identity(identity);
//! let free = pro.cancel();
//! assert_eq!(free.device_limit(), 1);
//! ```
//!
//! ```rust,compile_fail
//! use membership_tiers::membership::{Free, Membership};
//!
//! let free: Membership<Free> = Membership::signup("correo@prueba.cl", "123 456 789");
//! let _ = free.cancel(); // Free has no cancel
//! ```
//!
//! # Module Organization
//!
//! - [`identity`]: Subscriber identity and log redaction
//! - [`catalog`]: Tier variants, static attributes, perks and `build`
//! - [`rules`]: Transition rule table
//! - [`membership`]: Typestate memberships and the runtime [`Tier`]
//! - [`engine`]: Public call surface with tracing instrumentation
//! - [`error`]: Error types with recovery guidance
//!
//! # Logging
//!
//! Transitions emit [`tracing`] events. Card numbers are never logged and emails are
//! redacted. Install any subscriber to see them; the walkthrough demo uses
//! `tracing-subscriber` with `RUST_LOG` filtering.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod engine;
pub mod error;
pub mod identity;
pub mod membership;
pub mod rules;

pub use catalog::{Perks, TierKind, build};
pub use engine::{cancel_tier, card_number, change_tier, cost, device_limit, email, new_free_tier};
pub use error::{Result, TierError};
pub use identity::SubscriberIdentity;
pub use membership::{Membership, Tier, TierSnapshot};

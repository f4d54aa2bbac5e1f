//! Walkthrough of a subscriber moving through every tier.
//!
//! Signs up on Free, upgrades through Basic, Family, Offline and Pro, tries an
//! out-of-policy request along the way, and cancels back to Free.
//!
//! # Running this example
//!
//! ```bash
//! RUST_LOG=membership_tiers=debug cargo run --example walkthrough
//! ```

#![allow(
    clippy::print_stdout,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use membership_tiers::{Tier, cancel_tier, change_tier, new_free_tier};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "membership_tiers=info";

fn print_tier(label: &str, tier: &Tier) {
    println!(
        "{:<10} tier={:<8} cost={:<5} devices={}",
        label,
        tier.kind(),
        tier.cost(),
        tier.device_limit()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Membership Tiers: Walkthrough\n");

    let tier = new_free_tier("correo@prueba.cl", "123 456 789");
    print_tier("signup", &tier);

    let tier = change_tier(tier, 1);
    print_tier("-> 1", &tier);

    // Basic does not accept its own identifier; nothing changes.
    let tier = change_tier(tier, 1);
    print_tier("-> 1 again", &tier);

    let tier = change_tier(tier, 2);
    print_tier("-> 2", &tier);

    let tier = change_tier(tier, 3);
    print_tier("-> 3", &tier);

    let tier = change_tier(tier, 4);
    print_tier("-> 4", &tier);
    println!("\nSnapshot: {}\n", serde_json::to_string_pretty(&tier.snapshot())?);

    let tier = cancel_tier(&tier)?;
    print_tier("cancel", &tier);

    if let Err(e) = cancel_tier(&tier) {
        println!("\nCancelling again: {e}");
    }
    print_tier("kept", &tier);

    Ok(())
}

//! # hearthmode-domain
//!
//! Pure domain model for the hearthmode household mode controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Modes** (wake, sleep, away, home) and the device targets they resolve to
//! - Define **Occupancy** (debounced presence state) and its flip rules
//! - Define the **Ledger** (which scheduled transitions already ran today)
//! - Define **Schedule windows** (time-of-day windows with rollover handling)
//! - Define **Results** (per-device outcomes aggregated into one transition outcome)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod ledger;
pub mod mode;
pub mod occupancy;
pub mod plan;
pub mod schedule;
pub mod setpoint;
pub mod transition;

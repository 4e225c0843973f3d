//! Test Module
//!
//! Test suite for the FocusTube core.
//!
//! ## Test Categories
//! - `brain_tests`: keyword tiers, precedence rules, end-to-end title verdicts
//! - `scanner_tests`: scan controller state machine against an in-memory document
//! - `actor_tests`: scanner actor triggers (timer, document events, messages)
//! - `integration_tests`: supervisor wired to the mode store

pub mod actor_tests;
pub mod brain_tests;

//! Simulated device-fleet telemetry with sustained-threshold alerting.
//!
//! The crate is layered the usual way: `domain` holds the pure engine
//! (sample generation, fleet advancement, rule evaluation, alert lifecycle),
//! `application` drives it on a fixed tick, `infrastructure` provides the
//! adapters behind the domain ports, and `presentation` renders the result.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `action`: Action parsing and selection tests
//! - `field_resolution`: Token, PR URL, and option resolution tests

mod helpers;

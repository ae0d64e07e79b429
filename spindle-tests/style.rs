//! Style Enforcement Tests
//!
//! Scans production sources of every `spindle-*` crate for patterns clippy
//! does not reject by default.
//!
//! - `production_hygiene` - No `#[allow(dead_code)]`, `.unwrap()` or `.expect(`
//!   outside `#[cfg(test)]` modules

#[path = "style/production_hygiene.rs"]
mod production_hygiene;

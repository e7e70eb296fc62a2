//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so that the quiet flag
//! is honored in one place.

pub mod output;

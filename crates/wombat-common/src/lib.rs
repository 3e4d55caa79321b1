//! Shared utilities for the Wombat box tree construction core.

pub mod url;
pub mod warning;

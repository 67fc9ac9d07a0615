//! Platform-specific package builders.

pub mod linux;

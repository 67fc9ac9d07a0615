//! Filesystem helpers shared by the staging steps.

pub mod fs;

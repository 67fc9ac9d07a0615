//! Configuration structures for staging a script package.
//!
//! This module provides the decoded bundle record, the supported package
//! managers and the staging tree layout derived from them.

mod bundle;
mod layout;
mod package_manager;

// Re-export all public types
pub use bundle::Bundle;
pub use layout::{Layout, resolve_install_dir, resolve_root};
pub use package_manager::PackageManager;

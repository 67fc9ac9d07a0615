//! Linux packages: staging tree construction and `.deb` archive creation.

pub mod debian;
pub mod staging;

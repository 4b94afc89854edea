//! Domain logic - pure release rules independent of git and the file system

pub mod marker;
pub mod version;

pub use marker::MarkerFormat;
pub use version::Version;

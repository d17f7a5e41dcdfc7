pub mod access;
mod public_paths;

pub use access::{AuthGate, Decision};
pub use public_paths::PublicPaths;

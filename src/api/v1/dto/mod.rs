pub mod auth;
pub mod echo;
pub mod envelope;
pub mod system;

pub mod auth;
pub mod docs;
pub mod echo;
pub mod fallback;
pub mod health;
pub mod ping;
pub mod swagger;

mod json;
mod request_ctx;

pub use json::ValidJson;
pub use request_ctx::{Authenticated, Identity, RequestContext};

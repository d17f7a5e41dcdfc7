use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EchoRequest {
    pub message: String,
}

impl EchoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.message.is_empty() {
            return Err("message is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub original: String,
    pub reversed: String,
    // UTF-8 byte length of `original`
    pub length: usize,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub request_id: String,
}

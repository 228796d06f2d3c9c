use serde::Deserialize;

/// Sender and receiver come from the session and the path, never the body.
#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Omitting `read` marks the message as read.
#[derive(Debug, Default, Deserialize)]
pub struct MarkReadRequest {
    pub read: Option<bool>,
}

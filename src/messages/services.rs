use uuid::Uuid;

use super::dto::SendMessageRequest;
use super::repo_types::NewMessage;
use crate::{
    error::{AppError, FieldErrors},
    validation::require,
};

pub fn new_message_from(
    req: SendMessageRequest,
    sender_id: Uuid,
    receiver_id: Uuid,
) -> Result<NewMessage, AppError> {
    let subject = req.subject.unwrap_or_default().trim().to_string();
    let body = req.body.unwrap_or_default().trim().to_string();

    let mut errors = FieldErrors::new();
    require(&mut errors, "subject", &subject);
    require(&mut errors, "body", &body);
    AppError::check(errors)?;

    Ok(NewMessage {
        sender_id,
        receiver_id,
        subject,
        body,
        read: false,
    })
}

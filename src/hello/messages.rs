use crate::actor_system::{Message, Recipient};
use crate::types::{HelloEvent, MessageKind};

/// The result built by the Builder. The text is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelloPayload {
    text: String,
}

impl HelloPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Every message exchanged between Master, Postman and Builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HelloMessage {
    InitComputation,
    BuildRequest,
    Hello(HelloPayload),
}

impl HelloMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            HelloMessage::InitComputation => MessageKind::InitComputation,
            HelloMessage::BuildRequest => MessageKind::BuildRequest,
            HelloMessage::Hello(_) => MessageKind::HelloPayload,
        }
    }
}

impl Message for HelloMessage {}

/// Reference to any of the three actors.
pub type HelloRecipient = Recipient<HelloEvent, HelloMessage>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GREETING;

    #[test]
    fn test_payload_keeps_text() {
        let payload = HelloPayload::new(GREETING);
        assert_eq!(payload.text(), "Hello There! was build by the Builder Actor");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            HelloMessage::InitComputation.kind(),
            MessageKind::InitComputation
        );
        assert_eq!(HelloMessage::BuildRequest.kind(), MessageKind::BuildRequest);
        assert_eq!(
            HelloMessage::Hello(HelloPayload::new("hi")).kind(),
            MessageKind::HelloPayload
        );
    }
}

use crate::actor_system::{ActorPath, SystemEvent};

/// Text the Builder puts in every payload it builds.
pub const GREETING: &str = "Hello There! was build by the Builder Actor";

/// Prefix of the line the Master prints in front of the payload text.
pub const DISPLAY_PREFIX: &str =
    "message build by Builder Actor, and retrieved from the PostmanActor, is displayed by the Master Actor: ";

/// Name under which the bootstrap registers the first Master.
pub const SEED_MASTER: &str = "masterActor";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Master,
    Postman,
    Builder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    InitComputation,
    BuildRequest,
    HelloPayload,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HelloEvent {
    /// An actor acted upon a message. Ignored messages are not reported.
    Received {
        role: Role,
        actor: ActorPath,
        message: MessageKind,
    },
    /// A Master printed the final payload.
    Displayed { actor: ActorPath, text: String },
}

impl SystemEvent for HelloEvent {}

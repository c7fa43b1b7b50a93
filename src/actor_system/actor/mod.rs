//! Actor module - core actor types and traits.

#![allow(dead_code)]

pub(crate) mod handler;
pub(crate) mod runner;

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

mod path;
pub use path::ActorPath;

use crate::actor_system::system::{ActorSystem, Lifecycle, SystemEvent};

/// The actor context gives a running actor access to its path, the system,
/// its own reference and the sender of the message being handled.
pub struct ActorContext<E: SystemEvent> {
    pub path: ActorPath,
    pub system: ActorSystem<E>,
    myself: Box<dyn Any + Send + Sync>,
    sender: Option<Box<dyn Any + Send + Sync>>,
}

impl<E: SystemEvent> ActorContext<E> {
    pub(crate) fn new<A: Actor<E>>(
        path: ActorPath,
        system: ActorSystem<E>,
        myself: ActorRef<E, A>,
    ) -> Self {
        ActorContext {
            path,
            system,
            myself: Box::new(myself),
            sender: None,
        }
    }

    /// Reference to the actor owning this context. `None` if `A` is not the
    /// running actor's type.
    pub fn myself<A: Actor<E>>(&self) -> Option<ActorRef<E, A>> {
        self.myself.downcast_ref::<ActorRef<E, A>>().cloned()
    }

    /// Sender tagged on the message currently being handled.
    pub fn sender<M: Message>(&self) -> Option<Recipient<E, M>> {
        self.sender
            .as_ref()
            .and_then(|sender| sender.downcast_ref::<Recipient<E, M>>())
            .cloned()
    }
}

impl<E: SystemEvent> std::fmt::Debug for ActorContext<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorContext")
            .field("path", &self.path)
            .field("system", &self.system)
            .field("has_sender", &self.sender.is_some())
            .finish()
    }
}

/// Marker for anything that can travel through a mailbox.
pub trait Message: Send + Sync + 'static {}

/// Basic trait for actors.
#[async_trait]
pub trait Actor<E: SystemEvent>: Send + Sync + 'static {
    /// Override this function to perform initialization of the actor.
    async fn pre_start(&mut self, _ctx: &mut ActorContext<E>) -> Result<(), ActorError> {
        Ok(())
    }

    /// Override this function to perform work when the actor is stopped.
    async fn post_stop(&mut self, _ctx: &mut ActorContext<E>) {}
}

/// Defines what the actor does with a message.
#[async_trait]
pub trait Handler<E: SystemEvent, M: Message>: Actor<E> {
    async fn handle(&mut self, msg: M, ctx: &mut ActorContext<E>);
}

/// A clonable actor reference.
pub struct ActorRef<E: SystemEvent, A: Actor<E>> {
    path: ActorPath,
    sender: handler::MailboxSender<E, A>,
    lifecycle: Lifecycle,
}

impl<E: SystemEvent, A: Actor<E>> Clone for ActorRef<E, A> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            sender: self.sender.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<E: SystemEvent, A: Actor<E>> ActorRef<E, A> {
    /// Get the path of this actor.
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    /// Fire and forget sending of messages to this actor.
    pub fn tell<M>(&self, msg: M) -> Result<(), ActorError>
    where
        M: Message,
        A: Handler<E, M>,
    {
        self.tell_from(msg, None)
    }

    /// Fire and forget, tagging the message with the actor to reply to.
    ///
    /// Once the system is shut down the message is dropped and `Ok(())` is
    /// returned.
    pub fn tell_from<M>(&self, msg: M, sender: Option<Recipient<E, M>>) -> Result<(), ActorError>
    where
        M: Message,
        A: Handler<E, M>,
    {
        if self.lifecycle.is_shut_down() {
            log::debug!("System is shut down, dropping message for '{}'", self.path);
            return Ok(());
        }

        let message = handler::ActorMessage::<M, E, A>::new(msg, sender);
        if let Err(error) = self.sender.send(Box::new(message)) {
            if self.lifecycle.is_shut_down() {
                log::debug!("System is shut down, dropping message for '{}'", self.path);
                return Ok(());
            }
            log::error!("Failed to tell message! {}", error.to_string());
            Err(ActorError::SendError(error.to_string()))
        } else {
            Ok(())
        }
    }

    /// Erase the actor type, keeping only the ability to receive `M`.
    pub fn recipient<M>(&self) -> Recipient<E, M>
    where
        M: Message,
        A: Handler<E, M>,
    {
        Recipient {
            path: self.path.clone(),
            inner: Arc::new(self.clone()),
        }
    }

    /// Checks if the actor mailbox is still open.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    pub(crate) fn new(
        path: ActorPath,
        sender: handler::MailboxSender<E, A>,
        lifecycle: Lifecycle,
    ) -> Self {
        ActorRef {
            path,
            sender,
            lifecycle,
        }
    }
}

impl<E: SystemEvent, A: Actor<E>> std::fmt::Debug for ActorRef<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

trait Deliver<E: SystemEvent, M: Message>: Send + Sync {
    fn deliver(&self, msg: M, sender: Option<Recipient<E, M>>) -> Result<(), ActorError>;
}

impl<E, M, A> Deliver<E, M> for ActorRef<E, A>
where
    E: SystemEvent,
    M: Message,
    A: Handler<E, M>,
{
    fn deliver(&self, msg: M, sender: Option<Recipient<E, M>>) -> Result<(), ActorError> {
        self.tell_from(msg, sender)
    }
}

/// Reference to any actor able to handle `M`, whatever its concrete type.
/// This is what travels along a message as its sender.
pub struct Recipient<E: SystemEvent, M: Message> {
    path: ActorPath,
    inner: Arc<dyn Deliver<E, M>>,
}

impl<E: SystemEvent, M: Message> Clone for Recipient<E, M> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<E: SystemEvent, M: Message> Recipient<E, M> {
    pub fn path(&self) -> &ActorPath {
        &self.path
    }

    pub fn tell(&self, msg: M) -> Result<(), ActorError> {
        self.inner.deliver(msg, None)
    }

    pub fn tell_from(&self, msg: M, sender: Option<Recipient<E, M>>) -> Result<(), ActorError> {
        self.inner.deliver(msg, sender)
    }
}

impl<E: SystemEvent, M: Message> std::fmt::Debug for Recipient<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[derive(Error, Debug)]
pub enum ActorError {
    #[error("Actor exists")]
    Exists(ActorPath),

    #[error("Actor system is shut down")]
    ShutDown,

    #[error("Sending message failed")]
    SendError(String),
}

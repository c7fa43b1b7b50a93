//! Mailbox entries and the channel carrying them.

use std::any::Any;
use std::marker::PhantomData;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::actor_system::{
    actor::{ActorContext, Handler, Message, Recipient},
    system::SystemEvent,
};

use super::Actor;

#[async_trait]
pub trait MessageHandler<E: SystemEvent, A: Actor<E>>: Send + Sync {
    async fn handle(&mut self, actor: &mut A, ctx: &mut ActorContext<E>);
}

/// A message waiting in a mailbox, together with whoever sent it.
pub(crate) struct ActorMessage<M, E, A>
where
    M: Message,
    E: SystemEvent,
    A: Handler<E, M>,
{
    payload: Option<M>,
    sender: Option<Recipient<E, M>>,
    _phantom_actor: PhantomData<A>,
}

#[async_trait]
impl<M, E, A> MessageHandler<E, A> for ActorMessage<M, E, A>
where
    M: Message,
    E: SystemEvent,
    A: Handler<E, M>,
{
    async fn handle(&mut self, actor: &mut A, ctx: &mut ActorContext<E>) {
        let Some(payload) = self.payload.take() else {
            return;
        };

        ctx.sender = self
            .sender
            .take()
            .map(|sender| Box::new(sender) as Box<dyn Any + Send + Sync>);
        actor.handle(payload, ctx).await;
        ctx.sender = None;
    }
}

impl<M, E, A> ActorMessage<M, E, A>
where
    M: Message,
    E: SystemEvent,
    A: Handler<E, M>,
{
    pub fn new(msg: M, sender: Option<Recipient<E, M>>) -> Self {
        ActorMessage {
            payload: Some(msg),
            sender,
            _phantom_actor: PhantomData,
        }
    }
}

pub type BoxedMessageHandler<E, A> = Box<dyn MessageHandler<E, A>>;
pub type MailboxReceiver<E, A> = mpsc::UnboundedReceiver<BoxedMessageHandler<E, A>>;
pub type MailboxSender<E, A> = mpsc::UnboundedSender<BoxedMessageHandler<E, A>>;

pub struct ActorMailbox<E: SystemEvent, A: Actor<E>> {
    _phantom_actor: PhantomData<A>,
    _phantom_event: PhantomData<E>,
}

impl<E: SystemEvent, A: Actor<E>> ActorMailbox<E, A> {
    pub fn create() -> (MailboxSender<E, A>, MailboxReceiver<E, A>) {
        mpsc::unbounded_channel()
    }
}

use crate::actor_system::{Actor, ActorContext, ActorError, Handler, async_trait};
use crate::hello::builder::BuilderActor;
use crate::hello::console::Console;
use crate::hello::master::MasterActor;
use crate::hello::messages::{HelloMessage, HelloRecipient};
use crate::types::{HelloEvent, MessageKind, Role};

/// Carries build requests to a fresh Builder and the built payload to a
/// fresh Master.
#[derive(Debug)]
pub struct PostmanActor {
    console: Console,
}

impl PostmanActor {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    fn request_build(&self, ctx: &ActorContext<HelloEvent>) -> Result<(), ActorError> {
        let builder = ctx.system.create_anonymous_actor("builder", BuilderActor)?;
        builder.tell_from(HelloMessage::BuildRequest, self.myself(ctx))
    }

    /// The payload goes to a newly created Master, never back to the Master
    /// that asked for it.
    fn deliver(&self, msg: HelloMessage, ctx: &ActorContext<HelloEvent>) -> Result<(), ActorError> {
        let master = ctx
            .system
            .create_anonymous_actor("master", MasterActor::new(self.console.clone()))?;
        master.tell_from(msg, self.myself(ctx))
    }

    fn myself(&self, ctx: &ActorContext<HelloEvent>) -> Option<HelloRecipient> {
        ctx.myself::<Self>().map(|postman| postman.recipient())
    }
}

impl Actor<HelloEvent> for PostmanActor {}

#[async_trait]
impl Handler<HelloEvent, HelloMessage> for PostmanActor {
    async fn handle(&mut self, msg: HelloMessage, ctx: &mut ActorContext<HelloEvent>) {
        let result = match msg {
            HelloMessage::BuildRequest => {
                received(ctx, MessageKind::BuildRequest);
                self.request_build(ctx)
            }
            HelloMessage::Hello(payload) => {
                received(ctx, MessageKind::HelloPayload);
                self.deliver(HelloMessage::Hello(payload), ctx)
            }
            HelloMessage::InitComputation => {
                log::debug!("Postman {} ignored {:?}", ctx.path, MessageKind::InitComputation);
                Ok(())
            }
        };

        if let Err(error) = result {
            log::error!("Postman {} failed to relay message: {}", ctx.path, error);
        }
    }
}

fn received(ctx: &ActorContext<HelloEvent>, message: MessageKind) {
    ctx.system.publish(HelloEvent::Received {
        role: Role::Postman,
        actor: ctx.path.clone(),
        message,
    });
}

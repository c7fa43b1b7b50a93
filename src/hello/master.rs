use uuid::Uuid;

use crate::actor_system::{Actor, ActorContext, ActorError, Handler, async_trait};
use crate::hello::console::Console;
use crate::hello::messages::{HelloMessage, HelloPayload};
use crate::hello::postman::PostmanActor;
use crate::types::{DISPLAY_PREFIX, HelloEvent, Role};

/// Starts the workflow on `InitComputation`, and ends it (printing the
/// payload, then shutting the system down) on `Hello`.
#[derive(Debug)]
pub struct MasterActor {
    id: Uuid,
    console: Console,
}

impl MasterActor {
    pub fn new(console: Console) -> Self {
        Self {
            id: Uuid::new_v4(),
            console,
        }
    }

    fn start_computation(&self, ctx: &ActorContext<HelloEvent>) -> Result<(), ActorError> {
        let postman = ctx
            .system
            .create_anonymous_actor("postman", PostmanActor::new(self.console.clone()))?;
        let me = ctx.myself::<Self>().map(|master| master.recipient());
        postman.tell_from(HelloMessage::BuildRequest, me)
    }

    fn display(&self, payload: &HelloPayload, ctx: &ActorContext<HelloEvent>) {
        self.console
            .print_line(&format!("{}{}", DISPLAY_PREFIX, payload.text()));
        ctx.system.publish(HelloEvent::Displayed {
            actor: ctx.path.clone(),
            text: payload.text().to_string(),
        });

        // Last one with something to say: stop every actor.
        ctx.system.shutdown();
    }
}

#[async_trait]
impl Actor<HelloEvent> for MasterActor {
    async fn pre_start(&mut self, ctx: &mut ActorContext<HelloEvent>) -> Result<(), ActorError> {
        log::debug!("Master {} started at {}", self.id, ctx.path);
        Ok(())
    }
}

#[async_trait]
impl Handler<HelloEvent, HelloMessage> for MasterActor {
    async fn handle(&mut self, msg: HelloMessage, ctx: &mut ActorContext<HelloEvent>) {
        match msg {
            HelloMessage::InitComputation => {
                ctx.system.publish(HelloEvent::Received {
                    role: Role::Master,
                    actor: ctx.path.clone(),
                    message: msg.kind(),
                });
                if let Err(error) = self.start_computation(ctx) {
                    log::error!("Master {} failed to start computation: {}", self.id, error);
                }
            }
            HelloMessage::Hello(ref payload) => {
                ctx.system.publish(HelloEvent::Received {
                    role: Role::Master,
                    actor: ctx.path.clone(),
                    message: msg.kind(),
                });
                self.display(payload, ctx);
            }
            HelloMessage::BuildRequest => {
                log::debug!("Master {} ignored {:?}", self.id, msg.kind());
            }
        }
    }
}

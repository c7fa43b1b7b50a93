use crate::actor_system::{Actor, ActorContext, Handler, async_trait};
use crate::hello::messages::{HelloMessage, HelloPayload};
use crate::types::{GREETING, HelloEvent, Role};

/// Builds the greeting for whoever asks. Holds no state.
#[derive(Debug, Default)]
pub struct BuilderActor;

impl Actor<HelloEvent> for BuilderActor {}

#[async_trait]
impl Handler<HelloEvent, HelloMessage> for BuilderActor {
    async fn handle(&mut self, msg: HelloMessage, ctx: &mut ActorContext<HelloEvent>) {
        match msg {
            HelloMessage::BuildRequest => {
                ctx.system.publish(HelloEvent::Received {
                    role: Role::Builder,
                    actor: ctx.path.clone(),
                    message: msg.kind(),
                });

                let Some(sender) = ctx.sender::<HelloMessage>() else {
                    log::warn!("Builder {} got a build request with no sender", ctx.path);
                    return;
                };

                let me = ctx.myself::<Self>().map(|builder| builder.recipient());
                let payload = HelloMessage::Hello(HelloPayload::new(GREETING));
                if let Err(error) = sender.tell_from(payload, me) {
                    log::error!("Builder {} failed to reply to {}: {}", ctx.path, sender.path(), error);
                }
            }
            other => {
                log::debug!("Builder {} ignored {:?}", ctx.path, other.kind());
            }
        }
    }
}

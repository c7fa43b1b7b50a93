//! Actor runner - drives one actor's mailbox until the system stops.

use crate::actor_system::system::{ActorSystem, Lifecycle, SystemEvent};

use super::{
    Actor, ActorContext, ActorPath, ActorRef,
    handler::{ActorMailbox, MailboxReceiver},
};

pub(crate) struct ActorRunner<E: SystemEvent, A: Actor<E>> {
    path: ActorPath,
    actor: A,
    receiver: MailboxReceiver<E, A>,
    myself: ActorRef<E, A>,
    lifecycle: Lifecycle,
}

impl<E: SystemEvent, A: Actor<E>> ActorRunner<E, A> {
    pub fn create(path: ActorPath, actor: A, lifecycle: Lifecycle) -> (Self, ActorRef<E, A>) {
        let (sender, receiver) = ActorMailbox::create();
        let actor_ref = ActorRef::new(path.clone(), sender, lifecycle.clone());
        let runner = ActorRunner {
            path,
            actor,
            receiver,
            myself: actor_ref.clone(),
            lifecycle,
        };
        (runner, actor_ref)
    }

    pub async fn start(&mut self, system: ActorSystem<E>) {
        log::debug!("Starting actor '{}'...", &self.path);

        let mut ctx = ActorContext::new(self.path.clone(), system.clone(), self.myself.clone());

        match self.actor.pre_start(&mut ctx).await {
            Err(error) => {
                log::error!("Actor '{}' failed to start: {}", &self.path, error);
            }
            Ok(()) => {
                log::debug!("Actor '{}' has started successfully.", &self.path);

                // The stop signal wins over pending mail: nothing is handled
                // once the system is shut down.
                loop {
                    tokio::select! {
                        biased;
                        _ = self.lifecycle.stopped() => break,
                        next = self.receiver.recv() => match next {
                            Some(mut msg) => {
                                msg.handle(&mut self.actor, &mut ctx).await;
                                system.record_delivery();
                            }
                            None => break,
                        },
                    }
                }

                self.actor.post_stop(&mut ctx).await;
                log::debug!("Actor '{}' stopped.", &self.path);
            }
        }

        system.deregister(&self.path);
        self.receiver.close();
    }
}

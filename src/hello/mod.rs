//! The three hello actors and the bootstrap wiring them together.
//!
//! Master asks a Postman for a message, the Postman asks a Builder to build
//! it, the Builder replies to the Postman, and the Postman hands the result
//! to a brand new Master which prints it and shuts the system down.

mod builder;
mod console;
mod master;
mod messages;
mod postman;

use anyhow::Context;

pub use console::Console;
pub use master::MasterActor;
pub use messages::HelloMessage;

use crate::actor_system::{ActorRef, ActorSystem, EventBus};
use crate::config::HelloConfig;
use crate::types::{HelloEvent, SEED_MASTER};

/// Registers the seed Master and sends it `InitComputation`, tagged with the
/// Master itself as sender.
pub fn start(
    system: &ActorSystem<HelloEvent>,
    console: Console,
) -> anyhow::Result<ActorRef<HelloEvent, MasterActor>> {
    let master = system
        .create_actor(SEED_MASTER, MasterActor::new(console))
        .context("failed to create the seed master actor")?;
    master
        .tell_from(HelloMessage::InitComputation, Some(master.recipient()))
        .context("failed to seed the master actor")?;
    Ok(master)
}

/// Runs one full workflow and returns once every actor has stopped.
pub async fn run(config: &HelloConfig, console: Console) -> anyhow::Result<()> {
    let bus = EventBus::<HelloEvent>::new(config.event_capacity);
    let system = ActorSystem::new(&config.system_name, bus);

    let mut events = system.events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            log::debug!("{:?}", event);
        }
    });

    start(&system, console)?;
    system.wait_for_shutdown().await;

    log::debug!("{} actors left on '{}'", system.live_actors(), system.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::builder::BuilderActor;
    use super::messages::HelloPayload;
    use super::postman::PostmanActor;
    use crate::actor_system::ActorPath;
    use tokio::sync::broadcast::Receiver as EventReceiver;
    use crate::types::{DISPLAY_PREFIX, GREETING, MessageKind, Role};
    use std::time::Duration;

    const EXPECTED_LINE: &str = "message build by Builder Actor, and retrieved from the PostmanActor, is displayed by the Master Actor: Hello There! was build by the Builder Actor";

    fn system() -> ActorSystem<HelloEvent> {
        ActorSystem::new("HelloMessageSystem", EventBus::new(64))
    }

    fn drain(events: &mut EventReceiver<HelloEvent>) -> Vec<HelloEvent> {
        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        seen
    }

    async fn run_workflow(
        system: &ActorSystem<HelloEvent>,
        console: &Console,
    ) -> ActorRef<HelloEvent, MasterActor> {
        let master = start(system, console.clone()).unwrap();
        tokio::time::timeout(Duration::from_secs(5), system.wait_for_shutdown())
            .await
            .expect("workflow did not shut the system down");
        master
    }

    async fn settle(system: &ActorSystem<HelloEvent>, deliveries: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while system.deliveries() < deliveries {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("deliveries did not settle");
    }

    #[test]
    fn test_expected_line_matches_constants() {
        assert_eq!(format!("{DISPLAY_PREFIX}{GREETING}"), EXPECTED_LINE);
    }

    #[tokio::test]
    async fn test_workflow_prints_once_and_tears_down() {
        let system = system();
        let console = Console::captured();

        run_workflow(&system, &console).await;

        assert_eq!(console.lines(), vec![EXPECTED_LINE]);
        assert!(system.is_shut_down());
        assert_eq!(system.live_actors(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_workflow_on_worker_pool() {
        let system = system();
        let console = Console::captured();

        run_workflow(&system, &console).await;

        assert_eq!(console.lines(), vec![EXPECTED_LINE]);
        assert_eq!(system.deliveries(), 5);
        assert_eq!(system.live_actors(), 0);
    }

    #[tokio::test]
    async fn test_five_deliveries_in_causal_order() {
        let system = system();
        let mut events = system.events();
        let console = Console::captured();

        run_workflow(&system, &console).await;

        assert_eq!(system.deliveries(), 5);
        let received: Vec<(Role, MessageKind)> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                HelloEvent::Received { role, message, .. } => Some((role, message)),
                HelloEvent::Displayed { .. } => None,
            })
            .collect();
        assert_eq!(
            received,
            vec![
                (Role::Master, MessageKind::InitComputation),
                (Role::Postman, MessageKind::BuildRequest),
                (Role::Builder, MessageKind::BuildRequest),
                (Role::Postman, MessageKind::HelloPayload),
                (Role::Master, MessageKind::HelloPayload),
            ]
        );
    }

    #[tokio::test]
    async fn test_displaying_master_is_a_new_instance() {
        let system = system();
        let mut events = system.events();
        let console = Console::captured();

        let seed = run_workflow(&system, &console).await;

        let masters: Vec<(MessageKind, ActorPath)> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                HelloEvent::Received {
                    role: Role::Master,
                    actor,
                    message,
                } => Some((message, actor)),
                _ => None,
            })
            .collect();
        assert_eq!(masters.len(), 2);
        assert_eq!(masters[0], (MessageKind::InitComputation, seed.path().clone()));
        assert_eq!(masters[1].0, MessageKind::HelloPayload);
        assert_ne!(masters[1].1, *seed.path());
        assert!(masters[1].1.key().starts_with("master-"));
    }

    #[tokio::test]
    async fn test_displayed_event_carries_greeting() {
        let system = system();
        let mut events = system.events();
        let console = Console::captured();

        run_workflow(&system, &console).await;

        let displayed: Vec<String> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                HelloEvent::Displayed { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(displayed, vec![GREETING]);
    }

    #[tokio::test]
    async fn test_runs_are_identical() {
        let first = Console::captured();
        let second = Console::captured();

        run_workflow(&system(), &first).await;
        run_workflow(&system(), &second).await;

        assert_eq!(first.lines(), second.lines());
    }

    #[tokio::test]
    async fn test_unrecognized_messages_are_dropped() {
        let system = system();
        let mut events = system.events();
        let console = Console::captured();

        let master = system
            .create_actor("master", MasterActor::new(console.clone()))
            .unwrap();
        let postman = system
            .create_actor("postman", PostmanActor::new(console.clone()))
            .unwrap();
        let builder = system.create_actor("builder", BuilderActor).unwrap();

        master.tell(HelloMessage::BuildRequest).unwrap();
        postman.tell(HelloMessage::InitComputation).unwrap();
        builder
            .tell(HelloMessage::Hello(HelloPayload::new("stray")))
            .unwrap();
        builder.tell(HelloMessage::InitComputation).unwrap();
        settle(&system, 4).await;

        assert!(console.lines().is_empty());
        assert!(drain(&mut events).is_empty());
        assert_eq!(system.live_actors(), 3);
        assert!(!system.is_shut_down());
    }

    #[tokio::test]
    async fn test_build_request_without_sender_is_dropped() {
        let system = system();
        let mut events = system.events();
        let builder = system.create_actor("builder", BuilderActor).unwrap();

        builder.tell(HelloMessage::BuildRequest).unwrap();
        settle(&system, 1).await;

        assert_eq!(drain(&mut events).len(), 1);
        assert_eq!(system.live_actors(), 1);
    }

    #[tokio::test]
    async fn test_payload_sent_straight_to_master_is_displayed() {
        let system = system();
        let console = Console::captured();
        let master = system
            .create_actor("master", MasterActor::new(console.clone()))
            .unwrap();

        master
            .tell(HelloMessage::Hello(HelloPayload::new("Heeeeloo there!")))
            .unwrap();
        system.wait_for_shutdown().await;

        assert_eq!(
            console.lines(),
            vec![format!("{DISPLAY_PREFIX}Heeeeloo there!")]
        );
        assert_eq!(system.live_actors(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_after_workflow_is_idempotent() {
        let system = system();
        let console = Console::captured();

        let seed = run_workflow(&system, &console).await;
        system.shutdown();
        system.shutdown();

        assert!(seed.tell(HelloMessage::InitComputation).is_ok());
        assert_eq!(system.deliveries(), 5);
        assert_eq!(console.lines().len(), 1);
        assert_eq!(system.live_actors(), 0);
    }

    #[tokio::test]
    async fn test_run_completes() {
        let config = HelloConfig {
            system_name: "run".to_string(),
            ..HelloConfig::default()
        };
        let console = Console::captured();

        run(&config, console.clone()).await.unwrap();

        assert_eq!(console.lines(), vec![EXPECTED_LINE]);
    }
}

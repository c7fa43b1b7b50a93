//! Actor system - registry of running actors and the system-wide stop signal.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::actor_system::actor::runner::ActorRunner;
use crate::actor_system::actor::{Actor, ActorError, ActorPath, ActorRef};
use crate::actor_system::bus::{EventBus, EventReceiver};

/// Events that actors of a system can publish on its bus.
pub trait SystemEvent: Clone + Send + Sync + 'static {}

/// One-shot stop signal shared by the system, every runner and every actor
/// reference.
#[derive(Clone, Debug, Default)]
pub(crate) struct Lifecycle {
    inner: Arc<LifecycleState>,
}

#[derive(Debug, Default)]
struct LifecycleState {
    stopped: AtomicBool,
    notify: Notify,
}

impl Lifecycle {
    pub fn is_shut_down(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Raises the signal. Returns `true` only for the call that raised it.
    pub fn trigger(&self) -> bool {
        let first = !self.inner.stopped.swap(true, Ordering::SeqCst);
        if first {
            self.inner.notify.notify_waiters();
        }
        first
    }

    /// Resolves once the signal is raised.
    pub async fn stopped(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if self.is_shut_down() {
            return;
        }

        notified.await;
    }
}

/// Creates actors, keeps track of the live ones, and tears all of them down
/// on [`ActorSystem::shutdown`].
#[derive(Clone)]
pub struct ActorSystem<E: SystemEvent> {
    name: String,
    actors: Arc<DashMap<ActorPath, JoinHandle<()>>>,
    draining: Arc<Mutex<Vec<JoinHandle<()>>>>,
    joining: Arc<tokio::sync::Mutex<()>>,
    delivered: Arc<AtomicUsize>,
    lifecycle: Lifecycle,
    drained: Lifecycle,
    bus: EventBus<E>,
}

impl<E: SystemEvent> ActorSystem<E> {
    pub fn new(name: &str, bus: EventBus<E>) -> Self {
        log::info!("Starting actor system '{}'", name);
        ActorSystem {
            name: name.to_string(),
            actors: Arc::new(DashMap::new()),
            draining: Arc::new(Mutex::new(Vec::new())),
            joining: Arc::new(tokio::sync::Mutex::new(())),
            delivered: Arc::new(AtomicUsize::new(0)),
            lifecycle: Lifecycle::default(),
            drained: Lifecycle::default(),
            bus,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish an event on the system bus.
    pub fn publish(&self, event: E) {
        self.bus.publish(event)
    }

    /// Subscribe to events published from now on.
    pub fn events(&self) -> EventReceiver<E> {
        self.bus.subscribe()
    }

    /// Create a top level actor named `name`.
    pub fn create_actor<A: Actor<E>>(
        &self,
        name: &str,
        actor: A,
    ) -> Result<ActorRef<E, A>, ActorError> {
        let path = ActorPath::from(self.name.as_str()) / name;
        self.create_actor_path(path, actor)
    }

    /// Create a top level actor under a generated unique name starting with
    /// `prefix`.
    pub fn create_anonymous_actor<A: Actor<E>>(
        &self,
        prefix: &str,
        actor: A,
    ) -> Result<ActorRef<E, A>, ActorError> {
        let name = format!("{}-{}", prefix, Uuid::new_v4().simple());
        self.create_actor(&name, actor)
    }

    /// Create an actor at the given path and start its mailbox loop.
    pub fn create_actor_path<A: Actor<E>>(
        &self,
        path: ActorPath,
        actor: A,
    ) -> Result<ActorRef<E, A>, ActorError> {
        if self.lifecycle.is_shut_down() {
            return Err(ActorError::ShutDown);
        }

        let actor_ref = match self.actors.entry(path.clone()) {
            Entry::Occupied(_) => return Err(ActorError::Exists(path)),
            Entry::Vacant(slot) => {
                log::debug!("Creating actor '{}' on system '{}'...", &path, &self.name);
                let (mut runner, actor_ref) =
                    ActorRunner::create(path.clone(), actor, self.lifecycle.clone());
                let system = self.clone();
                slot.insert(tokio::spawn(async move {
                    runner.start(system).await;
                }));
                actor_ref
            }
        };

        // Raced with a shutdown that already drained the registry.
        if self.lifecycle.is_shut_down() {
            self.reap(&path);
        }

        Ok(actor_ref)
    }

    /// Number of actors currently registered.
    pub fn live_actors(&self) -> usize {
        self.actors.len()
    }

    /// Number of messages handled to completion by all actors so far.
    pub fn deliveries(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.lifecycle.is_shut_down()
    }

    /// Stops every actor and clears the registry. Calling it again has no
    /// effect. Messages told after this point are dropped.
    pub fn shutdown(&self) {
        if !self.lifecycle.trigger() {
            log::debug!("Actor system '{}' is already shut down.", &self.name);
            return;
        }

        log::info!("Shutting down actor system '{}'...", &self.name);
        let paths: Vec<ActorPath> = self
            .actors
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        for path in paths {
            self.reap(&path);
        }
        self.drained.trigger();
    }

    /// Waits for [`ActorSystem::shutdown`] to be called, then for every actor
    /// task to finish. Any number of callers may wait; none returns before
    /// the last actor task is done.
    pub async fn wait_for_shutdown(&self) {
        self.drained.stopped().await;

        // Waiters take turns, so a later one cannot return while an earlier
        // one still holds the handles.
        let _joining = self.joining.lock().await;
        loop {
            let handles = self.take_draining();
            if handles.is_empty() {
                // A creation racing with shutdown registers before it reaps.
                if self.actors.is_empty() {
                    break;
                }
                tokio::task::yield_now().await;
                continue;
            }

            for result in futures::future::join_all(handles).await {
                if let Err(error) = result {
                    log::error!("Actor task failed during shutdown: {}", error);
                }
            }
        }

        log::info!(
            "Actor system '{}' shut down after {} deliveries.",
            &self.name,
            self.deliveries()
        );
    }

    pub(crate) fn record_delivery(&self) {
        self.delivered.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn deregister(&self, path: &ActorPath) {
        if self.actors.remove(path).is_some() {
            log::debug!("Actor '{}' removed from system '{}'.", path, &self.name);
        }
    }

    fn reap(&self, path: &ActorPath) {
        if let Some((_, handle)) = self.actors.remove(path) {
            if let Ok(mut draining) = self.draining.lock() {
                draining.push(handle);
            }
        }
    }

    fn take_draining(&self) -> Vec<JoinHandle<()>> {
        self.draining
            .lock()
            .map(|mut draining| std::mem::take(&mut *draining))
            .unwrap_or_default()
    }
}

impl<E: SystemEvent> std::fmt::Debug for ActorSystem<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorSystem")
            .field("name", &self.name)
            .field("live_actors", &self.live_actors())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

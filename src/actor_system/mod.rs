//! Tiny actor runtime on top of tokio.
//!
//! Every actor runs as its own tokio task draining an unbounded mailbox, one
//! message at a time. Messages are sent fire-and-forget with `tell`, optionally
//! tagged with a sender so the receiving actor can reply. A system-wide stop
//! signal tears every actor down at once.

mod actor;
mod bus;
mod system;

pub use actor::{Actor, ActorContext, ActorError, ActorPath, ActorRef, Handler, Message, Recipient};

pub use bus::EventBus;
pub use system::{ActorSystem, SystemEvent};

pub use async_trait::async_trait;

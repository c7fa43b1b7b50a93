//! Actor path - unique address of a running actor.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::fmt::{Error, Formatter};

/// Unique identifier for running actors, e.g. `/HelloMessageSystem/masterActor`.
#[derive(Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct ActorPath(Vec<String>);

impl ActorPath {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment of the path, the actor's own name.
    pub fn key(&self) -> String {
        self.0.last().cloned().unwrap_or_default()
    }

    pub fn level(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for ActorPath {
    fn from(str: &str) -> Self {
        let tokens: Vec<String> = str
            .split('/')
            .filter(|x| !x.trim().is_empty())
            .map(|s| s.to_string())
            .collect();
        ActorPath(tokens)
    }
}

impl std::ops::Div<&str> for ActorPath {
    type Output = ActorPath;

    fn div(self, rhs: &str) -> Self::Output {
        let mut keys = self.0;
        keys.extend(
            rhs.split('/')
                .filter(|x| !x.trim().is_empty())
                .map(|s| s.to_string()),
        );
        ActorPath(keys)
    }
}

impl std::fmt::Display for ActorPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self.level().cmp(&1) {
            Ordering::Less => write!(f, "/"),
            _ => write!(f, "/{}", self.0.join("/")),
        }
    }
}

impl std::fmt::Debug for ActorPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        std::fmt::Display::fmt(self, f)
    }
}

use std::env;

#[derive(Debug, Clone)]
pub struct HelloConfig {
    pub system_name: String,
    pub worker_threads: usize,
    pub event_capacity: usize,
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            system_name: "HelloMessageSystem".to_string(),
            worker_threads: 4,
            event_capacity: 64,
        }
    }
}

impl HelloConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each setting.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("HELLO_SYSTEM_NAME") {
            if !name.trim().is_empty() {
                config.system_name = name.trim().to_string();
            }
        }

        if let Some(threads) = lookup("HELLO_WORKER_THREADS") {
            match threads.parse::<usize>() {
                Ok(t) if t > 0 => config.worker_threads = t,
                _ => log::warn!("Ignoring invalid HELLO_WORKER_THREADS={}", threads),
            }
        }

        if let Some(capacity) = lookup("HELLO_EVENT_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(c) if c > 0 => config.event_capacity = c,
                _ => log::warn!("Ignoring invalid HELLO_EVENT_CAPACITY={}", capacity),
            }
        }

        config
    }
}

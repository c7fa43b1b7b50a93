use std::io::Write;
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// Where the Master prints its result.
#[derive(Clone, Debug, Default)]
pub enum Console {
    #[default]
    Stdout,
    /// Keeps printed lines in memory instead.
    #[cfg(test)]
    Captured(Arc<Mutex<Vec<String>>>),
}

impl Console {
    #[cfg(test)]
    pub fn captured() -> Self {
        Console::Captured(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn print_line(&self, line: &str) {
        match self {
            Console::Stdout => {
                let mut stdout = std::io::stdout().lock();
                if let Err(error) = writeln!(stdout, "{line}").and_then(|_| stdout.flush()) {
                    log::error!("Failed to write to stdout: {}", error);
                }
            }
            #[cfg(test)]
            Console::Captured(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line.to_string());
                }
            }
        }
    }

    /// Lines printed so far. Always empty for `Stdout`.
    #[cfg(test)]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Console::Stdout => Vec::new(),
            Console::Captured(lines) => lines
                .lock()
                .map(|lines| lines.clone())
                .unwrap_or_default(),
        }
    }
}

//! A service for greeting someone.
//!
//! The current greeting is shared by every request. Reads and writes are
//! atomic, but a message may be formatted with a greeting that is being
//! replaced at the same time. The last completed update wins.

use arc_swap::ArcSwap;
use std::{fmt::Debug, sync::Arc};
use tracing::instrument;

/// The name used when nobody in particular is greeted.
pub const DEFAULT_NAME: &str = "World";

/// The greeting used when none is configured.
pub const DEFAULT_GREETING: &str = "Ciao";

/// Formats a greeting message, e.g. `Ciao Joe!`.
pub fn format_message(greeting: &str, name: &str) -> String {
    format!("{greeting} {name}!")
}

/// Owns the current greeting.
///
/// Cloning is cheap and every clone refers to the same greeting.
#[derive(Clone)]
pub struct GreetingService {
    greeting: Arc<ArcSwap<String>>,
}

impl GreetingService {
    /// Constructs a new [`GreetingService`] starting with `greeting`.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: Arc::new(ArcSwap::from_pointee(greeting.into())),
        }
    }

    /// Returns the current greeting.
    pub fn greeting(&self) -> Arc<String> {
        self.greeting.load_full()
    }

    /// Greets the world with the current greeting.
    #[instrument(ret)]
    pub fn default_message(&self) -> String {
        self.message(DEFAULT_NAME)
    }

    /// Greets `name` with the current greeting.
    ///
    /// The name is used as-is, an empty name gives `"Ciao !"`.
    #[instrument(ret)]
    pub fn message(&self, name: &str) -> String {
        format_message(&self.greeting.load(), name)
    }

    /// Replaces the greeting and returns the new value.
    #[instrument]
    pub fn update_greeting(&self, greeting: String) -> Arc<String> {
        let greeting = Arc::new(greeting);
        self.greeting.store(greeting.clone());
        tracing::info!("greeting set to {:?}", greeting);
        greeting
    }
}

impl Default for GreetingService {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl Debug for GreetingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingService")
            .field("greeting", &self.greeting.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn default_greeting_is_ciao() {
        let service = GreetingService::default();
        assert_eq!("Ciao World!", service.default_message());
        assert_eq!("Ciao Joe!", service.message("Joe"));
    }

    #[test]
    fn update_changes_later_messages() {
        let service = GreetingService::default();
        assert_eq!("Hola", *service.update_greeting("Hola".to_string()));
        assert_eq!("Hola World!", service.default_message());
        assert_eq!("Hola Joe!", service.message("Joe"));
    }

    #[test]
    fn update_is_visible_through_clones() {
        let service = GreetingService::new("Hello");
        let other = service.clone();
        other.update_greeting("Bonjour".to_string());
        assert_eq!("Bonjour", *service.greeting());
    }

    #[test]
    fn empty_values_are_accepted() {
        let service = GreetingService::default();
        assert_eq!("Ciao !", service.message(""));
        assert_eq!("", *service.update_greeting(String::new()));
        assert_eq!(" World!", service.default_message());
    }

    #[test]
    fn update_is_idempotent() {
        let once = GreetingService::default();
        once.update_greeting("Hej".to_string());
        let twice = GreetingService::default();
        twice.update_greeting("Hej".to_string());
        twice.update_greeting("Hej".to_string());
        assert_eq!(once.greeting(), twice.greeting());
        assert_eq!(once.message("Joe"), twice.message("Joe"));
    }

    #[test]
    fn concurrent_updates_never_tear() {
        let service = GreetingService::default();
        let candidates = ["Hola", "Hallo", "Bonjour", "Namaste"];
        let handles: Vec<_> = candidates
            .iter()
            .map(|greeting| {
                let service = service.clone();
                let greeting = greeting.to_string();
                thread::spawn(move || {
                    for _ in 0..100 {
                        service.update_greeting(greeting.clone());
                        let message = service.default_message();
                        assert!(candidates
                            .iter()
                            .any(|g| message == format_message(g, DEFAULT_NAME)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(candidates.contains(&service.greeting().as_str()));
    }
}

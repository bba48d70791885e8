//! Observability sink passed into every pipeline stage.
//!
//! Components never talk to the global logger directly: they receive a
//! `&dyn Sink` and emit leveled events through it. [`LogSink`] forwards to
//! the `log` facade (and from there to whatever `init_logging` installed),
//! while [`MemorySink`] keeps events in memory so tests can inspect them.

use log::Level;

use std::{cell::RefCell, fmt};

/// Receiver of leveled events.
pub trait Sink {
    /// Records one event.
    fn event(&self, level: Level, args: fmt::Arguments<'_>);

    fn error(&self, args: fmt::Arguments<'_>) {
        self.event(Level::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.event(Level::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.event(Level::Info, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.event(Level::Debug, args);
    }
}

/// Forwards events to the `log` facade under a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    target: &'static str,
}

impl LogSink {
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(env!("CARGO_CRATE_NAME"))
    }
}

impl Sink for LogSink {
    fn event(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target, level, "{}", args);
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.borrow().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Sink for MemorySink {
    fn event(&self, level: Level, args: fmt::Arguments<'_>) {
        self.events.borrow_mut().push((level, args.to_string()));
    }
}

//! User-facing notification channels.
//!
//! The generator never prints. Progress lines, skip warnings and verbose
//! traces go through a [`HostUi`] supplied by whoever drives the run.

use std::cell::RefCell;

use tracing::{debug, info, warn};

/// Three one-way channels back to the user.
pub trait HostUi {
    /// An informational line (e.g. "Adding Models/Invoice.cs to project.").
    fn info(&self, message: &str);

    /// A non-fatal problem; generation continues.
    fn warning(&self, message: &str);

    /// Detail shown only when the user asked for it.
    fn verbose(&self, message: &str);
}

impl<H: HostUi + ?Sized> HostUi for &H {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warning(&self, message: &str) {
        (**self).warning(message)
    }

    fn verbose(&self, message: &str) {
        (**self).verbose(message)
    }
}

/// Routes the channels into `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHost;

impl HostUi for TracingHost {
    fn info(&self, message: &str) {
        info!(target: "mf_scaffold::host", "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: "mf_scaffold::host", "{message}");
    }

    fn verbose(&self, message: &str) {
        debug!(target: "mf_scaffold::host", "{message}");
    }
}

/// Channel a recorded message arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLevel {
    Info,
    Warning,
    Verbose,
}

/// One recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMessage {
    pub level: HostLevel,
    pub text: String,
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: RefCell<Vec<HostMessage>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message received so far.
    pub fn messages(&self) -> Vec<HostMessage> {
        self.messages.borrow().clone()
    }

    /// Texts received on one channel.
    pub fn texts(&self, level: HostLevel) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|message| message.level == level)
            .map(|message| message.text.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.texts(HostLevel::Info)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.texts(HostLevel::Warning)
    }

    fn push(&self, level: HostLevel, message: &str) {
        self.messages.borrow_mut().push(HostMessage {
            level,
            text: message.to_string(),
        });
    }
}

impl HostUi for RecordingHost {
    fn info(&self, message: &str) {
        self.push(HostLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(HostLevel::Warning, message);
    }

    fn verbose(&self, message: &str) {
        self.push(HostLevel::Verbose, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_keeps_order_and_channels() {
        let host = RecordingHost::new();
        host.info("one");
        host.warning("two");
        host.verbose("three");
        host.info("four");

        assert_eq!(host.infos(), vec!["one", "four"]);
        assert_eq!(host.warnings(), vec!["two"]);
        assert_eq!(host.texts(HostLevel::Verbose), vec!["three"]);
        assert_eq!(host.messages().len(), 4);
    }

    #[test]
    fn test_host_by_reference() {
        let host = RecordingHost::new();
        let by_ref: &dyn HostUi = &host;
        (&by_ref).warning("careful");
        assert_eq!(host.warnings(), vec!["careful"]);
    }
}

use std::sync::{Arc, Mutex};

use nuget_restore::hooks::{ON_DATA, ON_DONE, ON_ERROR, ON_START};
use nuget_restore::{Hooks, MessageKind, RestoreMessage, Sink};

/// One observed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// `"sink:log"`, `"sink:error"` or the hook name.
    pub channel: String,
    pub kind: MessageKind,
    pub msg: String,
}

/// Collects everything sent to recording sinks and hooks, in order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, channel: &str, record: &RestoreMessage) {
        self.events.lock().unwrap().push(Recorded {
            channel: channel.to_string(),
            kind: record.kind,
            msg: record.msg.clone(),
        });
    }

    /// A custom sink that records under `sink:<name>`.
    pub fn sink(&self, name: &str) -> Sink {
        let recorder = self.clone();
        let channel = format!("sink:{name}");
        Sink::custom(move |record| recorder.push(&channel, record))
    }

    /// A hook table with all four hooks recording under their own names.
    pub fn hooks(&self) -> Hooks {
        let hooks = Hooks::new();
        for name in [ON_START, ON_DATA, ON_ERROR, ON_DONE] {
            let recorder = self.clone();
            hooks.set(name, move |record| recorder.push(name, record));
        }
        hooks
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn on(&self, channel: &str) -> Vec<Recorded> {
        self.events()
            .into_iter()
            .filter(|e| e.channel == channel)
            .collect()
    }

    pub fn count(&self, channel: &str) -> usize {
        self.on(channel).len()
    }

    pub fn messages(&self, channel: &str) -> Vec<String> {
        self.on(channel).into_iter().map(|e| e.msg).collect()
    }
}

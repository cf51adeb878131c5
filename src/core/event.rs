use crate::core::{Priority, Ticks};

// One entry per scheduler action, in the exact order produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Running {
        step: Ticks,
        name: String,
        priority: Priority,
        remaining: Ticks,
    },
    Requeued {
        name: String,
        new_priority: Priority,
    },
    Finished {
        name: String,
    },
    QueueSnapshot {
        entries: Vec<(String, Priority)>,
    },
    Complete,
}

pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{AdmitError, SchedCore};
pub use event::SchedEvent;
pub use state::{Priority, ProcKey, ProcState, Process, ProcessTable, QueueRank, ReadyQueue, Ticks};

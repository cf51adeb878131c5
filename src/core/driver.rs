use std::{error, fmt};

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{Priority, ProcKey, ProcState, ProcessTable, ReadyQueue, Ticks},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmitError {
    InvalidProcessDefinition { name: String, service_time: Ticks },
}

impl fmt::Display for AdmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProcessDefinition { name, service_time } => write!(
                f,
                "process {name:?} has invalid service time {service_time}; must be > 0"
            ),
        }
    }
}

impl error::Error for AdmitError {}

pub struct SchedCore {
    pub table: ProcessTable,
    pub queue: ReadyQueue,
    now: Ticks,
    observer: Observer,
}

impl SchedCore {
    pub fn new() -> Self {
        Self {
            table: ProcessTable::new(),
            queue: ReadyQueue::new(),
            now: 0,
            observer: Observer::new(),
        }
    }

    pub fn admit(
        &mut self,
        name: impl Into<String>,
        service_time: Ticks,
        priority: Priority,
    ) -> Result<ProcKey, AdmitError> {
        let name = name.into();
        if service_time == 0 {
            return Err(AdmitError::InvalidProcessDefinition { name, service_time });
        }
        let key = self.table.admit(name, service_time, priority);
        self.queue.insert(key, priority);
        Ok(key)
    }

    // One quantum: pop the head, run it for a unit, then retire or requeue it.
    // Returns the key of the process that finished on this step, if any.
    pub fn step(&mut self, log: &mut Vec<SchedEvent>) -> Option<ProcKey> {
        let key = self.queue.pop_highest()?;
        self.now += 1;

        // Decay and service accounting commit together, one transition.
        // In its own block to release the table borrow before requeue/release.
        let (finished, name, new_priority) = {
            let proc = self
                .table
                .get_mut(key)
                .expect("scheduled process missing from table");
            proc.state = ProcState::Running;
            log.push(SchedEvent::Running {
                step: self.now,
                name: proc.name.clone(),
                priority: proc.priority,
                remaining: proc.remaining(),
            });

            proc.priority -= 1;
            proc.run_time += 1;

            let finished = proc.run_time >= proc.service_time;
            proc.state = if finished {
                ProcState::Finished
            } else {
                ProcState::Ready
            };
            (finished, proc.name.clone(), proc.priority)
        };

        let completed = if finished {
            let record = self.table.release(key);
            log.push(SchedEvent::Finished { name: record.name });
            Some(key)
        } else {
            log.push(SchedEvent::Requeued { name, new_priority });
            self.queue.insert(key, new_priority);
            None
        };

        if !self.queue.is_empty() {
            log.push(SchedEvent::QueueSnapshot {
                entries: self.queue_snapshot(),
            });
        }

        self.observer.observe(&self.table, &self.queue);
        completed
    }

    pub fn run(&mut self) -> Vec<SchedEvent> {
        let mut log = Vec::new();
        while !self.queue.is_empty() {
            self.step(&mut log);
        }
        log.push(SchedEvent::Complete);
        log
    }

    // Name-resolved view of the queue, highest priority first.
    pub fn queue_snapshot(&self) -> Vec<(String, Priority)> {
        self.queue
            .snapshot()
            .into_iter()
            .map(|(key, priority)| {
                let proc = self.table.get(key).expect("queued process missing from table");
                (proc.name.clone(), priority)
            })
            .collect()
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_service_time() {
        let mut core = SchedCore::new();
        let err = core.admit("A", 0, 3).unwrap_err();
        assert_eq!(
            err,
            AdmitError::InvalidProcessDefinition {
                name: "A".into(),
                service_time: 0,
            }
        );
        assert!(core.is_idle());
        assert!(core.table.is_empty());
    }

    #[test]
    fn single_step_decays_priority_and_accounts_service() {
        let mut core = SchedCore::new();
        let key = core.admit("A", 3, 7).unwrap();
        let mut log = Vec::new();
        assert_eq!(core.step(&mut log), None);
        let proc = core.table.get(key).unwrap();
        assert_eq!(proc.priority, 6);
        assert_eq!(proc.run_time, 1);
        assert_eq!(proc.state, ProcState::Ready);
        assert_eq!(core.now(), 1);
    }

    #[test]
    fn final_quantum_retires_the_process() {
        let mut core = SchedCore::new();
        let key = core.admit("A", 1, 0).unwrap();
        let mut log = Vec::new();
        assert_eq!(core.step(&mut log), Some(key));
        assert!(core.table.is_empty());
        assert!(core.is_idle());
        assert_eq!(log.last(), Some(&SchedEvent::Finished { name: "A".into() }));
    }

    #[test]
    fn two_unit_process_event_log() {
        let mut core = SchedCore::new();
        core.admit("A", 2, 3).unwrap();
        let log = core.run();
        assert_eq!(
            log,
            vec![
                SchedEvent::Running {
                    step: 1,
                    name: "A".into(),
                    priority: 3,
                    remaining: 2,
                },
                SchedEvent::Requeued {
                    name: "A".into(),
                    new_priority: 2,
                },
                SchedEvent::QueueSnapshot {
                    entries: vec![("A".into(), 2)],
                },
                SchedEvent::Running {
                    step: 2,
                    name: "A".into(),
                    priority: 2,
                    remaining: 1,
                },
                SchedEvent::Finished { name: "A".into() },
                SchedEvent::Complete,
            ]
        );
    }

    #[test]
    fn snapshot_reports_current_priorities() {
        let mut core = SchedCore::new();
        core.admit("A", 2, 5).unwrap();
        core.admit("B", 2, 3).unwrap();
        assert_eq!(
            core.queue_snapshot(),
            vec![("A".to_string(), 5), ("B".to_string(), 3)]
        );
    }
}

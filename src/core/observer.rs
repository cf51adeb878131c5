use super::state::{ProcState, ProcessTable, ReadyQueue};

#[derive(Debug)]
pub struct Observer {
    steps: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { steps: 0 }
    }

    pub fn observe(&mut self, table: &ProcessTable, queue: &ReadyQueue) {
        self.steps += 1;

        // Between steps every resident process is Ready and queued.
        debug_assert_eq!(
            table.len(),
            queue.len(),
            "table population diverged from queue population at step {}",
            self.steps
        );

        for (key, rank) in queue.iter() {
            let Some(proc) = table.get(key) else {
                debug_assert!(false, "queued process {key:?} missing from table");
                continue;
            };
            debug_assert_eq!(
                proc.state,
                ProcState::Ready,
                "queued process {} must be Ready",
                proc.name
            );
            debug_assert!(
                proc.run_time < proc.service_time,
                "queued process {} has no service left",
                proc.name
            );
            debug_assert_eq!(
                rank.priority, proc.priority,
                "queue rank out of date for {}",
                proc.name
            );
        }

        for (_, proc) in table.iter() {
            debug_assert_ne!(
                proc.state,
                ProcState::Running,
                "process {} left Running between steps",
                proc.name
            );
            debug_assert_ne!(
                proc.state,
                ProcState::Finished,
                "finished process {} still resident",
                proc.name
            );
        }

        let snapshot = queue.snapshot();
        for pair in snapshot.windows(2) {
            debug_assert!(
                pair[0].1 >= pair[1].1,
                "ready queue out of priority order"
            );
        }
    }
}

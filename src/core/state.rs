use keyed_priority_queue::KeyedPriorityQueue;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;

pub type Ticks = u64;
pub type Priority = i64;

new_key_type! {
    pub struct ProcKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub name: String,
    pub service_time: Ticks,
    pub run_time: Ticks,
    pub priority: Priority,
    pub state: ProcState,
}

impl Process {
    pub fn remaining(&self) -> Ticks {
        self.service_time - self.run_time
    }
}

#[derive(Debug)]
pub struct ProcessTable {
    procs: SlotMap<ProcKey, Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            procs: SlotMap::with_key(),
        }
    }

    pub fn admit(
        &mut self,
        name: impl Into<String>,
        service_time: Ticks,
        priority: Priority,
    ) -> ProcKey {
        self.procs.insert(Process {
            name: name.into(),
            service_time,
            run_time: 0,
            priority,
            state: ProcState::Ready,
        })
    }

    // Dropping the record is the entire reclamation of a finished process.
    pub fn release(&mut self, key: ProcKey) -> Process {
        self.procs.remove(key).expect("releasing process not in table")
    }

    pub fn get(&self, key: ProcKey) -> Option<&Process> {
        self.procs.get(key)
    }

    pub fn get_mut(&mut self, key: ProcKey) -> Option<&mut Process> {
        self.procs.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcKey, &Process)> {
        self.procs.iter()
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }
}

// KeyedPriorityQueue is a max-heap: higher priority must rank first, and
// among equal priorities the earlier insertion must rank first, so the seq
// comparison is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueRank {
    pub priority: Priority,
    seq: u64,
}

impl PartialOrd for QueueRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
pub struct ReadyQueue {
    entries: KeyedPriorityQueue<ProcKey, QueueRank>,
    // Bumped on every insert, so a requeued tie lands behind existing ties
    next_seq: u64,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            entries: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }

    // Caller contract: the process behind `key` is Ready.
    pub fn insert(&mut self, key: ProcKey, priority: Priority) {
        let rank = QueueRank {
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let previous = self.entries.push(key, rank);
        debug_assert!(previous.is_none(), "process {key:?} was already queued");
    }

    pub fn pop_highest(&mut self) -> Option<ProcKey> {
        self.entries.pop().map(|(key, _)| key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcKey, QueueRank)> + '_ {
        self.entries.iter().map(|(key, rank)| (*key, *rank))
    }

    // Ordered reporting view; ranks are unique, so the order is total.
    pub fn snapshot(&self) -> Vec<(ProcKey, Priority)> {
        let mut ordered: Vec<(ProcKey, QueueRank)> = self.iter().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        ordered
            .into_iter()
            .map(|(key, rank)| (key, rank.priority))
            .collect()
    }
}

use crate::domain::announcement::model::Announcement;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Mutex;
use tokio::sync::Notify;

struct QueuedAnnouncement {
    priority_rank: u8,
    sequence: u64,
    announcement: Announcement,
}

impl QueuedAnnouncement {
    fn key(&self) -> (u8, u64) {
        (self.priority_rank, self.sequence)
    }
}

impl PartialEq for QueuedAnnouncement {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedAnnouncement {}

impl PartialOrd for QueuedAnnouncement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedAnnouncement {
    // Inverted so the max-heap pops the lowest (rank, sequence) first:
    // highest urgency, then FIFO within equal urgency.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Priority queue shared between submitters and the scheduler loop.
///
/// Sequence numbers are handed out by a single atomic counter, so two
/// announcements never tie and equal priorities drain in submission
/// order. `notify_one` stores a permit when nobody is waiting, which
/// keeps a push that races the consumer from being lost.
pub struct AnnouncementQueue {
    heap: Mutex<BinaryHeap<QueuedAnnouncement>>,
    next_sequence: AtomicU64,
    notify: Notify,
}

impl AnnouncementQueue {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            next_sequence: AtomicU64::new(0),
            notify: Notify::new(),
        }
    }

    /// Enqueue and return the assigned sequence number.
    pub fn push(&self, announcement: Announcement) -> u64 {
        let sequence = self.next_sequence.fetch_add(1, AtomicOrdering::SeqCst);
        let rank = announcement.priority.rank();

        self.heap
            .lock()
            .expect("announcement queue lock poisoned")
            .push(QueuedAnnouncement {
                priority_rank: rank,
                sequence,
                announcement,
            });

        self.notify.notify_one();
        sequence
    }

    pub fn pop(&self) -> Option<(u64, Announcement)> {
        self.heap
            .lock()
            .expect("announcement queue lock poisoned")
            .pop()
            .map(|queued| (queued.sequence, queued.announcement))
    }

    pub fn len(&self) -> usize {
        self.heap
            .lock()
            .expect("announcement queue lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait until a push happens (or consume an already stored permit).
    pub async fn wait_for_work(&self) {
        self.notify.notified().await;
    }
}

impl Default for AnnouncementQueue {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};

use super::{ScreenEvent, TimerKind};

struct TimerSlot {
    generation: u64,
    repeating: bool,
    task: JoinHandle<()>,
}

/// One cancellable timer per kind. Timers post `ScreenEvent::Timer` back into
/// the screen queue; rescheduling a kind aborts its previous task first.
pub struct TimerSet {
    tx: mpsc::WeakSender<ScreenEvent>,
    slots: HashMap<TimerKind, TimerSlot>,
    next_generation: u64,
    scheduled: u64,
}

impl TimerSet {
    pub fn new(tx: mpsc::WeakSender<ScreenEvent>) -> Self {
        Self {
            tx,
            slots: HashMap::new(),
            next_generation: 0,
            scheduled: 0,
        }
    }

    /// Fire `kind` once after `delay`.
    pub fn schedule_once(&mut self, kind: TimerKind, delay: Duration) {
        let generation = self.begin(kind);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            post(&tx, kind, generation).await;
        });
        self.slots.insert(
            kind,
            TimerSlot {
                generation,
                repeating: false,
                task,
            },
        );
        tracing::debug!(?kind, ?delay, generation, "Timer scheduled");
    }

    /// Fire `kind` every `period`, starting one period from now.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) {
        let generation = self.begin(kind);
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if !post(&tx, kind, generation).await {
                    break;
                }
            }
        });
        self.slots.insert(
            kind,
            TimerSlot {
                generation,
                repeating: true,
                task,
            },
        );
        tracing::debug!(?kind, ?period, generation, "Repeating timer scheduled");
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(slot) = self.slots.remove(&kind) {
            slot.task.abort();
            tracing::debug!(?kind, generation = slot.generation, "Timer cancelled");
        }
    }

    pub fn cancel_all(&mut self) {
        for kind in TimerKind::ALL {
            self.cancel(kind);
        }
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Number of timers currently armed.
    pub fn pending_count(&self) -> usize {
        self.slots.len()
    }

    /// Total number of schedule calls since creation.
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    /// Accept a fired timer event. Stale generations (cancelled or replaced
    /// timers whose event was already queued) are rejected. One-shot slots are
    /// released on acceptance.
    pub fn accept(&mut self, kind: TimerKind, generation: u64) -> bool {
        match self.slots.get(&kind) {
            Some(slot) if slot.generation == generation => {
                if !slot.repeating {
                    self.slots.remove(&kind);
                }
                true
            }
            _ => false,
        }
    }

    fn begin(&mut self, kind: TimerKind) -> u64 {
        self.cancel(kind);
        self.next_generation += 1;
        self.scheduled += 1;
        self.next_generation
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        for slot in self.slots.values() {
            slot.task.abort();
        }
    }
}

async fn post(tx: &mpsc::WeakSender<ScreenEvent>, kind: TimerKind, generation: u64) -> bool {
    let Some(tx) = tx.upgrade() else {
        return false;
    };
    tx.send(ScreenEvent::Timer { kind, generation }).await.is_ok()
}

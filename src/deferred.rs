// Cancellable "run after this tick" tasks.
// No timers, no threads: whoever owns the queue decides where the tick
// boundary is and calls drain() there.

/// Identifies one scheduled task so it can be cancelled later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

pub struct DeferredQueue<T> {
    next_id: u64,
    pending: Vec<(TaskHandle, T)>, // scheduling order
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self { next_id: 0, pending: Vec::new() }
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, task));
        handle
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _)| *h != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every due task, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.pending).into_iter().map(|(_, t)| t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_scheduling_order() {
        let mut q = DeferredQueue::new();
        q.schedule("a");
        q.schedule("b");
        assert_eq!(q.drain(), vec!["a", "b"]);
        assert!(q.is_empty());
    }

    #[test]
    fn cancelled_task_never_runs() {
        let mut q = DeferredQueue::new();
        let stale = q.schedule(1);
        assert!(q.cancel(stale));
        let fresh = q.schedule(2);
        assert!(!q.is_pending(stale));
        assert!(q.is_pending(fresh));
        assert_eq!(q.drain(), vec![2]);
    }

    #[test]
    fn cancelling_twice_or_after_drain_is_harmless() {
        let mut q = DeferredQueue::new();
        let h = q.schedule(());
        q.drain();
        assert!(!q.cancel(h));
        assert!(!q.cancel(h));
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut q = DeferredQueue::new();
        let a = q.schedule(0);
        q.drain();
        let b = q.schedule(0);
        assert_ne!(a, b);
    }
}

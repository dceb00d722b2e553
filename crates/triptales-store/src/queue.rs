//! FIFO write serialization

use std::future::Future;
use tokio::sync::Mutex;

/// Serializes mutations of a shared resource
///
/// Tasks run one at a time in the order they were queued. A task that fails
/// (or panics) releases its turn, so later tasks still run in order.
#[derive(Debug, Default)]
pub struct WriteQueue {
    turn: Mutex<()>,
}

impl WriteQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once every previously queued task has finished
    ///
    /// Anything the task reads must be read inside the task, not before
    /// queuing, or concurrent writers can overwrite each other.
    pub async fn with_lock<F, Fut, T>(&self, task: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _turn = self.turn.lock().await;
        task().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_tasks_run_in_queue_order() {
        let queue = Arc::new(WriteQueue::new());
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for i in 0..5u64 {
            let queue = Arc::clone(&queue);
            let log = Arc::clone(&log);
            handles.push(tokio::spawn(async move {
                queue
                    .with_lock(|| async {
                        // Later tasks sleep less; order must still hold
                        tokio::time::sleep(Duration::from_millis(10 * (5 - i))).await;
                        log.lock().unwrap().push(i);
                    })
                    .await
            }));
            // Give each task time to join the queue before the next
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failure_does_not_block_followers() {
        let queue = WriteQueue::new();

        let first: Result<(), String> = queue.with_lock(|| async { Err("disk full".to_string()) }).await;
        assert!(first.is_err());

        let second: Result<u32, String> = queue.with_lock(|| async { Ok(7) }).await;
        assert_eq!(second, Ok(7));
    }

    #[tokio::test]
    async fn test_no_overlap() {
        let queue = Arc::new(WriteQueue::new());
        let active = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let max_seen = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let queue = Arc::clone(&queue);
            let active = Arc::clone(&active);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                queue
                    .with_lock(|| async {
                        use std::sync::atomic::Ordering;
                        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        active.fetch_sub(1, Ordering::SeqCst);
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}

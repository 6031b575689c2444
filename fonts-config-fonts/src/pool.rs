//! Bounded-parallelism worker pool for font scanning.
//!
//! Scanning a font means spawning an external tool, so the work is
//! process-bound rather than CPU-bound. Workers are plain OS threads; the
//! number doing work at any moment is capped by a [`TokenPool`] so a large
//! font tree cannot exhaust file descriptors or the process table.

use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

/// Default number of concurrent scans.
pub const DEFAULT_SCAN_TOKENS: usize = 100;

/// A counting semaphore handing out scan tokens.
#[derive(Debug)]
pub struct TokenPool {
    available: Mutex<usize>,
    released: Condvar,
    capacity: usize,
}

impl TokenPool {
    /// Create a pool with `capacity` tokens (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            available: Mutex::new(capacity),
            released: Condvar::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tokens not currently held.
    pub fn available(&self) -> usize {
        *self.available.lock()
    }

    /// Block until a token is free and take it.
    pub fn acquire(&self) -> TokenGuard<'_> {
        let mut available = self.available.lock();
        while *available == 0 {
            self.released.wait(&mut available);
        }
        *available -= 1;
        TokenGuard { pool: self }
    }

    fn release(&self) {
        *self.available.lock() += 1;
        self.released.notify_one();
    }
}

/// A held token; returned to its pool on drop.
#[derive(Debug)]
pub struct TokenGuard<'a> {
    pool: &'a TokenPool,
}

impl Drop for TokenGuard<'_> {
    fn drop(&mut self) {
        self.pool.release();
    }
}

/// Runs jobs on worker threads and folds their results into one accumulator.
#[derive(Debug, Clone)]
pub struct ScanPool {
    tokens: Arc<TokenPool>,
}

impl Default for ScanPool {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_TOKENS)
    }
}

impl ScanPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            tokens: Arc::new(TokenPool::new(capacity)),
        }
    }

    /// Share an existing token pool, so several pools respect one limit.
    pub fn with_tokens(tokens: Arc<TokenPool>) -> Self {
        Self { tokens }
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    /// Run `work` over every job and fold the results with `merge`.
    ///
    /// Each worker takes a token, runs one job, then merges the result into
    /// the accumulator under its mutex. The call returns only once every
    /// worker has joined, so callers never observe a partial accumulator.
    /// Merge order is unspecified; `merge` must not depend on it.
    ///
    /// A panic in `work` or `merge` is re-raised after the join.
    pub fn run<J, R, A, W, M>(&self, jobs: Vec<J>, init: A, work: W, merge: M) -> A
    where
        J: Send,
        R: Send,
        A: Send,
        W: Fn(J) -> R + Sync,
        M: Fn(&mut A, R) + Sync,
    {
        let workers = self.tokens.capacity().min(jobs.len());
        if workers == 0 {
            return init;
        }
        log::debug!("Scanning {} jobs on {} workers", jobs.len(), workers);

        let queue = Mutex::new(jobs.into_iter());
        let acc = Mutex::new(init);
        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        let Some(job) = queue.lock().next() else {
                            break;
                        };
                        let result = {
                            let _token = self.tokens.acquire();
                            work(job)
                        };
                        merge(&mut *acc.lock(), result);
                    }
                });
            }
        });
        acc.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_token_pool_acquire_release() {
        let pool = TokenPool::new(2);
        assert_eq!(pool.available(), 2);
        let a = pool.acquire();
        let _b = pool.acquire();
        assert_eq!(pool.available(), 0);
        drop(a);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        assert_eq!(TokenPool::new(0).capacity(), 1);
    }

    #[test]
    fn test_run_collects_every_result() {
        let pool = ScanPool::new(4);
        let total = pool.run((1..=100u64).collect(), 0u64, |n| n * 2, |acc, r| *acc += r);
        assert_eq!(total, 10100);
    }

    #[test]
    fn test_run_without_jobs_returns_init() {
        let pool = ScanPool::default();
        let out = pool.run(Vec::<u32>::new(), vec![7], |n| n, |acc, n| acc.push(n));
        assert_eq!(out, vec![7]);
    }

    #[test]
    fn test_run_never_exceeds_capacity() {
        let pool = ScanPool::new(3);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);
        let seen = pool.run(
            (0..24).collect(),
            Vec::new(),
            |job: i32| {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(5));
                active.fetch_sub(1, Ordering::SeqCst);
                job
            },
            |acc: &mut Vec<i32>, job| acc.push(job),
        );
        assert!(peak.load(Ordering::SeqCst) <= 3);
        let mut seen = seen;
        seen.sort_unstable();
        assert_eq!(seen, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_shared_tokens_cap_across_pools() {
        let tokens = Arc::new(TokenPool::new(2));
        let a = ScanPool::with_tokens(Arc::clone(&tokens));
        let b = ScanPool::with_tokens(tokens);
        assert_eq!(a.capacity(), 2);
        assert_eq!(b.capacity(), 2);
        let _held = a.tokens.acquire();
        assert_eq!(b.tokens.available(), 1);
    }
}

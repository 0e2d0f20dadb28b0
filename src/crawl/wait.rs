use crate::error::Result;
use std::time::{Duration, Instant};

/// How a bounded wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    TimedOut,
}

impl WaitOutcome {
    pub fn is_ready(self) -> bool {
        self == WaitOutcome::Ready
    }
}

/// Blocking predicate wait with a bounded timeout
#[derive(Debug, Clone, Copy)]
pub struct Wait {
    timeout: Duration,
    interval: Duration,
}

impl Wait {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll `predicate` until it holds or the timeout elapses
    ///
    /// The predicate is always checked at least once, and once more after the
    /// deadline passes. Errors from the predicate end the wait immediately.
    pub fn until<F>(&self, mut predicate: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        let deadline = Instant::now() + self.timeout;

        loop {
            if predicate()? {
                return Ok(WaitOutcome::Ready);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(WaitOutcome::TimedOut);
            }

            std::thread::sleep(self.interval.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;

    #[test]
    fn test_ready_immediately() {
        let wait = Wait::new(Duration::from_millis(0), Duration::from_millis(10));
        assert_eq!(wait.until(|| Ok(true)).unwrap(), WaitOutcome::Ready);
    }

    #[test]
    fn test_ready_after_polls() {
        let wait = Wait::new(Duration::from_secs(5), Duration::from_millis(1));
        let mut calls = 0;
        let outcome = wait
            .until(|| {
                calls += 1;
                Ok(calls >= 3)
            })
            .unwrap();

        assert!(outcome.is_ready());
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_times_out() {
        let wait = Wait::new(Duration::from_millis(20), Duration::from_millis(5));
        let started = Instant::now();
        assert_eq!(wait.until(|| Ok(false)).unwrap(), WaitOutcome::TimedOut);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_predicate_error_propagates() {
        let wait = Wait::new(Duration::from_secs(5), Duration::from_millis(1));
        let result = wait.until(|| Err(CrawlError::EvaluationFailed("tab closed".to_string())));
        assert!(matches!(result, Err(CrawlError::EvaluationFailed(_))));
    }
}

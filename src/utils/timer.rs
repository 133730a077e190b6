//! Timing helpers

use std::time::{Duration, Instant};

/// Wall-clock timer for a scenario or a whole run
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in whole milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Stop the timer, logging the elapsed time under its label
    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::debug!("{} finished in {}ms", self.label, elapsed.as_millis());
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_timer() {
        let timer = Timer::start("TC001");
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 10);
        assert!(timer.stop() >= Duration::from_millis(10));
    }

    #[test]
    fn test_timer_across_await() {
        let elapsed = tokio_test::block_on(async {
            let timer = Timer::start("page load");
            tokio::time::sleep(Duration::from_millis(5)).await;
            timer.stop()
        });
        assert!(elapsed >= Duration::from_millis(5));
    }
}

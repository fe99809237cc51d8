//! Progress reporting
//!
//! The driver produces frames; observers only watch. Nothing here feeds back
//! into the simulation.

use std::time::Duration;

/// Snapshot of a run's progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Index of the frame just produced
    pub frame_index: u64,
    pub total_frames: u64,
    /// Wall time since the first frame started
    pub elapsed: Duration,
    /// Extrapolated from the average time per frame so far
    pub estimated_remaining: Duration,
    /// Frames done as a percentage of the total
    pub percent_complete: f32,
}

impl Progress {
    pub fn new(frame_index: u64, total_frames: u64, elapsed: Duration) -> Self {
        let done = frame_index + 1;
        let remaining = total_frames.saturating_sub(done);
        let per_frame = elapsed.as_secs_f64() / done as f64;
        let percent_complete = if total_frames == 0 {
            100.0
        } else {
            (done as f64 / total_frames as f64 * 100.0) as f32
        };
        Self {
            frame_index,
            total_frames,
            elapsed,
            estimated_remaining: Duration::from_secs_f64(per_frame * remaining as f64),
            percent_complete,
        }
    }
}

/// Receives progress snapshots from the frame driver
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that writes each snapshot to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, p: &Progress) {
        log::info!(
            "Frame: {}/{} | Time Passed: {:.2}s | Time Remaining: {:.2}s | Completion: {:.2}%",
            p.frame_index,
            p.total_frames,
            p.elapsed.as_secs_f64(),
            p.estimated_remaining.as_secs_f64(),
            p.percent_complete
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_math() {
        let p = Progress::new(9, 100, Duration::from_secs(10));
        assert_eq!(p.percent_complete, 10.0);
        // 1s per frame, 90 frames left
        assert_eq!(p.estimated_remaining, Duration::from_secs(90));
    }

    #[test]
    fn test_last_frame_has_nothing_remaining() {
        let p = Progress::new(99, 100, Duration::from_secs(3));
        assert_eq!(p.percent_complete, 100.0);
        assert_eq!(p.estimated_remaining, Duration::ZERO);
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |p: &Progress| seen.push(p.frame_index);
            observer.on_progress(&Progress::new(0, 2, Duration::ZERO));
            observer.on_progress(&Progress::new(1, 2, Duration::ZERO));
        }
        assert_eq!(seen, vec![0, 1]);
    }
}

use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub delta: f32,
}

/// Infinite iterator yielding frame numbers and timings.
/// Optionally stops after a fixed number of frames.
pub struct FrameIterator {
    frame_number: u64,
    limit: Option<u64>,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new(limit: Option<u64>) -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            limit,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.limit.is_some_and(|limit| self.frame_number >= limit) {
            return None;
        }

        let now = Instant::now();
        let info = FrameInfo {
            number: self.frame_number,
            delta: now.duration_since(self.last_frame_time).as_secs_f32(),
        };

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Averages frame deltas and reports every `interval` frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: u64,
    count: u64,
    accumulated: f32,
}

impl FrameStats {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            count: 0,
            accumulated: 0.0,
        }
    }

    /// Record a frame delta; returns the average fps once per interval
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.count += 1;
        self.accumulated += delta;

        if self.count < self.interval {
            return None;
        }

        let fps = if self.accumulated > 0.0 {
            self.count as f32 / self.accumulated
        } else {
            0.0
        };
        self.count = 0;
        self.accumulated = 0.0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterator_numbers_frames() {
        let numbers: Vec<u64> = FrameIterator::new(Some(3)).map(|f| f.number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
    }

    #[test]
    fn unlimited_iterator_keeps_going() {
        let mut frames = FrameIterator::new(None);
        assert_eq!(frames.by_ref().take(100).count(), 100);
        assert_eq!(frames.next().map(|f| f.number), Some(100));
    }

    #[test]
    fn deltas_are_non_negative() {
        let frames: Vec<FrameInfo> = FrameIterator::new(Some(5)).collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.delta >= 0.0));
    }

    #[test]
    fn stats_report_every_interval() {
        let mut stats = FrameStats::new(3);
        assert_eq!(stats.tick(0.02), None);
        assert_eq!(stats.tick(0.02), None);
        let fps = stats.tick(0.02).unwrap();
        assert!((fps - 50.0).abs() < 0.01);
        assert_eq!(stats.tick(0.02), None);
    }

    #[test]
    fn stats_handle_zero_delta() {
        let mut stats = FrameStats::new(1);
        assert_eq!(stats.tick(0.0), Some(0.0));
    }
}

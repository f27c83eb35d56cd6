use std::collections::VecDeque;

/// Envelope width used by the dashboard chart (20, 5%).
pub const ENVELOPE_PCT: f64 = 0.05;

/// Fixed-capacity trailing window that starts full.
///
/// Pre-filling with a seed value means the mean is defined from the first
/// push, at the cost of early averages leaning toward the seed.
#[derive(Debug, Clone)]
pub struct TrailingWindow {
    values: VecDeque<f64>,
    capacity: usize,
}

impl TrailingWindow {
    pub fn seeded(seed: f64, capacity: usize) -> Self {
        Self {
            values: std::iter::repeat(seed).take(capacity).collect(),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Upper and lower envelope bands around a moving average.
/// Returns (upper, lower).
pub fn envelope(moving_average: f64, pct: f64) -> (f64, f64) {
    (moving_average * (1.0 + pct), moving_average * (1.0 - pct))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

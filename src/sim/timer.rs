//! Delta-time periodic timer

use serde::{Deserialize, Serialize};

/// Fires once every `period` seconds of advanced time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    period: f32,
    elapsed: f32,
}

impl Timer {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`. Returns how many periods completed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let fired = (self.elapsed / self.period).floor();
        self.elapsed = self.elapsed.rem_euclid(self.period);
        if !self.elapsed.is_finite() {
            self.elapsed = 0.0;
        }
        // Saturating float-to-int cast
        fired as u32
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Seconds until the next fire
    pub fn remaining(&self) -> f32 {
        (self.period - self.elapsed).max(0.0)
    }
}

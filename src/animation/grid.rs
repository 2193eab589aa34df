// Infinite ground grid scrolling

use log::debug;

/// Accumulates the ground grid scroll while the car is assembled.
///
/// With a wrap period the returned offset loops in `[0, period)`, suitable
/// for a texture offset. Without one it is a monotonic shader time value.
/// Stopping freezes the value; it is never reset.
#[derive(Debug, Clone)]
pub struct GridScroller {
    rate: f32,
    wrap_period: Option<f32>,
    elapsed: f64,
    rolling: bool,
}

impl GridScroller {
    pub fn new(rate: f32, wrap_period: Option<f32>) -> Self {
        Self {
            rate,
            wrap_period: wrap_period.filter(|p| p.is_finite() && *p > 0.0),
            elapsed: 0.0,
            rolling: true,
        }
    }

    pub fn tick(&mut self, dt: f32, rolling_enabled: bool) -> f32 {
        if rolling_enabled != self.rolling {
            debug!(
                "Grid scroll {} at {:.3}",
                if rolling_enabled { "resumed" } else { "frozen" },
                self.elapsed
            );
            self.rolling = rolling_enabled;
        }

        if rolling_enabled && dt.is_finite() && dt > 0.0 {
            self.elapsed += f64::from(self.rate) * f64::from(dt);
        }

        self.offset()
    }

    pub fn offset(&self) -> f32 {
        match self.wrap_period {
            Some(period) => self.elapsed.rem_euclid(f64::from(period)) as f32,
            None => self.elapsed as f32,
        }
    }

    /// Total scroll accumulated so far, never wrapped
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }
}

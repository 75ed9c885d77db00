use serde::{Deserialize, Serialize};

/// Sample count and running mean for one named render segment.
///
/// The mean is updated incrementally, so memory stays constant no matter how
/// many samples are recorded and large magnitudes do not overflow a sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStat {
    pub count: u64,
    pub mean: f64,
}

impl RunningStat {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the mean.
    #[inline]
    pub fn record(&mut self, sample: f64) {
        self.mean += (sample - self.mean) / (self.count + 1) as f64;
        self.count += 1;
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

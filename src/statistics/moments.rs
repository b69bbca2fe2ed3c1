//! Running moments (mean, variance, third moment)
//!
//! Computes streaming statistics using Welford's numerically stable online
//! algorithm, extended to the third central moment so skewness comes out
//! of the same pass. Supports merging for distributed computation.

/// Running moments calculator using Welford's algorithm
///
/// Tracks count, mean and the second and third central moment sums in O(1)
/// memory.
///
/// # Example
///
/// ```
/// use reservoir_stats::statistics::RunningStats;
///
/// let stats: RunningStats = [40.0, 50.0, 60.0].into_iter().collect();
///
/// assert_eq!(stats.mean(), 50.0);
/// assert_eq!(stats.sample_stddev(), 10.0);
/// assert_eq!(stats.skewness(), Some(0.0));
/// ```
#[derive(Clone, Debug)]
pub struct RunningStats {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from mean
    m2: f64,
    /// Sum of cubed differences from mean
    m3: f64,
}

/// Variance below this is treated as a constant sequence
const ZERO_VARIANCE: f64 = 1e-19;

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
        }
    }

    /// Add a value
    ///
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        let n1 = self.count as f64;
        self.count += 1;
        let n = self.count as f64;

        // Welford / Terriberry update
        let delta = value - self.mean;
        let delta_n = delta / n;
        let term1 = delta * delta_n * n1;
        self.mean += delta_n;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Get the number of values
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Get the sample variance (Bessel's correction)
    ///
    /// Zero for fewer than two values.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Get the sample standard deviation
    pub fn sample_stddev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Adjusted Fisher–Pearson skewness
    ///
    /// `None` for fewer than three values, `0.0` for a constant sequence.
    pub fn skewness(&self) -> Option<f64> {
        if self.count < 3 {
            return None;
        }
        if self.sample_variance() < ZERO_VARIANCE {
            return Some(0.0);
        }
        let n = self.count as f64;
        Some(n * (n - 1.0).sqrt() * self.m3 / ((n - 2.0) * self.m2.powf(1.5)))
    }

    /// Merge with another accumulator
    ///
    /// Uses Chan et al.'s pairwise update for the second and third moments.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let na = self.count as f64;
        let nb = other.count as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;

        let mean = self.mean + delta * nb / n;
        let m2 = self.m2 + other.m2 + delta * delta * na * nb / n;
        let m3 = self.m3
            + other.m3
            + delta.powi(3) * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;

        self.count += other.count;
        self.mean = mean;
        self.m2 = m2;
        self.m3 = m3;
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for value in iter {
            stats.add(value);
        }
        stats
    }
}

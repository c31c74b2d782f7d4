//! Summary statistics of repeated counter readings.


/// Single pass accumulator of the first four moments.
///
/// Useful to summarize counter values over many iterations of a benchmark
/// without keeping every sample around.
///
/// Higher moments follow Terriberry's update:
/// <https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Higher-order_statistics>
///
/// # Examples
///
/// ```rust
/// use perf_counter_group::stats::OnlineStats;
///
/// let stats: OnlineStats = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
///
/// assert_eq!(stats.n(), 8);
/// assert!((stats.mean() - 5.0).abs() < 1e-12);
/// assert!((stats.std() - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OnlineStats {
    n: u64,
    m1: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl OnlineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sample, returns the number of samples so far.
    pub fn push(&mut self, x: f64) -> u64 {
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;

        let delta = x - self.m1;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.m1 += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;

        self.n
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    /// `NaN` if there is no sample.
    pub fn mean(&self) -> f64 {
        match self.n {
            0 => f64::NAN,
            _ => self.m1,
        }
    }

    /// Population standard deviation.
    pub fn std(&self) -> f64 {
        (self.m2 / self.n as f64).sqrt()
    }

    /// Coefficient of variation.
    pub fn cov(&self) -> f64 {
        self.std() / self.mean()
    }

    pub fn skewness(&self) -> f64 {
        (self.n as f64).sqrt() * self.m3 / self.m2.powf(1.5)
    }

    /// Excess kurtosis, 0 for a normal distribution.
    pub fn kurtosis(&self) -> f64 {
        (self.n as f64 * self.m4) / (self.m2 * self.m2) - 3.0
    }
}

impl Extend<f64> for OnlineStats {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for x in iter {
            self.push(x);
        }
    }
}

impl FromIterator<f64> for OnlineStats {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

/// Kahan-compensated running sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summator {
    sum: f64,
    compensation: f64,
}

impl Summator {
    /// Creates an empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the running total.
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Current compensated total.
    #[inline]
    pub fn get(&self) -> f64 {
        self.sum
    }
}

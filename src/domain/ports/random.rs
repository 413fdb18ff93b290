/// Source of uniform randoms in `[0, 1)`.
///
/// Every stochastic decision of the simulation goes through this port so that
/// runs are reproducible with a seeded or scripted source.
pub trait RandomSource: Send {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len - 1)
    }
}

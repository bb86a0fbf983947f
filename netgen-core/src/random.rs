//! Portable linear-congruential random stream.
//!
//! Every random decision the generator makes is drawn from a single
//! [`RandomStream`]. The recurrence is the Park–Miller "minimal standard"
//! generator `state = 16807 * state mod (2^31 - 1)`, evaluated with the
//! split-multiply technique so no intermediate product needs more than 31
//! bits of magnitude. Reproducing it exactly is what makes a seed name one
//! network forever.

const MULTIPLIER: i64 = 16_807;
const MODULUS: i64 = 2_147_483_647;

/// Deterministic source of uniformly distributed integers.
///
/// # Examples
/// ```
/// use netgen_core::RandomStream;
///
/// let mut left = RandomStream::new(123);
/// let mut right = RandomStream::new(123);
/// let a: Vec<i64> = (0..4).map(|_| left.next_in(1, 100)).collect();
/// let b: Vec<i64> = (0..4).map(|_| right.next_in(1, 100)).collect();
/// assert_eq!(a, b);
/// assert!(a.iter().all(|value| (1..=100).contains(value)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStream {
    state: i64,
}

impl RandomStream {
    /// Creates a stream positioned at `seed`.
    #[must_use]
    pub const fn new(seed: i64) -> Self {
        Self { state: seed }
    }

    /// Replaces the current state with `seed`.
    pub const fn reseed(&mut self, seed: i64) {
        self.state = seed;
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> i64 {
        self.state
    }

    /// Advances the stream and returns an integer uniformly drawn from
    /// `[low, high]`.
    ///
    /// The state always advances exactly once. When `high <= low` the draw is
    /// degenerate and `high` is returned as-is.
    ///
    /// # Examples
    /// ```
    /// use netgen_core::RandomStream;
    ///
    /// let mut stream = RandomStream::new(1);
    /// assert_eq!(stream.next_in(5, 5), 5);
    /// assert_eq!(stream.state(), 16_807);
    /// assert_eq!(stream.next_in(3, 0), 0);
    /// ```
    pub fn next_in(&mut self, low: i64, high: i64) -> i64 {
        self.advance();
        if high <= low {
            return high;
        }
        // The span of a full-width interval does not fit in an i64.
        let span = i128::from(high) - i128::from(low) + 1;
        let offset = i128::from(self.state) % span;
        i64::try_from(offset).map_or(high, |offset| low + offset)
    }

    fn advance(&mut self) {
        let mut hi = MULTIPLIER * (self.state >> 16);
        let mut lo = MULTIPLIER * (self.state & 0xffff);
        hi += lo >> 16;
        lo &= 0xffff;
        lo += hi >> 15;
        hi &= 0x7fff;
        lo -= MODULUS;
        self.state = (hi << 16) + lo;
        if self.state < 0 {
            self.state += MODULUS;
        }
    }
}

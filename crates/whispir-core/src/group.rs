//! The automorphism index group Z/(2N) and its required rotation elements.

use crate::constants::MAX_LOG_N;
use crate::error::{Result, SearchError};

/// `base^exponent mod modulus` by square-and-multiply.
///
/// `modulus` must be at most 2^32 so products of reduced residues fit in a
/// u64. `exponent == 0` yields 1 (0 when `modulus == 1`).
pub fn modpow(base: u64, mut exponent: u64, modulus: u64) -> u64 {
    debug_assert!(modulus > 0 && modulus <= 1 << 32);
    let mut result = 1 % modulus;
    let mut base = base % modulus;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        exponent >>= 1;
        base = base * base % modulus;
    }
    result
}

/// Index group of the ring with N = 2^log_n slots.
///
/// Holds the modulus M = 2N and the ordered required elements
/// `target[i] = 1 + N / 2^i mod M` for `i in 0..log_n`. Target `i` carries
/// weight `2^i` in the cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingGroup {
    log_n: u32,
    n: u64,
    modulus: u64,
    targets: Vec<u64>,
}

impl RingGroup {
    pub fn new(log_n: u32) -> Result<Self> {
        if log_n == 0 || log_n > MAX_LOG_N {
            return Err(SearchError::InvalidLogN(log_n));
        }
        let n = 1u64 << log_n;
        let modulus = 2 * n;
        let targets = (0..log_n).map(|i| (1 + (n >> i)) % modulus).collect();
        Ok(Self {
            log_n,
            n,
            modulus,
            targets,
        })
    }

    pub fn log_n(&self) -> u32 {
        self.log_n
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    /// Group modulus M = 2N.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn targets(&self) -> &[u64] {
        &self.targets
    }

    /// Index of the required element equal to `value`, if any.
    ///
    /// Targets are `1 + 2^j` for distinct `j`, so at most one matches.
    pub fn target_index(&self, value: u64) -> Option<usize> {
        self.targets.iter().position(|&t| t == value)
    }

    /// Cost weight of target `i`.
    pub fn weight(&self, i: usize) -> u64 {
        1 << i
    }

    pub fn mul(&self, a: u64, b: u64) -> u64 {
        a * b % self.modulus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modpow_small() {
        assert_eq!(modpow(3, 0, 8), 1);
        assert_eq!(modpow(3, 1, 8), 3);
        assert_eq!(modpow(3, 2, 8), 1);
        assert_eq!(modpow(5, 3, 16), 125 % 16);
        assert_eq!(modpow(7, 10, 1), 0);
    }

    #[test]
    fn test_modpow_reduces_base() {
        assert_eq!(modpow(11, 2, 8), modpow(3, 2, 8));
    }

    #[test]
    fn test_modpow_no_overflow_at_max_modulus() {
        let m = 1u64 << 31;
        let r = modpow(m - 1, 3, m);
        // (-1)^3 = -1
        assert_eq!(r, m - 1);
    }

    #[test]
    fn test_targets_for_n4() {
        let group = RingGroup::new(2).unwrap();
        assert_eq!(group.n(), 4);
        assert_eq!(group.modulus(), 8);
        assert_eq!(group.targets(), &[5, 3]);
    }

    #[test]
    fn test_targets_reference_size() {
        let group = RingGroup::new(12).unwrap();
        assert_eq!(group.modulus(), 8192);
        assert_eq!(group.targets().len(), 12);
        assert_eq!(group.targets()[0], 4097);
        assert_eq!(group.targets()[11], 3);
        assert!(group.targets().iter().all(|t| t % 2 == 1));
    }

    #[test]
    fn test_target_index() {
        let group = RingGroup::new(3).unwrap();
        // N = 8: targets 9, 5, 3
        assert_eq!(group.target_index(9), Some(0));
        assert_eq!(group.target_index(5), Some(1));
        assert_eq!(group.target_index(3), Some(2));
        assert_eq!(group.target_index(1), None);
        assert_eq!(group.target_index(7), None);
    }

    #[test]
    fn test_weights_are_powers_of_two() {
        let group = RingGroup::new(4).unwrap();
        let w: Vec<u64> = (0..4).map(|i| group.weight(i)).collect();
        assert_eq!(w, vec![1, 2, 4, 8]);
    }

    #[test]
    fn test_invalid_log_n() {
        assert!(matches!(RingGroup::new(0), Err(SearchError::InvalidLogN(0))));
        assert!(matches!(
            RingGroup::new(MAX_LOG_N + 1),
            Err(SearchError::InvalidLogN(_))
        ));
        assert!(RingGroup::new(MAX_LOG_N).is_ok());
    }
}

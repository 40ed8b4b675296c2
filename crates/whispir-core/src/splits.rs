//! Lazy enumeration of exponent splits at a fixed total depth.
//!
//! A split of depth `t` across `K` generators is `[e_0, .., e_{K-1}]` with
//! `sum(e) == t`. Splits come out in lexicographic order, so the first
//! split that realizes a target is also the smallest one.

/// Iterator over all `K`-part splits of `t`, lexicographically ascending.
///
/// For `K = 2` this is `(0, t), (1, t-1), .., (t, 0)`. For `K = 3` the first
/// exponent is the outermost loop: `(0, 0, t), (0, 1, t-1), .., (t, 0, 0)`.
#[derive(Clone, Debug)]
pub struct Splits<const K: usize> {
    next: Option<[u32; K]>,
}

impl<const K: usize> Splits<K> {
    pub fn new(t: u32) -> Self {
        assert!(K >= 2, "a split needs at least two generators");
        let mut first = [0; K];
        first[K - 1] = t;
        Self { next: Some(first) }
    }
}

impl<const K: usize> Iterator for Splits<K> {
    type Item = [u32; K];

    fn next(&mut self) -> Option<[u32; K]> {
        let current = self.next?;
        self.next = advance(current);
        Some(current)
    }
}

/// Lexicographic successor with the same sum, or `None` after `[t, 0, .., 0]`.
fn advance<const K: usize>(mut e: [u32; K]) -> Option<[u32; K]> {
    let last = K - 1;
    if e[last] > 0 {
        e[last - 1] += 1;
        e[last] -= 1;
        return Some(e);
    }
    // Last slot empty: bump the rightmost position that still has mass to
    // its right (excluding the last slot), then dump the rest into the last.
    let mut tail = 0;
    for j in (0..last - 1).rev() {
        tail += e[j + 1];
        if tail > 0 {
            e[j] += 1;
            e[j + 1..last].fill(0);
            e[last] = tail - 1;
            return Some(e);
        }
    }
    None
}

/// Number of `K`-part splits of `t`: C(t + K - 1, K - 1).
pub fn split_count(k: usize, t: u32) -> u64 {
    let n = t as u64 + k as u64 - 1;
    let r = k as u64 - 1;
    (0..r).fold(1u64, |acc, i| acc * (n - i) / (i + 1))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn triples_sum_to_depth_and_ascend(t in 0u32..40) {
            let splits: Vec<[u32; 3]> = Splits::<3>::new(t).collect();
            prop_assert_eq!(splits.len() as u64, split_count(3, t));
            for s in &splits {
                prop_assert_eq!(s.iter().sum::<u32>(), t);
            }
            for w in splits.windows(2) {
                prop_assert!(w[0] < w[1]);
            }
        }

        #[test]
        fn pairs_match_nested_loop(t in 0u32..200) {
            let expected: Vec<[u32; 2]> = (0..=t).map(|k| [k, t - k]).collect();
            let got: Vec<[u32; 2]> = Splits::<2>::new(t).collect();
            prop_assert_eq!(got, expected);
        }
    }
}

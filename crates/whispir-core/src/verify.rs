//! Independent check of discovery depths by direct exponentiation.

use crate::group::{RingGroup, modpow};
use crate::splits::Splits;

/// Smallest depth `t < limit` at which `prod g_j^{e_j} == target[index]`
/// for some split `e` of `t`, together with the first such split.
///
/// Recomputes every power with [`modpow`] instead of reusing running
/// products, so it shares no arithmetic with the evaluator.
pub fn earliest_split<const K: usize>(
    group: &RingGroup,
    generators: &[u64; K],
    index: usize,
    limit: u32,
) -> Option<(u32, [u32; K])> {
    let modulus = group.modulus();
    let target = *group.targets().get(index)?;
    (0..limit).find_map(|t| {
        Splits::<K>::new(t)
            .find(|split| {
                let value = generators
                    .iter()
                    .zip(split)
                    .fold(1 % modulus, |acc, (&g, &e)| {
                        acc * modpow(g, u64::from(e), modulus) % modulus
                    });
                value == target
            })
            .map(|split| (t, split))
    })
}

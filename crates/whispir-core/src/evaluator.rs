//! Cost of one candidate generator set, with ceiling-based early abort.

use crate::discovery::DiscoveryTimes;
use crate::group::RingGroup;
use crate::splits::Splits;

/// Result of evaluating one candidate set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Every required element was reached and the total beats the ceiling.
    Feasible { cost: u64, times: Vec<u32> },
    /// The running bound after depth `at` reached the ceiling.
    Pruned { at: u32, bound: u64 },
    /// Depth ran up to the group order without reaching every element.
    Exhausted,
}

impl Evaluation {
    pub fn cost(&self) -> Option<u64> {
        match self {
            Evaluation::Feasible { cost, .. } => Some(*cost),
            _ => None,
        }
    }
}

/// Successive powers `g^0, g^1, ..` mod M, grown one depth at a time.
struct PowerTable {
    generator: u64,
    powers: Vec<u64>,
}

impl PowerTable {
    fn new(generator: u64, capacity: usize) -> Self {
        let mut powers = Vec::with_capacity(capacity);
        powers.push(1);
        Self { generator, powers }
    }

    fn extend_to(&mut self, depth: u32, group: &RingGroup) {
        while self.powers.len() <= depth as usize {
            let last = self.powers[self.powers.len() - 1];
            self.powers.push(group.mul(last, self.generator));
        }
    }
}

pub struct CostEvaluator<'a> {
    group: &'a RingGroup,
}

impl<'a> CostEvaluator<'a> {
    pub fn new(group: &'a RingGroup) -> Self {
        Self { group }
    }

    pub fn group(&self) -> &RingGroup {
        self.group
    }

    /// Evaluate `generators` against `ceiling` (the best cost seen so far).
    ///
    /// Depth `t` runs from 0 upward. Every split of `t` is tried in
    /// lexicographic order and each product is matched against the targets
    /// not yet found. After a full depth layer the running bound is
    /// compared to `ceiling`: `bound >= ceiling` prunes. A feasible result
    /// therefore always has `cost < ceiling`. Pass `u64::MAX` to evaluate
    /// without pruning.
    pub fn evaluate<const K: usize>(&self, generators: &[u64; K], ceiling: u64) -> Evaluation {
        let group = self.group;
        let modulus = group.modulus();
        let mut times = DiscoveryTimes::new(group.targets().len());
        let mut tables: Vec<PowerTable> = generators
            .iter()
            .map(|&g| PowerTable::new(g % modulus, 64))
            .collect();

        let depth_limit = u32::try_from(modulus).unwrap_or(u32::MAX);
        for t in 0..depth_limit {
            for table in &mut tables {
                table.extend_to(t, group);
            }

            for split in Splits::<K>::new(t) {
                let value = split
                    .iter()
                    .zip(&tables)
                    .fold(1, |acc, (&e, table)| group.mul(acc, table.powers[e as usize]));
                if let Some(i) = group.target_index(value)
                    && times.record(i, t)
                    && times.is_complete()
                {
                    break;
                }
            }

            let bound = times.running_cost(t);
            if bound >= ceiling {
                return Evaluation::Pruned { at: t, bound };
            }
            if let Some(times) = times.to_vec() {
                return Evaluation::Feasible { cost: bound, times };
            }
        }
        Evaluation::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(log_n: u32) -> RingGroup {
        RingGroup::new(log_n).unwrap()
    }

    #[test]
    fn test_pair_reaching_both_targets_at_depth_one() {
        // N = 4: targets [5, 3]
        let g = group(2);
        let eval = CostEvaluator::new(&g).evaluate(&[3, 5], u64::MAX);
        assert_eq!(
            eval,
            Evaluation::Feasible {
                cost: 3,
                times: vec![1, 1]
            }
        );
    }

    #[test]
    fn test_pair_needs_depth_two() {
        // 3 reaches target 3 at t=1; 7^1 * 3^1 = 21 = 5 mod 8 at t=2
        let g = group(2);
        let eval = CostEvaluator::new(&g).evaluate(&[3, 7], u64::MAX);
        assert_eq!(
            eval,
            Evaluation::Feasible {
                cost: 2 + 2,
                times: vec![2, 1]
            }
        );
    }

    #[test]
    fn test_ceiling_equal_to_cost_prunes() {
        let g = group(2);
        let eval = CostEvaluator::new(&g).evaluate(&[3, 5], 3);
        assert_eq!(eval, Evaluation::Pruned { at: 1, bound: 3 });
    }

    #[test]
    fn test_ceiling_prunes_before_completion() {
        let g = group(2);
        // After t=1 only target 3 is found: bound = 1*1 + 2*1 = 3
        let eval = CostEvaluator::new(&g).evaluate(&[3, 7], 3);
        assert_eq!(eval, Evaluation::Pruned { at: 1, bound: 3 });
    }

    #[test]
    fn test_zero_ceiling_prunes_at_depth_zero() {
        let g = group(3);
        let eval = CostEvaluator::new(&g).evaluate(&[3, 5], 0);
        assert_eq!(eval, Evaluation::Pruned { at: 0, bound: 0 });
    }

    #[test]
    fn test_subgroup_without_targets_is_exhausted() {
        // N = 8, M = 16: 7 and 15 generate {1, 7, 9, 15}; 5 and 3 unreachable
        let g = group(3);
        let eval = CostEvaluator::new(&g).evaluate(&[7, 15], u64::MAX);
        assert_eq!(eval, Evaluation::Exhausted);
    }

    #[test]
    fn test_triple_matches_pair_when_first_unused() {
        let g = group(3);
        let ev = CostEvaluator::new(&g);
        let pair = ev.evaluate(&[3, 5], u64::MAX).cost().unwrap();
        let triple = ev.evaluate(&[3, 3, 5], u64::MAX).cost().unwrap();
        assert!(triple <= pair);
    }

    #[test]
    fn test_generator_above_modulus_is_reduced() {
        let g = group(2);
        let ev = CostEvaluator::new(&g);
        assert_eq!(ev.evaluate(&[11, 13], u64::MAX), ev.evaluate(&[3, 5], u64::MAX));
    }
}

/// Earliest depth at which each required element was reached, for one
/// candidate generator set. Each slot is written at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryTimes {
    times: Vec<Option<u32>>,
    found: usize,
}

impl DiscoveryTimes {
    pub fn new(len: usize) -> Self {
        Self {
            times: vec![None; len],
            found: 0,
        }
    }

    /// Record target `i` as reached at depth `t`. Returns `false` (and
    /// leaves the slot alone) if `i` was already found.
    pub fn record(&mut self, i: usize, t: u32) -> bool {
        match self.times[i] {
            Some(_) => false,
            None => {
                self.times[i] = Some(t);
                self.found += 1;
                true
            }
        }
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        self.times[i]
    }

    pub fn is_complete(&self) -> bool {
        self.found == self.times.len()
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Lower bound on the final cost after finishing depth `t`.
    ///
    /// Unfound targets can only appear at depth `> t`, so charging them `t`
    /// never overestimates. Non-decreasing in `t`.
    pub fn running_cost(&self, t: u32) -> u64 {
        self.times
            .iter()
            .enumerate()
            .map(|(i, time)| (1u64 << i) * u64::from(time.unwrap_or(t)))
            .sum()
    }

    /// Weighted cost `sum 2^i * t_i`, once every target is found.
    pub fn final_cost(&self) -> Option<u64> {
        if !self.is_complete() {
            return None;
        }
        Some(self.running_cost(0))
    }

    /// Discovery depths in target order, once complete.
    pub fn to_vec(&self) -> Option<Vec<u32>> {
        self.times.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_write_once() {
        let mut d = DiscoveryTimes::new(3);
        assert!(d.record(1, 4));
        assert!(!d.record(1, 2));
        assert_eq!(d.get(1), Some(4));
        assert_eq!(d.found(), 1);
    }

    #[test]
    fn test_running_cost_charges_depth_for_unfound() {
        let mut d = DiscoveryTimes::new(3);
        // weights 1, 2, 4
        assert_eq!(d.running_cost(5), 5 + 10 + 20);
        d.record(2, 1);
        assert_eq!(d.running_cost(5), 5 + 10 + 4);
    }

    #[test]
    fn test_final_cost_requires_completion() {
        let mut d = DiscoveryTimes::new(2);
        d.record(0, 3);
        assert_eq!(d.final_cost(), None);
        assert_eq!(d.to_vec(), None);
        d.record(1, 2);
        assert!(d.is_complete());
        assert_eq!(d.final_cost(), Some(3 + 4));
        assert_eq!(d.to_vec(), Some(vec![3, 2]));
    }

    #[test]
    fn test_running_cost_monotone_as_depth_grows() {
        let mut d = DiscoveryTimes::new(4);
        let mut prev = 0;
        for t in 0..10 {
            if t == 3 {
                d.record(0, 3);
            }
            if t == 7 {
                d.record(3, 7);
            }
            let cost = d.running_cost(t);
            assert!(cost >= prev, "cost dropped at t={t}: {cost} < {prev}");
            prev = cost;
        }
    }
}

//! Exhaustive search over generator pairs and triples.
//!
//! Outer generators are walked sequentially. For each outer prefix the
//! innermost generator `h` is evaluated in parallel on a rayon pool, all
//! workers pruning against the same [`SharedBest`] ceiling. The search is
//! not interruptible and keeps no state across runs.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::best::{Best, SharedBest};
use crate::constants::{
    DEFAULT_LOG_N, FIRST_GENERATOR, PAIR_PROGRESS_INTERVAL, TRIPLE_PROGRESS_INTERVAL,
};
use crate::error::Result;
use crate::evaluator::{CostEvaluator, Evaluation};
use crate::group::RingGroup;

/// Search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// log2 of the ring size N.
    pub log_n: u32,
    /// Worker threads. `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            log_n: DEFAULT_LOG_N,
            threads: None,
        }
    }
}

impl SearchConfig {
    pub fn with_log_n(log_n: u32) -> Self {
        Self {
            log_n,
            ..Self::default()
        }
    }
}

/// Hooks for reporting search progress. Called from worker threads.
pub trait SearchObserver: Sync {
    /// An outer generator value hit a progress marker.
    fn progress(&self, _outer: u64) {}

    /// A new strictly-better candidate was installed. Calls are serialized
    /// and arrive with strictly decreasing scores.
    fn improved(&self, _score: u64, _generators: &[u64]) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Per-run candidate counters.
#[derive(Debug, Default)]
pub struct SearchStats {
    evaluated: AtomicU64,
    feasible: AtomicU64,
    pruned: AtomicU64,
    exhausted: AtomicU64,
    improvements: AtomicU64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub evaluated: u64,
    pub feasible: u64,
    pub pruned: u64,
    pub exhausted: u64,
    pub improvements: u64,
}

impl SearchStats {
    fn count(&self, evaluation: &Evaluation) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        let counter = match evaluation {
            Evaluation::Feasible { .. } => &self.feasible,
            Evaluation::Pruned { .. } => &self.pruned,
            Evaluation::Exhausted => &self.exhausted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            evaluated: self.evaluated.load(Ordering::Relaxed),
            feasible: self.feasible.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            improvements: self.improvements.load(Ordering::Relaxed),
        }
    }
}

/// What a finished search reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<const K: usize> {
    pub best: Option<Best<K>>,
    pub stats: StatsSnapshot,
}

/// Outer generators `g` of the pair search: odd, from 3 up to `modulus`.
pub fn pair_rows(modulus: u64) -> impl Iterator<Item = u64> {
    (FIRST_GENERATOR..modulus).step_by(2)
}

/// Outer prefixes `(f, g)` of the triple search.
///
/// `g` starts at `f` itself, so repeated-generator prefixes `(f, f)` are
/// part of the space, while `h` is always strictly greater than `g`.
pub fn triple_rows(modulus: u64) -> impl Iterator<Item = (u64, u64)> {
    (FIRST_GENERATOR..modulus)
        .step_by(2)
        .flat_map(move |f| (f..modulus).step_by(2).map(move |g| (f, g)))
}

/// Innermost generators after `last`: odd `h` with `last < h < modulus`.
pub fn inner_values(last: u64, modulus: u64) -> impl Iterator<Item = u64> {
    (last + 2..modulus).step_by(2)
}

/// Every pair candidate in driver order.
pub fn pair_candidates(modulus: u64) -> impl Iterator<Item = [u64; 2]> {
    pair_rows(modulus).flat_map(move |g| inner_values(g, modulus).map(move |h| [g, h]))
}

/// Every triple candidate in driver order.
pub fn triple_candidates(modulus: u64) -> impl Iterator<Item = [u64; 3]> {
    triple_rows(modulus)
        .flat_map(move |(f, g)| inner_values(g, modulus).map(move |h| [f, g, h]))
}

/// Two-generator search over all odd `3 <= g < h < 2N`.
pub fn search_pairs<O: SearchObserver>(
    config: &SearchConfig,
    observer: &O,
) -> Result<SearchOutcome<2>> {
    let group = RingGroup::new(config.log_n)?;
    let modulus = group.modulus();
    tracing::info!(log_n = config.log_n, modulus, "starting pair search");

    let search = Search::new(&group, observer);
    in_pool(config, || {
        for g in pair_rows(modulus) {
            if g % PAIR_PROGRESS_INTERVAL == 1 {
                observer.progress(g);
            }
            search.row(g, |h| [g, h]);
            tracing::debug!(g, ceiling = search.best.ceiling(), "pair row done");
        }
    })?;
    Ok(search.finish())
}

/// Three-generator search over odd `3 <= f <= g < h < 2N`.
pub fn search_triples<O: SearchObserver>(
    config: &SearchConfig,
    observer: &O,
) -> Result<SearchOutcome<3>> {
    let group = RingGroup::new(config.log_n)?;
    let modulus = group.modulus();
    tracing::info!(log_n = config.log_n, modulus, "starting triple search");

    let search = Search::new(&group, observer);
    in_pool(config, || {
        let mut last_f = 0;
        for (f, g) in triple_rows(modulus) {
            if f != last_f {
                if f % TRIPLE_PROGRESS_INTERVAL == 1 {
                    observer.progress(f);
                }
                last_f = f;
            }
            search.row(g, |h| [f, g, h]);
            tracing::debug!(f, g, ceiling = search.best.ceiling(), "triple row done");
        }
    })?;
    Ok(search.finish())
}

/// Run `work` on a dedicated pool when a thread count is configured.
fn in_pool<T: Send>(config: &SearchConfig, work: impl FnOnce() -> T + Send) -> Result<T> {
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            Ok(pool.install(work))
        }
        None => Ok(work()),
    }
}

struct Search<'a, const K: usize, O> {
    evaluator: CostEvaluator<'a>,
    best: SharedBest<K>,
    stats: SearchStats,
    observer: &'a O,
}

impl<'a, const K: usize, O: SearchObserver> Search<'a, K, O> {
    fn new(group: &'a RingGroup, observer: &'a O) -> Self {
        Self {
            evaluator: CostEvaluator::new(group),
            best: SharedBest::new(),
            stats: SearchStats::default(),
            observer,
        }
    }

    /// Evaluate every innermost `h > last` in parallel.
    fn row(&self, last: u64, candidate: impl Fn(u64) -> [u64; K] + Sync) {
        let modulus = self.evaluator.group().modulus();
        let first = last + 2;
        if first >= modulus {
            return;
        }
        let count = (modulus - first).div_ceil(2);
        (0..count).into_par_iter().for_each(|j| {
            self.evaluate(candidate(first + 2 * j));
        });
    }

    fn evaluate(&self, generators: [u64; K]) {
        let evaluation = self.evaluator.evaluate(&generators, self.best.ceiling());
        self.stats.count(&evaluation);
        let Evaluation::Feasible { cost, times } = evaluation else {
            return;
        };
        let installed = self.best.offer_with(
            Best {
                score: cost,
                generators,
                times,
            },
            |best| {
                tracing::info!(score = best.score, generators = ?best.generators, "new best");
                self.observer.improved(best.score, &best.generators);
            },
        );
        if installed {
            self.stats.improvements.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn finish(self) -> SearchOutcome<K> {
        let stats = self.stats.snapshot();
        tracing::info!(
            evaluated = stats.evaluated,
            feasible = stats.feasible,
            pruned = stats.pruned,
            exhausted = stats.exhausted,
            "search finished"
        );
        SearchOutcome {
            best: self.best.into_inner(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        progress: Mutex<Vec<u64>>,
        improved: Mutex<Vec<(u64, Vec<u64>)>>,
    }

    impl SearchObserver for Recorder {
        fn progress(&self, outer: u64) {
            self.progress.lock().unwrap().push(outer);
        }

        fn improved(&self, score: u64, generators: &[u64]) {
            self.improved.lock().unwrap().push((score, generators.to_vec()));
        }
    }

    fn single_thread(log_n: u32) -> SearchConfig {
        SearchConfig {
            log_n,
            threads: Some(1),
        }
    }

    #[test]
    fn test_pair_rows_are_odd_from_three() {
        assert_eq!(pair_rows(8).collect::<Vec<_>>(), vec![3, 5, 7]);
    }

    #[test]
    fn test_pair_candidates_strictly_increasing() {
        assert_eq!(
            pair_candidates(8).collect::<Vec<_>>(),
            vec![[3, 5], [3, 7], [5, 7]]
        );
    }

    #[test]
    fn test_triple_rows_include_repeated_prefix() {
        let rows: Vec<_> = triple_rows(8).collect();
        assert_eq!(
            rows,
            vec![(3, 3), (3, 5), (3, 7), (5, 5), (5, 7), (7, 7)]
        );
    }

    #[test]
    fn test_triple_candidates_allow_f_equal_g_but_not_g_equal_h() {
        let all: Vec<_> = triple_candidates(8).collect();
        assert_eq!(all, vec![[3, 3, 5], [3, 3, 7], [3, 5, 7], [5, 5, 7]]);
        assert!(all.iter().any(|[f, g, _]| f == g));
        assert!(all.iter().all(|[_, g, h]| g < h));
    }

    #[test]
    fn test_pair_search_n4_golden() {
        let recorder = Recorder::default();
        let outcome = search_pairs(&single_thread(2), &recorder).unwrap();
        let best = outcome.best.unwrap();
        assert_eq!(best.score, 3);
        assert_eq!(best.generators, [3, 5]);
        assert_eq!(best.times, vec![1, 1]);
        assert_eq!(outcome.stats.evaluated, 3);
        assert_eq!(outcome.stats.feasible, 1);
        assert_eq!(outcome.stats.pruned, 2);
        assert_eq!(*recorder.improved.lock().unwrap(), vec![(3, vec![3, 5])]);
    }

    #[test]
    fn test_triple_search_n4_golden() {
        let outcome = search_triples(&single_thread(2), &NoopObserver).unwrap();
        let best = outcome.best.unwrap();
        assert_eq!(best.score, 3);
        assert_eq!(best.generators, [3, 3, 5]);
        assert_eq!(outcome.stats.evaluated, 4);
    }

    #[test]
    fn test_progress_markers() {
        // M = 1024: g = 1001 is the only odd g with g % 1000 == 1
        let recorder = Recorder::default();
        search_pairs(&single_thread(9), &recorder).unwrap();
        assert_eq!(*recorder.progress.lock().unwrap(), vec![1001]);
    }

    #[test]
    fn test_improvements_strictly_decrease() {
        let recorder = Recorder::default();
        let outcome = search_pairs(&SearchConfig::with_log_n(5), &recorder).unwrap();
        let improved = recorder.improved.lock().unwrap();
        assert!(!improved.is_empty());
        for w in improved.windows(2) {
            assert!(w[1].0 < w[0].0);
        }
        assert_eq!(improved.last().unwrap().0, outcome.best.unwrap().score);
        assert_eq!(improved.len() as u64, outcome.stats.improvements);
    }

    #[test]
    fn test_log_n_one_has_no_candidates() {
        let outcome = search_pairs(&single_thread(1), &NoopObserver).unwrap();
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.stats.evaluated, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(search_pairs(&SearchConfig::with_log_n(0), &NoopObserver).is_err());
        let zero_threads = SearchConfig {
            log_n: 2,
            threads: Some(0),
        };
        // rayon treats 0 as "pick automatically"
        assert!(search_pairs(&zero_threads, &NoopObserver).is_ok());
    }
}

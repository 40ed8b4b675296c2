//! Human-readable stdout lines for search progress and results.

use whispir_core::{Best, RingGroup, SearchObserver, StatsSnapshot, earliest_split};

/// Generator names in print order for a set of `k` generators.
fn labels(k: usize) -> &'static [&'static str] {
    match k {
        2 => &["g", "h"],
        _ => &["f", "g", "h"],
    }
}

/// `Best score: 3 Best g: 3 Best h: 5`
pub fn best_line(score: u64, generators: &[u64]) -> String {
    let mut line = format!("Best score: {score}");
    for (label, g) in labels(generators.len()).iter().zip(generators) {
        line.push_str(&format!(" Best {label}: {g}"));
    }
    line
}

/// One line per required rotation showing the first split that reaches it.
pub fn witness_lines<const K: usize>(group: &RingGroup, best: &Best<K>) -> Vec<String> {
    let names = labels(K);
    best.times
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let target = group.targets()[i];
            let product = match earliest_split(group, &best.generators, i, t + 1) {
                Some((_, split)) => names
                    .iter()
                    .zip(&split)
                    .map(|(name, e)| format!("{name}^{e}"))
                    .collect::<Vec<_>>()
                    .join(" * "),
                None => "unverified".to_string(),
            };
            format!(
                "  1 + N/2^{i} = {target} (weight {}): t={t} via {product}",
                group.weight(i)
            )
        })
        .collect()
}

pub fn stats_line(stats: &StatsSnapshot) -> String {
    format!(
        "candidates: evaluated={}, feasible={}, pruned={}, exhausted={}, improvements={}",
        stats.evaluated, stats.feasible, stats.pruned, stats.exhausted, stats.improvements
    )
}

/// Prints outer-loop markers and every improvement to stdout.
pub struct StdoutObserver {
    outer_label: &'static str,
}

impl StdoutObserver {
    pub fn pairs() -> Self {
        Self { outer_label: "g" }
    }

    pub fn triples() -> Self {
        Self { outer_label: "f" }
    }
}

impl SearchObserver for StdoutObserver {
    fn progress(&self, outer: u64) {
        println!("{}: {outer}", self.outer_label);
    }

    fn improved(&self, score: u64, generators: &[u64]) {
        println!("{}", best_line(score, generators));
    }
}

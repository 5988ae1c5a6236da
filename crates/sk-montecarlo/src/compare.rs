//! Picking a winner among configuration results.

/// A linear combination of per-result metrics.
///
/// ```rust,ignore
/// let score = WeightedScore::new()
///     .term(0.7, |r: &FleetSummary| r.throughput_kg_per_year / 1e6)
///     .term(0.3, |r: &FleetSummary| 1.0 / (r.cost_per_kg / 1e3));
/// let best = optimal_index(&results, |r| score.score(r));
/// ```
pub struct WeightedScore<'a, T> {
    terms: Vec<(f64, Box<dyn Fn(&T) -> f64 + 'a>)>,
}

impl<T> Default for WeightedScore<'_, T> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<'a, T> WeightedScore<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, weight: f64, metric: impl Fn(&T) -> f64 + 'a) -> Self {
        self.terms.push((weight, Box::new(metric)));
        self
    }

    pub fn score(&self, item: &T) -> f64 {
        self.terms.iter().map(|(w, metric)| w * metric(item)).sum()
    }
}

/// Index of the highest-scoring item.  Ties keep the earliest; `NaN` scores
/// never win.  `None` only for an empty slice; if no score beats `-∞` the
/// first item is returned.
pub fn optimal_index<T>(items: &[T], score: impl Fn(&T) -> f64) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, item) in items.iter().enumerate() {
        let s = score(item);
        if s > best {
            best = s;
            best_idx = i;
        }
    }
    Some(best_idx)
}

/// Index of the item with the largest `key` (earliest on ties).
pub fn best_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    extreme_by(items, key, |candidate, current| candidate > current)
}

/// Index of the item with the smallest `key` (earliest on ties).
pub fn worst_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<usize> {
    extreme_by(items, key, |candidate, current| candidate < current)
}

fn extreme_by<T>(
    items:   &[T],
    key:     impl Fn(&T) -> f64,
    replace: impl Fn(f64, f64) -> bool,
) -> Option<usize> {
    let first = items.first()?;
    let mut idx = 0;
    let mut current = key(first);
    for (i, item) in items.iter().enumerate().skip(1) {
        let k = key(item);
        if replace(k, current) {
            idx = i;
            current = k;
        }
    }
    Some(idx)
}

/// Snapshot passed to progress callbacks.
///
/// `current_iteration` is 1-based: it names the iteration about to run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressInfo {
    pub current_iteration: usize,
    pub total_iterations:  usize,
    pub percent_complete:  f64,
}

impl ProgressInfo {
    /// Report made *before* 0-based iteration `i` runs.
    pub fn before(i: usize, total: usize) -> Self {
        Self {
            current_iteration: i + 1,
            total_iterations:  total,
            percent_complete:  percent(i, total),
        }
    }

    /// Report made after the loop, with `completed` iterations done.
    pub fn finished(completed: usize, total: usize) -> Self {
        let percent_complete = if completed >= total { 100.0 } else { percent(completed, total) };
        Self { current_iteration: completed, total_iterations: total, percent_complete }
    }
}

/// Progress of a nested (outer × inner) run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchedProgressInfo {
    pub progress:    ProgressInfo,
    pub outer_index: usize,
    pub inner_index: usize,
    pub outer_total: usize,
    pub inner_total: usize,
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 { 100.0 } else { done as f64 / total as f64 * 100.0 }
}

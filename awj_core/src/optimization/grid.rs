//! Exhaustive search over the cartesian product of two sampled ranges.
//!
//! Cells are numbered row-major with the first axis outermost, so cell
//! `i * ys.len() + j` is `(xs[i], ys[j])`. A candidate only replaces the
//! current best when strictly better; equal values keep the lower index.

use crate::errors::CalcResult;

/// `n` evenly spaced samples from `start` to `end`, both included.
///
/// The last sample is exactly `end`. `n == 1` gives `[start]`, `n == 0` an
/// empty grid.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut samples: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
            samples[n - 1] = end;
            samples
        }
    }
}

/// Best cell found by a grid search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<T> {
    /// Row-major cell index
    pub index: usize,
    /// First-axis value
    pub x: f64,
    /// Second-axis value
    pub y: f64,
    /// Evaluated value
    pub value: T,
}

/// Keep `a` unless `b` is strictly better; ties go to the lower index.
#[cfg_attr(not(feature = "parallel"), allow(dead_code))]
fn pick<T, B>(a: Candidate<T>, b: Candidate<T>, better: &B) -> Candidate<T>
where
    B: Fn(&T, &T) -> bool,
{
    if better(&b.value, &a.value) {
        b
    } else if better(&a.value, &b.value) || a.index <= b.index {
        a
    } else {
        b
    }
}

/// Evaluate every cell in order and keep the best.
///
/// `evaluate` returns `Ok(None)` to reject a cell; `better(a, b)` is true when
/// `a` is strictly better than `b`. Returns `Ok(None)` if every cell was
/// rejected or the grid is empty.
pub fn search_sequential<T, F, B>(xs: &[f64], ys: &[f64], evaluate: F, better: B) -> CalcResult<Option<Candidate<T>>>
where
    F: Fn(f64, f64) -> CalcResult<Option<T>>,
    B: Fn(&T, &T) -> bool,
{
    let mut best: Option<Candidate<T>> = None;
    for (i, &x) in xs.iter().enumerate() {
        for (j, &y) in ys.iter().enumerate() {
            let Some(value) = evaluate(x, y)? else {
                continue;
            };
            let candidate = Candidate {
                index: i * ys.len() + j,
                x,
                y,
                value,
            };
            best = match best {
                Some(current) if !better(&candidate.value, &current.value) => Some(current),
                _ => Some(candidate),
            };
        }
    }
    Ok(best)
}

/// Same result as [`search_sequential`], with cells spread over the rayon pool.
#[cfg(feature = "parallel")]
pub fn search_parallel<T, F, B>(xs: &[f64], ys: &[f64], evaluate: F, better: B) -> CalcResult<Option<Candidate<T>>>
where
    T: Send,
    F: Fn(f64, f64) -> CalcResult<Option<T>> + Sync,
    B: Fn(&T, &T) -> bool + Sync,
{
    use rayon::prelude::*;

    let columns = ys.len();
    (0..xs.len() * columns)
        .into_par_iter()
        .filter_map(|index| {
            let (x, y) = (xs[index / columns], ys[index % columns]);
            evaluate(x, y)
                .map(|value| value.map(|value| Candidate { index, x, y, value }))
                .transpose()
        })
        .try_reduce_with(|a, b| Ok(pick(a, b, &better)))
        .transpose()
}

/// Grid search, parallel when the `parallel` feature is enabled.
pub fn search<T, F, B>(xs: &[f64], ys: &[f64], evaluate: F, better: B) -> CalcResult<Option<Candidate<T>>>
where
    T: Send,
    F: Fn(f64, f64) -> CalcResult<Option<T>> + Sync,
    B: Fn(&T, &T) -> bool + Sync,
{
    #[cfg(feature = "parallel")]
    {
        search_parallel(xs, ys, evaluate, better)
    }
    #[cfg(not(feature = "parallel"))]
    {
        search_sequential(xs, ys, evaluate, better)
    }
}

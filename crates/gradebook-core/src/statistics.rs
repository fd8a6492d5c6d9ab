//! Averages, extremes, and the stable maximum used by the reports.

use crate::model::Student;

/// Which end of the average distribution to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extreme {
    Highest,
    Lowest,
}

/// Every student's mean mark, in store order. Students without courses are skipped.
pub fn student_averages<'a>(
    students: impl IntoIterator<Item = &'a Student>,
) -> Vec<(&'a Student, f64)> {
    students
        .into_iter()
        .filter_map(|s| s.average().map(|avg| (s, avg)))
        .collect()
}

/// The extreme average and every student sitting exactly on it.
///
/// Ties are all returned, in store order. `None` when there are no averages.
pub fn extreme_averages<'a>(
    averages: &[(&'a Student, f64)],
    extreme: Extreme,
) -> Option<(f64, Vec<(&'a Student, f64)>)> {
    let pick = match extreme {
        Extreme::Highest => f64::max,
        Extreme::Lowest => f64::min,
    };
    let target = averages.iter().map(|(_, avg)| *avg).reduce(pick)?;

    #[allow(clippy::float_cmp)]
    let tied = averages
        .iter()
        .filter(|(_, avg)| *avg == target)
        .copied()
        .collect();

    Some((target, tied))
}

/// Maximum by key where the first of several equal maxima wins.
///
/// `Iterator::max_by_key` returns the last one, which is not what the
/// top-mark report wants.
pub fn stable_max_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Option<T>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut best: Option<(K, T)> = None;
    for item in items {
        let k = key(&item);
        let better = match &best {
            Some((best_key, _)) => k > *best_key,
            None => true,
        };
        if better {
            best = Some((k, item));
        }
    }
    best.map(|(_, item)| item)
}

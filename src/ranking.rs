//! Performance-to-ranking conversion.
//!
//! Each instance (row) of a performance table is ranked independently:
//! rank 1 is the best algorithm. Ties are resolved by a [`RankMethod`].
//!
//! Direction:
//! - ascending (lower is better): the smallest value gets rank 1
//! - descending (higher is better): the largest value gets rank 1
//!
//! Descending ranks are computed by ranking the negated values, so `min`
//! still hands the lowest rank to every member of a tie.

use std::cmp::Ordering;

use crate::config::RankMethod;
use crate::scenario::Scenario;
use crate::table::Table;

/// Ordering in which performance values are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn for_maximize(maximize: bool) -> Self {
        if maximize {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// Convert the scenario's performance table into a ranking table.
///
/// `NoRanking` returns the performance values as measured. Values are
/// never negated; the `maximize` flag only selects the direction.
pub fn performances_to_rankings(scenario: &Scenario, method: RankMethod) -> Table {
    rank_table(
        &scenario.performance_table,
        method,
        Direction::for_maximize(scenario.maximize),
    )
}

/// Rank every row of `table`.
pub fn rank_table(table: &Table, method: RankMethod, direction: Direction) -> Table {
    if method == RankMethod::NoRanking {
        return table.clone();
    }
    table.map_rows(|row| rank_row(row, method, direction))
}

/// Rank one row. Missing cells stay missing and are left out of the
/// ranking of the others.
pub fn rank_row(row: &[Option<f64>], method: RankMethod, direction: Direction) -> Vec<Option<f64>> {
    let present: Vec<(usize, f64)> = row
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|x| !x.is_nan()).map(|x| (i, x)))
        .map(|(i, x)| match direction {
            Direction::Ascending => (i, x),
            Direction::Descending => (i, -x),
        })
        .collect();

    let values: Vec<f64> = present.iter().map(|&(_, x)| x).collect();
    let ranks = rankdata(&values, method);

    let mut out = vec![None; row.len()];
    for (&(i, _), rank) in present.iter().zip(ranks) {
        out[i] = Some(rank);
    }
    out
}

/// Rank `values` ascending with the given tie policy.
///
/// `NoRanking` returns the values unchanged.
pub fn rankdata(values: &[f64], method: RankMethod) -> Vec<f64> {
    if method == RankMethod::NoRanking {
        return values.to_vec();
    }

    // Stable sort keeps original position order inside ties (ordinal).
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut dense = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        dense += 1.0;

        // Positions start..end occupy ranks start+1 ..= end.
        let lowest = (start + 1) as f64;
        let highest = end as f64;
        for (offset, &idx) in order[start..end].iter().enumerate() {
            ranks[idx] = match method {
                RankMethod::Average => (lowest + highest) / 2.0,
                RankMethod::Min => lowest,
                RankMethod::Max => highest,
                RankMethod::Dense => dense,
                RankMethod::Ordinal => lowest + offset as f64,
                RankMethod::NoRanking => values[idx],
            };
        }
        start = end;
    }
    ranks
}

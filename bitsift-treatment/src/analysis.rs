//! Cost model and optimal-configuration search.
//!
//! A candidate configuration is expressed here as a dense vector of row
//! counts indexed by rank, which is the shape the recursive search mutates;
//! the strategy layer converts the winning vector into a
//! [`RowConfiguration`](bitsift_term_model::RowConfiguration) afterwards.

use bitsift_term_model::term::{frequency_at_rank, Rank, RANK_COUNT};

use crate::metrics::TermTreatmentMetrics;

/// Row counts per rank, index = rank.
pub type RowVector = [u32; RANK_COUNT];

/// Cap on the number of rows the search may place at any single rank.
pub const MAX_ROWS_PER_RANK: u32 = 6;

/// Computes the metrics of a row vector for a term of frequency `signal`
/// against shared rows of the given bit density.
///
/// Ranks are consumed from highest to lowest, mirroring query execution: the
/// intersection starts at the coarsest rank and each transition to a lower
/// rank ("rank down") expands every surviving chunk bit into two finer ones,
/// re-admitting the noise that was hidden by the coarser granularity before
/// the finer rows AND it back down.
///
/// Accounting decisions the rest of the planner depends on:
///
/// - A shared row is charged `signal_at_rank / density` quadwords, the
///   fraction of the row the term occupies. A private row
///   (`signal_at_rank > density`) is charged the full `1 / 2^rank`.
/// - Scan cost of each row is weighted by the probability that the cumulative
///   AND has not already zeroed the whole quadword,
///   `1 - (1 - density_at_rank)^64`, modeling the scanner's early exit on
///   all-zero quadwords.
/// - `residual_noise` and `last_signal_at_rank` begin as `NaN`. Ranks with no
///   rows accumulate `residual_noise += new_noise`, which keeps it `NaN`
///   until the first intersecting rank overwrites it unconditionally. An
///   all-zero vector therefore reports `NaN` SNR, and the search treats it
///   as infeasible. Replacing the `NaN` seeding with 0 would change search
///   results.
pub fn analyze_row_vector(rows: &RowVector, density: f64, signal: f64) -> TermTreatmentMetrics {
    let mut scan_cost = 0.0;
    let mut memory_cost = 0.0;

    let mut first_intersection = true;
    let mut residual_noise = f64::NAN;
    let mut last_signal_at_rank = f64::NAN;
    // Probability that the current quadword is not all zeros.
    let mut weight = 1.0;

    for rank in (0..rows.len()).rev() {
        let signal_at_rank = frequency_at_rank(signal, rank);
        let noise_at_rank = (density - signal_at_rank).max(0.0);
        let full_row_cost = 1.0 / (1u64 << rank) as f64;
        let new_noise = last_signal_at_rank - signal_at_rank;
        last_signal_at_rank = signal_at_rank;

        if rows[rank] == 0 {
            residual_noise += new_noise;
        } else {
            for row in 0..rows[rank] {
                if signal_at_rank > density {
                    memory_cost += full_row_cost;
                } else {
                    memory_cost += signal_at_rank / density;
                }
                if row == 0 {
                    if !first_intersection {
                        // Rank down: noise hidden at the coarser granularity
                        // re-enters before this rank's first row ANDs it.
                        residual_noise = (new_noise + residual_noise) * noise_at_rank;
                    } else {
                        residual_noise = noise_at_rank;
                    }
                } else {
                    residual_noise *= noise_at_rank;
                }
                scan_cost += weight * full_row_cost;
                let density_at_rank = residual_noise + signal_at_rank;
                weight = 1.0 - (1.0 - density_at_rank).powi(64);
            }

            first_intersection = false;
        }
    }

    TermTreatmentMetrics::new(signal / residual_noise, scan_cost, memory_cost)
}

/// Recursively searches for the minimum-cost row vector for a term of the
/// given frequency, subject to the SNR floor `snr`.
///
/// The cost of a complete vector is `-dq` when its metrics meet the floor
/// and `+inf` otherwise, so minimizing cost maximizes document quality over
/// feasible configurations. At each rank the search either moves down a rank
/// or adds one more row at the current rank, with two forced cases: a rank
/// where the term exceeds the density gets exactly one private row, and a
/// rank already holding `max_rows_per_rank` rows only moves down. Cost ties
/// resolve in favor of the added row.
///
/// `current_rank` starts at
/// [`compute_max_rank(frequency, density)`](bitsift_term_model::term::compute_max_rank)
/// and `-1` terminates the recursion, at which point `rows` is evaluated.
pub fn search_optimal(
    frequency: f64,
    density: f64,
    snr: f64,
    current_rank: i32,
    mut rows: RowVector,
    max_rows_per_rank: u32,
) -> (f64, RowVector) {
    if current_rank < 0 {
        let metrics = analyze_row_vector(&rows, density, frequency);
        let cost = if metrics.snr() < snr || metrics.snr().is_nan() {
            f64::INFINITY
        } else {
            -metrics.dq()
        };
        return (cost, rows);
    }

    let rank = current_rank as Rank;
    if frequency_at_rank(frequency, rank) > density {
        // Too common to share at this rank: one private row, then down.
        rows[rank] += 1;
        search_optimal(frequency, density, snr, current_rank - 1, rows, max_rows_per_rank)
    } else if rows[rank] >= max_rows_per_rank {
        search_optimal(frequency, density, snr, current_rank - 1, rows, max_rows_per_rank)
    } else {
        let rank_down =
            search_optimal(frequency, density, snr, current_rank - 1, rows, max_rows_per_rank);
        rows[rank] += 1;
        let new_row =
            search_optimal(frequency, density, snr, current_rank, rows, max_rows_per_rank);
        if new_row.0 <= rank_down.0 {
            new_row
        } else {
            rank_down
        }
    }
}

//! Search-driven treatment.

use bitsift_common::Result;
use bitsift_term_model::term::{
    compute_max_rank, frequency_at_rank, idf_x10_to_frequency, MAX_IDF_X10,
};
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use crate::analysis::{search_optimal, RowVector, MAX_ROWS_PER_RANK};

use super::{entry_count, verify_parameters, Treatment, TreatmentKind};

/// Derives each IDF class's configuration from the recursive minimum-cost
/// search instead of a fixed shape.
///
/// Construction runs [`search_optimal`] once per IDF class, starting at the
/// highest rank the class's frequency can share at, and converts the winning
/// row vector into a configuration. Ranks where the term exceeds the density
/// are recorded as single private rows. This is by far the most expensive
/// strategy to construct; the cost is paid once per index build.
#[derive(Debug)]
pub struct ExperimentalTreatment {
    configurations: Vec<RowConfiguration>,
}

impl ExperimentalTreatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<ExperimentalTreatment> {
        verify_parameters(density, snr)?;
        let mut configurations = Vec::with_capacity(MAX_IDF_X10 as usize + 1);
        for idf in 0..=MAX_IDF_X10 {
            let frequency = idf_x10_to_frequency(idf);
            let start_rank = compute_max_rank(frequency, density) as i32;
            let (_cost, rows) = search_optimal(
                frequency,
                density,
                snr,
                start_rank,
                RowVector::default(),
                MAX_ROWS_PER_RANK,
            );

            let mut configuration = RowConfiguration::new();
            for (rank, &count) in rows.iter().enumerate() {
                if count > 0 {
                    if frequency_at_rank(frequency, rank) > density {
                        configuration.push_front(RowConfigurationEntry::new(rank, 1))?;
                    } else {
                        configuration
                            .push_front(RowConfigurationEntry::new(rank, entry_count(count)))?;
                    }
                }
            }
            configurations.push(configuration);
        }
        Ok(ExperimentalTreatment { configurations })
    }
}

impl Treatment for ExperimentalTreatment {
    fn treatment_for(&self, term: Term) -> &RowConfiguration {
        &self.configurations[term.idf().min(MAX_IDF_X10) as usize]
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::Experimental
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_row_vector;
    use std::sync::OnceLock;

    const DENSITY: f64 = 0.1;
    const SNR: f64 = 10.0;

    // Construction explores the full search space for all 91 IDF classes;
    // share one instance across the tests that only read it.
    fn shared() -> &'static ExperimentalTreatment {
        static TREATMENT: OnceLock<ExperimentalTreatment> = OnceLock::new();
        TREATMENT.get_or_init(|| ExperimentalTreatment::new(DENSITY, SNR, 0).unwrap())
    }

    fn term_with_idf(idf: u8) -> Term {
        Term::with_idf(1, 1, 0, idf)
    }

    #[test]
    fn test_configurations_meet_snr_floor() {
        let treatment = shared();
        for idf in 0..=MAX_IDF_X10 {
            let configuration = treatment.treatment_for(term_with_idf(idf));
            assert!(!configuration.is_empty(), "idf {idf}: empty configuration");

            let mut rows = RowVector::default();
            for entry in configuration {
                rows[entry.rank()] += entry.count() as u32;
            }
            let metrics = analyze_row_vector(&rows, DENSITY, idf_x10_to_frequency(idf));
            let private = configuration.len() == 1 && configuration.total_row_count() == 1;
            assert!(
                metrics.snr() >= SNR || private,
                "idf {idf}: snr {} below floor for non-private configuration",
                metrics.snr()
            );
        }
    }

    #[test]
    fn test_common_terms_get_single_private_row() {
        let treatment = shared();
        // IDF class 5: frequency ~0.316 cannot share at any rank.
        let entries: Vec<_> = treatment
            .treatment_for(term_with_idf(5))
            .iter()
            .map(|e| (e.rank(), e.count()))
            .collect();
        assert_eq!(entries, vec![(0, 1)]);
    }

    #[test]
    fn test_respects_per_rank_cap_and_order() {
        let treatment = shared();
        for idf in 0..=MAX_IDF_X10 {
            let configuration = treatment.treatment_for(term_with_idf(idf));
            let ranks: Vec<_> = configuration.iter().map(|e| e.rank()).collect();
            let mut sorted = ranks.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(ranks, sorted, "idf {idf}: ranks not descending");

            for entry in configuration {
                assert!(entry.count() as u32 <= MAX_ROWS_PER_RANK, "idf {idf}");
            }
        }
    }

    #[test]
    fn test_construction_is_deterministic() {
        let again = ExperimentalTreatment::new(DENSITY, SNR, 0).unwrap();
        for idf in 0..=MAX_IDF_X10 {
            assert_eq!(
                shared().treatment_for(term_with_idf(idf)),
                again.treatment_for(term_with_idf(idf)),
                "idf {idf}"
            );
        }
    }
}

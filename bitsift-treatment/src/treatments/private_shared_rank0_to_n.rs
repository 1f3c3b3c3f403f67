//! Treatment spreading rows across a run of increasing ranks.

use bitsift_common::Result;
use bitsift_term_model::term::{
    compute_max_rank, compute_row_count, frequency_at_rank, idf_x10_to_frequency, MAX_IDF_X10,
};
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use super::{entry_count, verify_parameters, Treatment, TreatmentKind};

/// Bit density a term may reach at the highest rank it is given a row at.
/// Deliberately distinct from the treatment's shared-row density target.
/// TODO: tune; 0.15 predates the configurable density target.
const MAX_RANK_DENSITY: f64 = 0.15;

/// Gives each term two rank-0 rows followed by one row at every rank up to
/// the highest rank where the term still fits under [`MAX_RANK_DENSITY`],
/// with any remaining row budget spent at that final rank.
#[derive(Debug)]
pub struct PrivateSharedRank0ToNTreatment {
    configurations: Vec<RowConfiguration>,
}

impl PrivateSharedRank0ToNTreatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<PrivateSharedRank0ToNTreatment> {
        verify_parameters(density, snr)?;
        let mut configurations = Vec::with_capacity(MAX_IDF_X10 as usize + 1);
        for idf in 0..=MAX_IDF_X10 {
            let frequency = idf_x10_to_frequency(idf);
            let mut configuration = RowConfiguration::new();
            if frequency > density {
                // This term is so common that it must be assigned a private
                // row.
                configuration.push_front(RowConfigurationEntry::new(0, 1))?;
            } else {
                let max_rank = compute_max_rank(frequency, MAX_RANK_DENSITY);
                let mut budget = compute_row_count(frequency, density, snr) as i64 - 2;
                configuration.push_front(RowConfigurationEntry::new(0, 2))?;

                // One row per intermediate rank, whether shared or private
                // at that rank's chunk frequency.
                let mut rank = 1;
                while rank < max_rank {
                    configuration.push_front(RowConfigurationEntry::new(rank, 1))?;
                    rank += 1;
                    budget -= 1;
                }

                // The final rank takes whatever budget is left, unless the
                // term is too dense there to share.
                if frequency_at_rank(frequency, rank) >= density {
                    configuration.push_front(RowConfigurationEntry::new(rank, 1))?;
                } else if budget > 1 {
                    configuration
                        .push_front(RowConfigurationEntry::new(rank, entry_count(budget as u32)))?;
                } else {
                    configuration.push_front(RowConfigurationEntry::new(rank, 1))?;
                }
            }
            configurations.push(configuration);
        }
        Ok(PrivateSharedRank0ToNTreatment { configurations })
    }
}

impl Treatment for PrivateSharedRank0ToNTreatment {
    fn treatment_for(&self, term: Term) -> &RowConfiguration {
        &self.configurations[term.idf().min(MAX_IDF_X10) as usize]
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::PrivateSharedRank0ToN
    }
}

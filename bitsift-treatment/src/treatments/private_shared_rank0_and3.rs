//! Treatment splitting rows between rank 0 and rank 3.

use bitsift_common::Result;
use bitsift_term_model::term::{
    compute_row_count, frequency_at_rank, idf_x10_to_frequency, MAX_IDF_X10,
};
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use super::{entry_count, verify_parameters, Treatment, TreatmentKind};

/// Gives each term one or more rank-0 and rank-3 rows, private or shared
/// depending on its frequency.
///
/// Terms needing more than two rows take the surplus at rank 3, where rows
/// are an eighth of the size. The rank-3 entry itself degrades to a single
/// private row when the term's rank-3 density is already at or above the
/// target.
#[derive(Debug)]
pub struct PrivateSharedRank0And3Treatment {
    configurations: Vec<RowConfiguration>,
}

impl PrivateSharedRank0And3Treatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<PrivateSharedRank0And3Treatment> {
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
                // Number of rows needed to reach the SNR floor at this bit
                // density, of which the first two stay at rank 0.
                let count = compute_row_count(frequency, density, snr);
                configuration.push_front(RowConfigurationEntry::new(0, 2))?;
                if count > 2 {
                    let rank = 3;
                    if frequency_at_rank(frequency, rank) >= density {
                        configuration.push_front(RowConfigurationEntry::new(rank, 1))?;
                    } else {
                        configuration
                            .push_front(RowConfigurationEntry::new(rank, entry_count(count - 2)))?;
                    }
                }
            }
            configurations.push(configuration);
        }
        Ok(PrivateSharedRank0And3Treatment { configurations })
    }
}

impl Treatment for PrivateSharedRank0And3Treatment {
    fn treatment_for(&self, term: Term) -> &RowConfiguration {
        &self.configurations[term.idf().min(MAX_IDF_X10) as usize]
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::PrivateSharedRank0And3
    }
}

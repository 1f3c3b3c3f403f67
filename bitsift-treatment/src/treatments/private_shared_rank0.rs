//! Rank-0-only treatment with frequency-dependent sharing.

use bitsift_common::Result;
use bitsift_term_model::term::{compute_row_count, idf_x10_to_frequency, MAX_IDF_X10};
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use super::{entry_count, verify_parameters, Treatment, TreatmentKind};

/// Gives each term one or more rank-0 rows, private or shared depending on
/// its frequency.
///
/// A term at or above the target density cannot share without blowing the
/// density budget, so it gets one private row. Everything rarer gets the
/// number of shared rows needed to reach the SNR floor.
#[derive(Debug)]
pub struct PrivateSharedRank0Treatment {
    configurations: Vec<RowConfiguration>,
}

impl PrivateSharedRank0Treatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<PrivateSharedRank0Treatment> {
        verify_parameters(density, snr)?;
        let mut configurations = Vec::with_capacity(MAX_IDF_X10 as usize + 1);
        for idf in 0..=MAX_IDF_X10 {
            let frequency = idf_x10_to_frequency(idf);
            let mut configuration = RowConfiguration::new();
            if frequency >= density {
                // This term is so common that it must be assigned a private
                // row.
                configuration.push_front(RowConfigurationEntry::new(0, 1))?;
            } else {
                let count = compute_row_count(frequency, density, snr);
                configuration.push_front(RowConfigurationEntry::new(0, entry_count(count)))?;
            }
            configurations.push(configuration);
        }
        Ok(PrivateSharedRank0Treatment { configurations })
    }
}

impl Treatment for PrivateSharedRank0Treatment {
    fn treatment_for(&self, term: Term) -> &RowConfiguration {
        &self.configurations[term.idf().min(MAX_IDF_X10) as usize]
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::PrivateSharedRank0
    }
}

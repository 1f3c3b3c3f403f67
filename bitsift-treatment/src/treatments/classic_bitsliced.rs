//! Classic bit-sliced signature-file treatment.

use bitsift_common::Result;
use bitsift_term_model::term::{compute_row_count, idf_x10_to_frequency};
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use super::{entry_count, verify_parameters, Treatment, TreatmentKind};

/// IDF class whose frequency sizes the uniform row count (IDF 4.0, one
/// document in ten thousand).
const REFERENCE_IDF_X10: u8 = 40;

/// Gives every term the same number of shared rank-0 rows, as in classic
/// bit-sliced signature files.
///
/// The count is sized for a reference mid-range frequency, so rarer terms
/// over-achieve the SNR floor and more common terms fall short of it. The
/// strategy exists as the historical baseline the frequency-aware
/// treatments improve on.
#[derive(Debug)]
pub struct ClassicBitslicedTreatment {
    configuration: RowConfiguration,
}

impl ClassicBitslicedTreatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<ClassicBitslicedTreatment> {
        verify_parameters(density, snr)?;
        let frequency = idf_x10_to_frequency(REFERENCE_IDF_X10);
        let count = compute_row_count(frequency, density, snr);
        let mut configuration = RowConfiguration::new();
        configuration.push_front(RowConfigurationEntry::new(0, entry_count(count)))?;
        Ok(ClassicBitslicedTreatment { configuration })
    }
}

impl Treatment for ClassicBitslicedTreatment {
    fn treatment_for(&self, _term: Term) -> &RowConfiguration {
        &self.configuration
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::ClassicBitsliced
    }
}

//! The all-private baseline treatment.

use bitsift_common::Result;
use bitsift_term_model::{RowConfiguration, RowConfigurationEntry, Term};

use super::{verify_parameters, Treatment, TreatmentKind};

/// Gives every term the same treatment: a single private rank-0 row.
///
/// This is the degenerate "no sharing" corner of the design space
/// (noise-free, maximally expensive in memory) and doubles as the reference
/// point the shared strategies are judged against. `density`, `snr` and
/// `variant` do not influence the configuration.
#[derive(Debug)]
pub struct PrivateRank0Treatment {
    configuration: RowConfiguration,
}

impl PrivateRank0Treatment {
    pub fn new(density: f64, snr: f64, _variant: i32) -> Result<PrivateRank0Treatment> {
        verify_parameters(density, snr)?;
        let mut configuration = RowConfiguration::new();
        configuration.push_front(RowConfigurationEntry::new(0, 1))?;
        Ok(PrivateRank0Treatment { configuration })
    }
}

impl Treatment for PrivateRank0Treatment {
    fn treatment_for(&self, _term: Term) -> &RowConfiguration {
        &self.configuration
    }

    fn kind(&self) -> TreatmentKind {
        TreatmentKind::PrivateRank0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_configuration_for_all_terms() {
        let treatment = PrivateRank0Treatment::new(0.1, 10.0, 0).unwrap();
        for idf in [0, 40, 90, 255] {
            let configuration = treatment.treatment_for(Term::with_idf(idf as u64, 1, 0, idf));
            let entries: Vec<_> = configuration.iter().collect();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].rank(), 0);
            assert_eq!(entries[0].count(), 1);
        }
    }
}

//! Treatment strategies and their selection façade.
//!
//! A treatment strategy decides, once per index build, which row
//! configuration every IDF class receives. All strategies are constructed
//! from the same `(density, snr, variant)` triple, pre-tabulate their
//! configurations, and answer [`Treatment::treatment_for`] by a clamped
//! table lookup, so strategy choice costs nothing per term afterwards.
//!
//! Strategies are selected by name through [`create_treatment`], which is
//! the surface the TermTable builder consumes.

pub mod classic_bitsliced;
pub mod experimental;
pub mod private_rank0;
pub mod private_shared_rank0;
pub mod private_shared_rank0_and3;
pub mod private_shared_rank0_to_n;

use bitsift_common::{error::Error, verify_arg, Result};
use bitsift_term_model::{RowConfiguration, Term};

pub use classic_bitsliced::ClassicBitslicedTreatment;
pub use experimental::ExperimentalTreatment;
pub use private_rank0::PrivateRank0Treatment;
pub use private_shared_rank0::PrivateSharedRank0Treatment;
pub use private_shared_rank0_and3::PrivateSharedRank0And3Treatment;
pub use private_shared_rank0_to_n::PrivateSharedRank0ToNTreatment;

/// A term-treatment strategy with its configurations already tabulated.
///
/// Implementations are immutable after construction; `treatment_for` is a
/// read-only lookup safe to call from any number of threads.
pub trait Treatment: Send + Sync {
    /// Returns the row configuration for `term`, keyed by its IDF class
    /// clamped to the tabulated range. Total: every term gets a
    /// configuration.
    fn treatment_for(&self, term: Term) -> &RowConfiguration;

    /// Get the kind of the treatment.
    fn kind(&self) -> TreatmentKind;

    /// Get the name of the treatment kind as a static string.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// One-line description of the strategy, for diagnostics.
    fn describe(&self) -> &'static str {
        self.kind().describe()
    }
}

/// Creates a treatment instance based on the provided name string.
///
/// This factory is the configuration-driven entry point used by the
/// TermTable builder: the strategy name comes from build configuration, and
/// `density`/`snr` are the per-shard targets. `variant` is reserved for
/// strategy sub-variants and currently ignored by all strategies.
///
/// # Errors
///
/// Returns an `InvalidArgument` error when the name is not recognized, when
/// `density` is outside `(0, 1)`, or when `snr` is not positive.
pub fn create_treatment(
    name: &str,
    density: f64,
    snr: f64,
    variant: i32,
) -> Result<TreatmentType> {
    match name.try_into()? {
        TreatmentKind::PrivateRank0 => Ok(TreatmentType::PrivateRank0(PrivateRank0Treatment::new(
            density, snr, variant,
        )?)),
        TreatmentKind::PrivateSharedRank0 => Ok(TreatmentType::PrivateSharedRank0(
            PrivateSharedRank0Treatment::new(density, snr, variant)?,
        )),
        TreatmentKind::PrivateSharedRank0And3 => Ok(TreatmentType::PrivateSharedRank0And3(
            PrivateSharedRank0And3Treatment::new(density, snr, variant)?,
        )),
        TreatmentKind::PrivateSharedRank0ToN => Ok(TreatmentType::PrivateSharedRank0ToN(
            PrivateSharedRank0ToNTreatment::new(density, snr, variant)?,
        )),
        TreatmentKind::ClassicBitsliced => Ok(TreatmentType::ClassicBitsliced(
            ClassicBitslicedTreatment::new(density, snr, variant)?,
        )),
        TreatmentKind::Experimental => Ok(TreatmentType::Experimental(
            ExperimentalTreatment::new(density, snr, variant)?,
        )),
    }
}

/// Validates the `(density, snr)` pair shared by every strategy
/// constructor.
pub(crate) fn verify_parameters(density: f64, snr: f64) -> Result<()> {
    verify_arg!(density, density > 0.0 && density < 1.0);
    verify_arg!(snr, snr > 0.0);
    Ok(())
}

/// Narrows a computed row count into an entry count. Counts beyond `u8`
/// only arise for degenerate `(density, snr)` choices far outside the
/// operating range; they saturate rather than wrap.
pub(crate) fn entry_count(count: u32) -> u8 {
    count.min(u8::MAX as u32) as u8
}

/// Enum identifying the available treatment strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentKind {
    /// One private rank-0 row for every term.
    PrivateRank0,
    /// Rank-0 rows only, private or shared depending on term frequency.
    PrivateSharedRank0,
    /// Private or shared rows split between rank 0 and rank 3.
    PrivateSharedRank0And3,
    /// Two rank-0 rows then one row per rank up to a density ceiling.
    PrivateSharedRank0ToN,
    /// The same row count for every term, as in classic bit-sliced
    /// signature files.
    ClassicBitsliced,
    /// Per-class minimum-cost configurations found by exhaustive search.
    Experimental,
}

/// Convert a string name to a TreatmentKind enum variant.
impl TryFrom<&str> for TreatmentKind {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "PrivateRank0" => Ok(TreatmentKind::PrivateRank0),
            "PrivateSharedRank0" => Ok(TreatmentKind::PrivateSharedRank0),
            "PrivateSharedRank0And3" => Ok(TreatmentKind::PrivateSharedRank0And3),
            "PrivateSharedRank0ToN" => Ok(TreatmentKind::PrivateSharedRank0ToN),
            "ClassicBitsliced" => Ok(TreatmentKind::ClassicBitsliced),
            "Experimental" => Ok(TreatmentKind::Experimental),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized treatment: {name}"),
            )),
        }
    }
}

impl TreatmentKind {
    /// Get the name of the treatment kind as a static string.
    pub const fn name(&self) -> &'static str {
        match self {
            TreatmentKind::PrivateRank0 => "PrivateRank0",
            TreatmentKind::PrivateSharedRank0 => "PrivateSharedRank0",
            TreatmentKind::PrivateSharedRank0And3 => "PrivateSharedRank0And3",
            TreatmentKind::PrivateSharedRank0ToN => "PrivateSharedRank0ToN",
            TreatmentKind::ClassicBitsliced => "ClassicBitsliced",
            TreatmentKind::Experimental => "Experimental",
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            TreatmentKind::PrivateRank0 => "single private rank-0 row per term",
            TreatmentKind::PrivateSharedRank0 => {
                "rank-0 rows, private or shared by term frequency"
            }
            TreatmentKind::PrivateSharedRank0And3 => {
                "private or shared rows at ranks 0 and 3"
            }
            TreatmentKind::PrivateSharedRank0ToN => {
                "two rank-0 rows then one row per rank while density permits"
            }
            TreatmentKind::ClassicBitsliced => "uniform row count for all terms",
            TreatmentKind::Experimental => "minimum-cost configurations by exhaustive search",
        }
    }
}

/// Enum that holds all available treatment types, allowing dynamic
/// dispatch over a strategy chosen at build time.
#[derive(Debug)]
pub enum TreatmentType {
    PrivateRank0(PrivateRank0Treatment),
    PrivateSharedRank0(PrivateSharedRank0Treatment),
    PrivateSharedRank0And3(PrivateSharedRank0And3Treatment),
    PrivateSharedRank0ToN(PrivateSharedRank0ToNTreatment),
    ClassicBitsliced(ClassicBitslicedTreatment),
    Experimental(ExperimentalTreatment),
}

impl Treatment for TreatmentType {
    fn treatment_for(&self, term: Term) -> &RowConfiguration {
        match self {
            TreatmentType::PrivateRank0(treatment) => treatment.treatment_for(term),
            TreatmentType::PrivateSharedRank0(treatment) => treatment.treatment_for(term),
            TreatmentType::PrivateSharedRank0And3(treatment) => treatment.treatment_for(term),
            TreatmentType::PrivateSharedRank0ToN(treatment) => treatment.treatment_for(term),
            TreatmentType::ClassicBitsliced(treatment) => treatment.treatment_for(term),
            TreatmentType::Experimental(treatment) => treatment.treatment_for(term),
        }
    }

    fn kind(&self) -> TreatmentKind {
        match self {
            TreatmentType::PrivateRank0(treatment) => treatment.kind(),
            TreatmentType::PrivateSharedRank0(treatment) => treatment.kind(),
            TreatmentType::PrivateSharedRank0And3(treatment) => treatment.kind(),
            TreatmentType::PrivateSharedRank0ToN(treatment) => treatment.kind(),
            TreatmentType::ClassicBitsliced(treatment) => treatment.kind(),
            TreatmentType::Experimental(treatment) => treatment.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitsift_common::error::ErrorKind;

    #[test]
    fn test_create_treatment() {
        assert!(create_treatment("PrivateRank0", 0.1, 10.0, 0).is_ok());
        assert!(create_treatment("PrivateSharedRank0", 0.1, 10.0, 0).is_ok());
        assert!(create_treatment("PrivateSharedRank0And3", 0.1, 10.0, 0).is_ok());
        assert!(create_treatment("PrivateSharedRank0ToN", 0.1, 10.0, 0).is_ok());
        assert!(create_treatment("ClassicBitsliced", 0.1, 10.0, 0).is_ok());
        assert!(create_treatment("unknown", 0.1, 10.0, 0).is_err());
        // Experimental is exercised end to end in its own module; here it
        // only needs to resolve by name.
        assert_eq!(
            TreatmentKind::try_from("Experimental").unwrap(),
            TreatmentKind::Experimental
        );

        // Created treatments report their names.
        assert_eq!(
            create_treatment("PrivateSharedRank0", 0.1, 10.0, 0)
                .unwrap()
                .name(),
            "PrivateSharedRank0"
        );
        assert_eq!(
            create_treatment("ClassicBitsliced", 0.1, 10.0, 0)
                .unwrap()
                .name(),
            "ClassicBitsliced"
        );
    }

    #[test]
    fn test_create_treatment_rejects_bad_parameters() {
        for (density, snr) in [(0.0, 10.0), (1.0, 10.0), (-0.1, 10.0), (0.1, 0.0), (0.1, -5.0)] {
            let result = create_treatment("PrivateSharedRank0", density, snr, 0);
            assert!(
                matches!(
                    result.unwrap_err().kind(),
                    ErrorKind::InvalidArgument { .. }
                ),
                "accepted density={density}, snr={snr}"
            );
        }
    }

    #[test]
    fn test_variant_is_reserved() {
        // Any variant value is accepted and does not change the result.
        let a = create_treatment("PrivateSharedRank0", 0.1, 10.0, 0).unwrap();
        let b = create_treatment("PrivateSharedRank0", 0.1, 10.0, 7).unwrap();
        let term = Term::with_idf(1, 1, 0, 40);
        assert_eq!(a.treatment_for(term), b.treatment_for(term));
    }

    #[test]
    fn test_describe() {
        let treatment = create_treatment("PrivateRank0", 0.1, 10.0, 0).unwrap();
        assert_eq!(treatment.describe(), "single private rank-0 row per term");
    }

    #[test]
    fn test_planner_walk_over_frequency_table() {
        // The TermTable builder's view of this crate: walk a frequency
        // table most-frequent first and ask for each term's configuration.
        use bitsift_corpus_stats::DocumentFrequencyTable;
        use std::io::Cursor;

        let table = DocumentFrequencyTable::read_from(Cursor::new(
            "00000000DECAFBAD,1,0,0.31622776601683794\n\
             000000000000CAFE,1,0,0.01\n\
             000000000000BEEF,2,1,0.0001\n\
             000000000000F00D,1,0,0.000001\n",
        ))
        .unwrap();

        let treatment = create_treatment("PrivateSharedRank0", 0.1, 10.0, 0).unwrap();
        let mut previous_total = 0;
        for entry in &table {
            let configuration = treatment.treatment_for(entry.term());
            assert!(!configuration.is_empty());
            // Walking down the table, terms get rarer and their row
            // footprint grows.
            let total = configuration.total_row_count();
            assert!(total >= previous_total);
            previous_total = total;
        }

        // The most common term went private, the rarest went wide.
        assert_eq!(
            treatment.treatment_for(table[0].term()).total_row_count(),
            1
        );
        assert_eq!(
            treatment.treatment_for(table[3].term()).total_row_count(),
            7
        );
    }
}

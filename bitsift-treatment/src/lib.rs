//! Term-treatment planning for a bit-sliced signature index.
//!
//! A query against a bit-sliced index ANDs together the rows assigned to its
//! terms and reads surviving document IDs out of the resulting bit vector.
//! Rows shared between terms make the index small but add noise to every
//! intersection; private rows are noise-free but expensive. The *treatment*
//! of a term is the row configuration (how many rows, at which ranks) that
//! balances this trade-off for the term's document frequency.
//!
//! This crate decides treatments:
//!
//! - [`metrics::TermTreatmentMetrics`] summarizes a candidate configuration:
//!   signal-to-noise ratio, scan cost and memory cost.
//! - [`analysis`] holds the cost model that produces those metrics and the
//!   recursive search for a minimum-cost configuration subject to an SNR
//!   floor.
//! - [`treatments`] provides the strategy implementations, from the trivial
//!   one-private-row-per-term baseline to the search-driven
//!   [`treatments::ExperimentalTreatment`], behind a common [`Treatment`]
//!   trait selected by name via [`create_treatment`].
//!
//! Strategies tabulate one row configuration per IDF class at construction
//! time; afterwards [`Treatment::treatment_for`] is a read-only lookup that
//! is safe to share across threads.

pub mod analysis;
pub mod metrics;
pub mod treatments;

pub use metrics::TermTreatmentMetrics;
pub use treatments::{create_treatment, Treatment, TreatmentKind, TreatmentType};

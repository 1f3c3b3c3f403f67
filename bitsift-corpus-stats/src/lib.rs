//! Corpus statistics consumed by the bitsift term-treatment planner.
//!
//! The only statistic the planner needs is the per-term document frequency,
//! collected by an external corpus-analysis step and persisted as a text
//! table sorted by non-increasing frequency. This crate loads, validates and
//! re-emits that table; see [`DocumentFrequencyTable`].

pub mod doc_frequency_table;

pub use doc_frequency_table::{DocumentFrequencyTable, DocumentFrequencyTableEntry};

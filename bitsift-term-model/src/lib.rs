//! Term model for the bitsift term-treatment planner.
//!
//! A bit-sliced index stores a term as set bits in one or more rows of a bit
//! matrix. How many rows, and at which ranks, is decided per term from its
//! corpus frequency. This crate provides the two building blocks that decision
//! rests on:
//!
//! 1. [`Term`] and the pure numeric model around it: conversions between
//!    bucketed inverse document frequency ([`IdfX10`]) and corpus frequency,
//!    the frequency a term exhibits at a given row [`Rank`], and the number of
//!    shared rows needed to reach a target signal-to-noise ratio.
//! 2. [`RowConfiguration`], the small ordered collection of `(rank, count)`
//!    entries a treatment strategy assigns to a term.

pub mod row_configuration;
pub mod term;

pub use row_configuration::{RowConfiguration, RowConfigurationEntry};
pub use term::{GramSize, IdfX10, Rank, StreamId, Term, TermHash};

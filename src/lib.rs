// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Residue contact and side-chain interaction analysis for protein
//! structures.
//!
//! Proxima sits between a parsed atomic structure and an interactive residue
//! picker. It indexes polymer residues, builds a residue-residue contact map,
//! classifies hydrogen bonds, salt bridges, ionic contacts and disulfides
//! between chosen residue pairs, and drives a capacity-bounded selection
//! whose candidate list is narrowed by spatial proximity.
//!
//! # Key entry points
//!
//! - [`session::AnalysisSession`] - single-owner state for one loaded
//!   structure: selection, filter, caches, debounced threshold changes
//! - [`residue::ResidueDataset`] - per-residue atom index built from a
//!   [`structure::Structure`]
//! - [`contact::ContactMap`] - symmetric side-chain contact map
//! - [`interaction::classify`] - geometric interaction rules
//! - [`options::AnalysisOptions`] - TOML-backed runtime configuration
//!
//! # Data flow
//!
//! Structure → residue index → contact map → proximity projection ⇄
//! selection → (on analyze) interaction classifier → renderer. Everything
//! runs on the caller's thread; the only time-dependent piece is the
//! threshold debouncer, which is polled with an explicit `now`.

pub mod contact;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod options;
pub mod render;
pub mod residue;
pub mod schedule;
pub mod selection;
pub mod session;
pub mod structure;

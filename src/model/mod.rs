//! Typed representations of both Sim state file schemas.
//!
//! - [`legacy`] – The pre-release schema, where one Sim carries any number of
//!   named universe definitions under `mds.universes`.
//! - [`state`] – The 0.6.0 schema, where a Sim carries exactly one universe
//!   definition and its atom selections under `mdsynthesis`.
//! - [`values`] – Tags, categories, selections and path pairs shared by both.

pub mod legacy;
pub mod state;
pub mod values;

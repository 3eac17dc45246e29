//! Insight Engine boundary
//!
//! Typed interface to the external text-completion collaborator. The
//! collaborator is opaque: given a structured business payload and an
//! instruction, it returns JSON that must match one of a few fixed
//! response shapes. Nothing here depends on the *content* being right -
//! only on it being well-formed. Transport failures and malformed
//! responses surface as typed errors and never touch ledger state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod types;

pub use error::{Error, Result};
pub use provider::{CannedProvider, InsightClient, InsightProvider};
pub use types::*;

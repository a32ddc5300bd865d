//! Numerical routines shared across the curve and credit modules.

pub mod root_finding;

pub use root_finding::{RootConfig, expand_bracket, find_root_brent};

#![forbid(unsafe_code)]
#![deny(trivial_casts, trivial_numeric_casts)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![allow(missing_docs)]

pub mod aliases;
pub mod constants;
pub mod fork;
pub mod header;
pub mod parent;
pub mod payload;
pub mod slot;

// KZG commitments and the SSZ list root the ePBS header commits to.
pub mod commitments;
pub mod kzg;

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Core types and pure numeric routines of the ratefeed sample-rate converter.
//!
//! Everything here is free of per-stream state: the ratio reduction, the
//! fixed-point scale/roll search, the coefficient search that dodges Hz
//! roundup, and the policy cascade that turns a pair of rates into a
//! [`ConversionPlan`](plan::ConversionPlan).

/// Sample rate units and frame layout constants.
pub mod common;
/// Converter configuration.
pub mod config;
/// Configuration errors.
pub mod error;
/// Selection of the conversion strategy.
pub mod plan;
/// Rate math and coefficient search.
pub mod rate;
#[doc(hidden)]
pub mod utils;

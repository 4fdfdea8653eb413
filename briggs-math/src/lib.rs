//! # briggs-math
//!
//! Word-level arithmetic primitives for the briggs exp/ln digit-recurrence
//! engine.
//!
//! This crate provides the two number representations the recurrence runs on:
//! - [`FixedFormat`]: a 64-bit two's-complement fixed-point codec with a
//!   configurable fraction width (reference configuration: 40 bits)
//! - [`CarrySave`]: a redundant sum/carry word pair with the compressors and
//!   shifters of a hardware carry-save datapath
//!
//! **Zero external dependencies** (besides `thiserror` for error types) —
//! auditable in isolation.

pub mod carry_save;
pub mod fixed_point;

pub use carry_save::CarrySave;
pub use fixed_point::{FixedFormat, FixedPointError};

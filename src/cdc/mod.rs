//! Content-Defined Chunking (CDC) implementation.
//!
//! This module contains the core algorithm for identifying chunk boundaries
//! based on content patterns rather than fixed sizes.
//!
//! - [`FastCdc`] - FastCDC 2020 cut-point search
//! - [`GearTables`] - Base and pre-shifted gear tables, optionally seeded
//! - [`Masks`] - Normalized cut masks selected by bit-width

mod fastcdc;
mod gear;
mod mask;

pub use fastcdc::{Cut, FastCdc};
pub use gear::{GEAR, GEAR_SHIFTED, GearTables};
pub use mask::{MASKS, MAX_MASK_BITS, MIN_MASK_BITS, Masks};

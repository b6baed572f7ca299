//! Numerical building blocks used by the primitives and the digitizer.
//!
//! These are plain functions over `f64` slices with no knowledge of channels
//! or primitives. The higher level modules layer timeline composition on top
//! of the math kept here.

/// Inverse-sinc pre-equalizer for zero-order-hold DACs.
pub mod equalizer;
/// Least-squares FIR design and zero-phase filtering.
pub mod fir;
/// Normal distribution helpers and the normalized sinc.
pub mod special;

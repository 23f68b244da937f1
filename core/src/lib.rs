//! Host-independent logic for the math scratchpad.
//!
//! Everything in this crate compiles and tests on the native target; the
//! `mathpad_client` wasm crate owns all `web-sys` plumbing. [`input`] holds
//! the single view-state machine (drawing vs. dragging the result panel),
//! [`protocol`] the recognition-service wire contract, [`geometry`] the
//! point and surface-sizing helpers shared by both, and [`surface`] the
//! backdrop state.

pub mod geometry;
pub mod input;
pub mod protocol;
pub mod surface;

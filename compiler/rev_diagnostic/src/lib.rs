//! Diagnostic reporting for the Reverie interpreter.
//!
//! Every fatal error in the interpreter — parse-time, resolution-time,
//! or evaluation-time — carries the offending token's span. This crate
//! turns `(source name, source text, message, span)` into a
//! position-annotated report. Interpretation halts after rendering;
//! there is no built-in recovery.

mod diagnostic;
mod emitter;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::render;

//! Plain text diagnostics for signature failures.
//!
//! A [`Diagnostic`] annotates a one line signature header with caret runs
//! and numbered labels, followed by numbered callouts describing the
//! offending values.

mod diag;
pub mod text;

pub use diag::{Callout, Diagnostic, Mark};

//! Command-line command handlers for flipclock.
//!
//! One-shot commands and setup steps that run instead of, or before, the
//! full-screen display.

pub mod print;
pub mod simulate;

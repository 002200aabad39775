//! # Flipclock Library
//!
//! Internal library for the flipclock binary.
//!
//! This library exists to enable testing of the clock internals and to keep
//! CLI dispatch (main.rs) separate from application logic.
//!
//! ## Architecture
//!
//! - **Entry Point**: `FlipClock` runs the interactive display with resource management
//! - **Core Logic**: `core` holds the controller (tick sources, timer, flip cards)
//!   and the main loop
//! - **Display**: `display` formats values into six card symbols, animates the
//!   cards and computes the layout
//! - **Front-end**: `ui` composes and paints the cards with crossterm
//! - **Configuration**: `config` for TOML settings with hot reload
//! - **Commands**: `commands` for one-shot CLI commands (`print`, `--simulate`)
//! - **Infrastructure**: signal handling, terminal guard, logging and the
//!   injectable time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

// Public API modules
pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod io;
pub mod time_source;
pub mod ui;

mod app;

pub use app::FlipClock;

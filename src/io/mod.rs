// External I/O operations module
pub mod signals; // Unix signal handling
pub mod terminal; // Raw mode and alternate screen

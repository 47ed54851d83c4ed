// Panel renderer library - exposes all core modules for testing

// Core modules at root level
pub mod buffer;
pub mod config;
pub mod diagnostics;
pub mod theme;

// Organized modules
pub mod model;
pub mod ui;
pub mod view;

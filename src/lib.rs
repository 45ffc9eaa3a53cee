//! keyscheme library
//!
//! Key identity and remap resolution for game control-scheme profiles:
//! a catalog of physical inputs, conversions between the canonical, legacy
//! game and macro tool namespaces, forward/reverse remap lookup, a codec
//! between short search strings and physical key sequences, and AutoHotkey
//! script export.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod logging;
pub mod models;
pub mod remap;
pub mod search;
pub mod services;
pub mod translate;
pub mod validator;

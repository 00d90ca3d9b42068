pub mod artifact;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fragment;
pub mod state;

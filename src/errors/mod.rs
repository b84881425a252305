//! Error types and error handling for the engine.
//!
//! This module defines the error types shared by every pass. It includes:
//!
//! - Error structures with optional source position information
//! - Specific error variants grouped into syntax, name, type and runtime kinds
//! - Error names and human-readable suggestions for diagnostics

pub mod errors;

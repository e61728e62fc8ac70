/*
 * code-reduce - Hierarchical Program Reducer
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, Location), cancellation
 * - features/    : Vertical slices (buffer → parsing → reduction)
 * - config/      : Presets, builder, YAML schema v1
 * - errors       : Fatal and oracle error types
 *
 * Reduction:
 * - Coarse fragments first, finer ones only inside what must stay
 * - Every trial is undoable; the disk always holds the last accepted state
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (presets, builder, YAML)
pub mod config;

/// Error types
pub mod errors;

/// Feature slices
pub mod features;

/// Shared models and utilities
pub mod shared;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{OracleConfig, Preset, ReduceConfig, Validatable};
pub use errors::{OracleError, ReduceError, Result};
pub use features::buffer::{Buffer, BufferSet};
pub use features::parsing::{Frontend, TreeSitterFrontend};
pub use features::reduction::{Oracle, ReductionReport, Reducer, ShellOracle, Strategy};
pub use shared::models::{Location, Span};
pub use shared::CancelFlag;

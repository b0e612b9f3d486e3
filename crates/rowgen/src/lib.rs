//! ## Crate layout
//! - `build`: generation pass, plugin diagnostics, and column enum codegen.
//! - `core`: column models, record snapshots, the inclusion resolver, and the
//!   statement assembler.
//!
//! Generated column enums refer to `::rowgen::core`, so data-access code
//! depends on this crate rather than on the parts.

pub use rowgen_build as build;
pub use rowgen_core as core;

// generated paths resolve inside this crate too
extern crate self as rowgen;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use rowgen_build::build;

use thiserror::Error as ThisError;

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] build::Error),

    #[error(transparent)]
    Model(#[from] core::error::ModelError),

    #[error(transparent)]
    Statement(#[from] core::error::StatementError),
}

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::core::{
        criteria::KeyPredicate,
        error::{ExecuteError, ModelError, StatementError},
        statement::UpsertStatements,
    };
}

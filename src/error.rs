// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error taxonomy for the graph container

use crate::types::VertexId;
use thiserror::Error;

/// Result alias used by fallible container operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by the graph container.
///
/// Only precondition violations surface as errors. Lookups that miss and
/// mutations that turn out to be no-ops report through their tagged return
/// values instead (see [`crate::types::Inserted`] and
/// [`crate::types::Removal`]).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// An operation referenced a vertex handle this graph never issued.
    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
}

//! Error types for decimesh

use thiserror::Error;

/// Main error type for decimesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Input mesh is not manifold: {0}")]
    NotManifold(#[from] ManifoldViolation),

    #[error("Decimation made no progress: edge {edge} was rejected twice in a row")]
    NoProgress { edge: usize },
}

/// The first element found that breaks edge-manifoldness.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifoldViolation {
    #[error("face {face} repeats a vertex")]
    DegenerateFace { face: usize },

    #[error("faces {first} and {second} share all three vertices")]
    DuplicateFace { first: usize, second: usize },

    #[error("edge {edge:?} is shared by {faces} faces")]
    OverSharedEdge { edge: [usize; 2], faces: usize },

    #[error("faces around vertex {vertex} do not form a single fan")]
    NonManifoldVertex { vertex: usize },
}

/// Result type alias for decimesh operations
pub type Result<T> = std::result::Result<T, Error>;

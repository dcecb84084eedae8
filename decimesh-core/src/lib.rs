//! Core data structures for decimesh
//!
//! This crate provides the fundamental types shared by the decimation
//! algorithms: points, triangle meshes, errors and a few reference meshes.

pub mod point;
pub mod mesh;
pub mod error;
pub mod primitives;

pub use point::*;
pub use mesh::*;
pub use error::*;

//! Static file lookup under the document root.

pub mod resolver;

pub use resolver::{NotFound, ResolvedFile, resolve};

//! Core documentation build for quizdocs.
//!
//! Ties quiz loading, link building and markdown region rewriting into the
//! end-to-end `build` pipeline.

pub mod index;
pub mod item;
pub mod links;
pub mod loader;
pub mod pipeline;

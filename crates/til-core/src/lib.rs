//! Core types and algorithms for the TIL notes site.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the [`record::Record`] model, the [`store::NoteStore`] abstraction, the
//! filesystem scanner, the sync engine that reconciles notes into a store,
//! and the preview extractor used by listing pages.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod preview;
pub mod query;
pub mod record;
pub mod render;
pub mod scan;
pub mod store;
pub mod sync;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;

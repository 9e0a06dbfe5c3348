//! Core types and traits for the advec container workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions shared by the storage and array layers: error types,
//! the [`Element`] capability contract, and [`ArrayConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod element;
pub mod error;

pub use config::ArrayConfig;
pub use element::{Element, TransferStrategy};
pub use error::{ArrayError, ConfigError, ElementError, StorageError};

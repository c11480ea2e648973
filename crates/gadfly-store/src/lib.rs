//! Gadfly Storage Layer
//!
//! Implements the `ProfileStore` and `FactStore` traits over two pretty-printed
//! JSON documents.
//!
//! # Architecture
//!
//! - Each store owns one file and keeps the parsed document in memory
//! - The file is read lazily on first access; a missing file is an empty document
//! - Every mutating call flushes the whole document (temp file, fsync, rename)
//! - No cross-process locking: callers serialize access to the same file
//!
//! # Examples
//!
//! ```no_run
//! use gadfly_domain::traits::ProfileStore;
//! use gadfly_store::RatingStore;
//!
//! let mut store = RatingStore::open("ratings.json");
//! let profile = store.get_domain("security").unwrap();
//! assert_eq!(profile.rating, 0.0);
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod facts;
mod ratings;

pub use document::{DOCUMENT_VERSION, GraphDocument, RatingsDocument};
pub use error::StoreError;
pub use facts::KnowledgeGraph;
pub use ratings::RatingStore;

//! # Data Loader Crate
//!
//! This crate handles loading and indexing the movie catalog that every
//! recommendation strategy reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, CastMember, Favorite, Catalog)
//! - **parser**: Decode the JSON dataset into Rust structs
//! - **index**: Load, validate and query the Catalog
//! - **genres**: Genre id -> display name table
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("movies_dataset.json"))?;
//! let movie = catalog.find(603).unwrap();
//! println!("{} has {} cast entries", movie.title, movie.cast.len());
//! ```
//!
//! The catalog is immutable once loaded. Share it across threads as
//! `Arc<Catalog>`; readers never need a lock.

// Public modules
pub mod error;
pub mod genres;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use genres::GenreNames;
pub use types::{
    // Type aliases
    GenreId,
    ItemId,
    // Core types
    CastMember,
    Catalog,
    Favorite,
    Item,
    MAX_CAST_PER_ITEM,
};

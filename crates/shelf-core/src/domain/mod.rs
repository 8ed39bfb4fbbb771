//! Domain models for shelf
//!
//! `Book` is the user's own record; `CatalogRecord` is what the external
//! catalog says about a volume.

pub mod book;
pub mod catalog;

pub use book::{Book, BookPatch, NewBook};
pub use catalog::{CatalogPage, CatalogRecord, ListPrice, SearchCard};

//! Catalog sources for looking up and searching books

pub mod google_books;
pub mod traits;

pub use google_books::*;
pub use traits::*;

pub mod catalog;

pub use catalog::ContentCatalog;

pub mod extractor;
pub mod jwt;
pub mod pagination;
pub mod seed;
pub mod test_utils;

pub mod collected_document;
pub mod feed_entry;
pub mod quote;
pub mod summary;

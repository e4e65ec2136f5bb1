pub mod feed_reader;
pub mod publisher;
pub mod quote_provider;
pub mod text_generator;

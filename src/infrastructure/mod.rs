pub mod feeds;
pub mod http;
pub mod llm;
pub mod publishers;

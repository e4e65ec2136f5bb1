pub mod rss;
pub mod yahoo;

pub mod collect_headlines;
pub mod collect_quotes;
pub mod compose;
pub mod pipeline;
pub mod publish;
pub mod summarize;

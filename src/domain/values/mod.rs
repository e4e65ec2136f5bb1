pub mod lookback;
pub mod prompt;
pub mod publish_target;
pub mod stage;

pub mod core;
pub mod chatter;
pub mod trend;
pub mod prompt;
pub mod render;

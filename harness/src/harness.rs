// chanbench harness - main library exports
pub mod config;
pub mod consumer;
pub mod envelope;
pub mod messages;
pub mod producer;
pub mod report;
pub mod ticker;
pub mod variant;

// Flattened re-exports
pub use self::config::HarnessConfig;
pub use self::envelope::Envelope;
pub use self::report::RunReport;
pub use self::ticker::Ticker;
pub use self::variant::Variant;

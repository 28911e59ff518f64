//! Definition of the envelope shapes being compared

use chrono::{DateTime, Utc};

/// Payload carried by every envelope
pub type Payload = Vec<i64>;

/// Single channel message with the error as a plain field
#[derive(Debug, Default)]
pub struct ChanMsg {
    pub data: Payload,
    pub err: Option<anyhow::Error>,
}

/// Metadata carried alongside the data; `ranges` is never read
#[derive(Debug, Default)]
pub struct ChanMeta {
    pub ranges: Vec<i64>,
    pub err: Option<anyhow::Error>,
}

/// Single channel message with the metadata embedded by value
#[derive(Debug, Default)]
pub struct ChanMetaMsg {
    pub data: Payload,
    pub meta: ChanMeta,
}

/// Single channel message with the metadata behind an optional reference
#[derive(Debug, Default)]
pub struct ChanMeta2Msg {
    pub data: Payload,
    pub meta: Option<Box<ChanMeta>>,
}

/// Periodic tick, only used to occupy a wait branch
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct TickMessage {
    /// Time of tick, UTC
    pub time: DateTime<Utc>,

    /// Tick number
    pub number: u64,
}

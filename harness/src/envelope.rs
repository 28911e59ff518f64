//! Envelope trait - the one seam between the generic consumer and the
//! message shapes it is benchmarked over

use crate::messages::{ChanMeta, ChanMeta2Msg, ChanMetaMsg, ChanMsg, Payload};

/// A unit on the data queue: a payload plus, for some shapes, an error signal
pub trait Envelope: Send + 'static {
    /// Wrap a payload with no error
    fn new(data: Payload) -> Self;

    /// The payload sequence
    fn payload(&self) -> &[i64];

    /// The error signal, if set.  The consumer stops after a message for
    /// which this is `Some`
    fn error_signal(&self) -> Option<&anyhow::Error>;
}

/// Envelopes which can carry an error in-band
pub trait CarriesError: Envelope {
    fn with_error(data: Payload, err: anyhow::Error) -> Self;
}

impl Envelope for ChanMsg {
    fn new(data: Payload) -> Self {
        Self { data, err: None }
    }

    fn payload(&self) -> &[i64] {
        &self.data
    }

    fn error_signal(&self) -> Option<&anyhow::Error> {
        self.err.as_ref()
    }
}

impl CarriesError for ChanMsg {
    fn with_error(data: Payload, err: anyhow::Error) -> Self {
        Self { data, err: Some(err) }
    }
}

impl Envelope for ChanMetaMsg {
    fn new(data: Payload) -> Self {
        Self { data, meta: ChanMeta::default() }
    }

    fn payload(&self) -> &[i64] {
        &self.data
    }

    fn error_signal(&self) -> Option<&anyhow::Error> {
        self.meta.err.as_ref()
    }
}

impl CarriesError for ChanMetaMsg {
    fn with_error(data: Payload, err: anyhow::Error) -> Self {
        Self {
            data,
            meta: ChanMeta { ranges: Vec::new(), err: Some(err) },
        }
    }
}

impl Envelope for ChanMeta2Msg {
    fn new(data: Payload) -> Self {
        Self { data, meta: None }
    }

    fn payload(&self) -> &[i64] {
        &self.data
    }

    // Absent metadata means no error
    fn error_signal(&self) -> Option<&anyhow::Error> {
        self.meta.as_ref().and_then(|meta| meta.err.as_ref())
    }
}

impl CarriesError for ChanMeta2Msg {
    fn with_error(data: Payload, err: anyhow::Error) -> Self {
        Self {
            data,
            meta: Some(Box::new(ChanMeta { ranges: Vec::new(), err: Some(err) })),
        }
    }
}

/// Bare payload, as sent on the data queue of the two-channel variants;
/// errors travel on the separate completion queue
impl Envelope for Payload {
    fn new(data: Payload) -> Self {
        data
    }

    fn payload(&self) -> &[i64] {
        self
    }

    fn error_signal(&self) -> Option<&anyhow::Error> {
        None
    }
}

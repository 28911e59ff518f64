//! Result of a single benchmark run
use serde::Serialize;

/// What the consumer saw during one run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Payload messages processed
    pub messages: u64,

    /// Accumulator
    pub sum: u64,

    /// Tick events received
    pub ticks: u64,

    /// Whether the consumer stopped on an error signal rather than closure
    pub stopped_on_error: bool,
}

impl RunReport {
    /// Account for one payload.  Adds the element indices, not the values:
    /// a length-1 payload contributes nothing
    #[inline]
    pub fn absorb(&mut self, payload: &[i64]) {
        for (x, _) in payload.iter().enumerate() {
            self.sum += x as u64;
        }
        self.messages += 1;
    }

    /// Accumulator expected after `messages` payloads of `payload_len` each
    pub fn expected_sum(messages: u64, payload_len: usize) -> u64 {
        let len = payload_len as u64;
        messages * (len * len.saturating_sub(1) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_adds_indices_not_values() {
        let mut report = RunReport::default();
        report.absorb(&[100, 200, 300]);
        assert_eq!(report.sum, 3);
        assert_eq!(report.messages, 1);
    }

    #[test]
    fn single_element_payload_contributes_nothing() {
        let mut report = RunReport::default();
        for i in 0..5 {
            report.absorb(&[i]);
        }
        assert_eq!(report.messages, 5);
        assert_eq!(report.sum, 0);
    }

    #[test]
    fn expected_sum_matches_absorb() {
        let mut report = RunReport::default();
        for _ in 0..7 {
            report.absorb(&[9, 9, 9, 9]);
        }
        assert_eq!(report.sum, RunReport::expected_sum(7, 4));
        assert_eq!(RunReport::expected_sum(7, 1), 0);
        assert_eq!(RunReport::expected_sum(0, 4), 0);
    }
}

//! Producer driver - runs on the calling (timed) task
use crate::envelope::Envelope;
use crate::messages::Payload;
use anyhow::{anyhow, Result};
use tokio::sync::mpsc::Sender;

/// Send `count` envelopes, element 0 of each payload set to the loop
/// counter, then close the queue by dropping the sender.  Blocks whenever
/// the queue is full
pub async fn produce<E: Envelope>(data: Sender<E>, count: u64, payload_len: usize) -> Result<()> {
    let mut buffer: Payload = vec![0; payload_len];

    for i in 0..count {
        if let Some(head) = buffer.first_mut() {
            *head = i as i64;
        }
        data.send(E::new(buffer.clone()))
            .await
            .map_err(|_| anyhow!("Consumer closed the queue after {i} messages"))?;
    }

    drop(data);
    Ok(())
}

/// Two-channel form: payloads on `data`, then close both `data` and the
/// completion queue `done` without sending on it
pub async fn produce_split(
    data: Sender<Payload>,
    done: Sender<anyhow::Error>,
    count: u64,
    payload_len: usize,
) -> Result<()> {
    produce(data, count, payload_len).await?;
    drop(done);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ChanMsg;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn sends_counter_in_order_then_closes() {
        let (sender, mut receiver) = mpsc::channel::<ChanMsg>(16);

        produce(sender, 5, 2).await.unwrap();

        let mut heads = Vec::new();
        while let Some(message) = receiver.recv().await {
            assert_eq!(message.data.len(), 2);
            assert!(message.err.is_none());
            heads.push(message.data[0]);
        }
        assert_eq!(heads, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn zero_count_closes_immediately() {
        let (sender, mut receiver) = mpsc::channel::<ChanMsg>(1);
        produce(sender, 0, 1).await.unwrap();
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn send_to_closed_queue_fails() {
        let (sender, receiver) = mpsc::channel::<ChanMsg>(1);
        drop(receiver);

        let err = produce(sender, 3, 1).await.unwrap_err();
        assert!(err.to_string().contains("after 0 messages"));
    }

    #[tokio::test]
    async fn split_closes_completion_queue_empty() {
        let (data_tx, mut data_rx) = mpsc::channel::<Payload>(8);
        let (done_tx, mut done_rx) = mpsc::channel::<anyhow::Error>(1);

        produce_split(data_tx, done_tx, 3, 1).await.unwrap();

        assert!(done_rx.recv().await.is_none());
        let mut received = 0;
        while data_rx.recv().await.is_some() {
            received += 1;
        }
        assert_eq!(received, 3);
    }
}

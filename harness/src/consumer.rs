//! Consumer loops, one per wait shape.  Each runs as a spawned task, owns
//! its accumulator and hands it back in a RunReport when it stops
use crate::envelope::Envelope;
use crate::messages::{Payload, TickMessage};
use crate::report::RunReport;
use tokio::sync::mpsc::Receiver;

/// Single queue, no ticker.  Stops on closure, or right after a message
/// carrying an error signal
pub async fn consume<E: Envelope>(mut data: Receiver<E>) -> RunReport {
    let mut report = RunReport::default();

    while let Some(message) = data.recv().await {
        report.absorb(message.payload());
        if message.error_signal().is_some() {
            report.stopped_on_error = true;
            break;
        }
    }

    report
}

/// Single queue multiplexed with a ticker.  Ticks do no payload work
pub async fn consume_with_ticks<E: Envelope>(
    mut data: Receiver<E>,
    mut ticks: Receiver<TickMessage>,
) -> RunReport {
    let mut report = RunReport::default();

    loop {
        tokio::select! {
            message = data.recv() => match message {
                Some(message) => {
                    report.absorb(message.payload());
                    if message.error_signal().is_some() {
                        report.stopped_on_error = true;
                        break;
                    }
                }
                None => break,
            },
            Some(_) = ticks.recv() => report.ticks += 1,
        }
    }

    report
}

/// Data queue plus a separate completion queue.  Closure of the completion
/// queue ends the run; an error on it ends the run without draining
pub async fn consume_split(mut data: Receiver<Payload>, mut done: Receiver<anyhow::Error>) -> RunReport {
    let mut report = RunReport::default();

    loop {
        tokio::select! {
            payload = data.recv() => match payload {
                Some(payload) => report.absorb(&payload),
                None => break,
            },
            signal = done.recv() => {
                finish_split(&mut data, signal, &mut report);
                break;
            }
        }
    }

    report
}

/// As `consume_split`, with a ticker as a third source
pub async fn consume_split_with_ticks(
    mut data: Receiver<Payload>,
    mut done: Receiver<anyhow::Error>,
    mut ticks: Receiver<TickMessage>,
) -> RunReport {
    let mut report = RunReport::default();

    loop {
        tokio::select! {
            payload = data.recv() => match payload {
                Some(payload) => report.absorb(&payload),
                None => break,
            },
            signal = done.recv() => {
                finish_split(&mut data, signal, &mut report);
                break;
            }
            Some(_) = ticks.recv() => report.ticks += 1,
        }
    }

    report
}

// The selects above pick among ready branches at random, so the completion
// queue can win while payloads are still buffered.  Everything was sent
// before it closed, so take what is left
fn finish_split(data: &mut Receiver<Payload>, signal: Option<anyhow::Error>, report: &mut RunReport) {
    if signal.is_some() {
        report.stopped_on_error = true;
        return;
    }
    while let Ok(payload) = data.try_recv() {
        report.absorb(&payload);
    }
}

//! Bounded join over a batch of image decodes.
//!
//! Every job runs on the rayon pool. The join resolves once all jobs settle or the deadline
//! passes, whichever comes first, and reports one outcome per input slot. A job that never
//! finishes shows up as [`SlotOutcome::TimedOut`] instead of stalling the caller.

use std::{
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

use crate::{
    assets::decode::{EncodedImage, SourceImage, decode_image},
    foundation::error::FotobooResult,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SlotOutcome {
    Decoded(SourceImage),
    Failed(String),
    TimedOut,
}

impl SlotOutcome {
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Decoded(_) => None,
            Self::Failed(reason) => Some(reason.clone()),
            Self::TimedOut => Some("timed out waiting for decode".to_string()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DecodeJoin {
    outcomes: Vec<SlotOutcome>,
    elapsed: Duration,
}

impl DecodeJoin {
    pub fn outcomes(&self) -> &[SlotOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<SlotOutcome> {
        self.outcomes
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// True when every slot decoded.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(SlotOutcome::is_decoded)
    }

    /// `(slot, reason)` for every slot that did not decode.
    pub fn failures(&self) -> Vec<(usize, String)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(slot, o)| o.failure_reason().map(|r| (slot, r)))
            .collect()
    }
}

/// Decode every encoded image, waiting at most `timeout` in total.
#[tracing::instrument(skip(inputs), fields(slots = inputs.len()))]
pub fn join_decodes(inputs: &[EncodedImage], timeout: Duration) -> DecodeJoin {
    let jobs: Vec<Arc<Vec<u8>>> = inputs.iter().map(EncodedImage::shared_bytes).collect();
    join_with(jobs, timeout, |bytes| decode_image(bytes.as_slice()))
}

/// Run `job` over every input on the rayon pool and join with a deadline.
pub fn join_with<T, F>(inputs: Vec<T>, timeout: Duration, job: F) -> DecodeJoin
where
    T: Send + 'static,
    F: Fn(T) -> FotobooResult<SourceImage> + Send + Sync + 'static,
{
    let started = Instant::now();
    let slots = inputs.len();
    let job = Arc::new(job);
    let (tx, rx) = mpsc::channel();

    for (slot, input) in inputs.into_iter().enumerate() {
        let tx = tx.clone();
        let job = Arc::clone(&job);
        rayon::spawn(move || {
            let result = job(input);
            // The receiver is gone once the join gave up on this slot.
            let _ = tx.send((slot, result));
        });
    }
    drop(tx);

    let deadline = started + timeout;
    let mut outcomes: Vec<Option<SlotOutcome>> = vec![None; slots];
    let mut pending = slots;
    let mut workers_gone = false;

    while pending > 0 {
        let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
            break;
        };
        match rx.recv_timeout(remaining) {
            Ok((slot, result)) => {
                outcomes[slot] = Some(match result {
                    Ok(img) => SlotOutcome::Decoded(img),
                    Err(e) => SlotOutcome::Failed(e.to_string()),
                });
                pending -= 1;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                workers_gone = true;
                break;
            }
        }
    }

    if pending > 0 {
        tracing::warn!(pending, slots, workers_gone, "decode join settled with missing slots");
    }

    let outcomes = outcomes
        .into_iter()
        .map(|o| {
            o.unwrap_or_else(|| {
                if workers_gone {
                    SlotOutcome::Failed("decode worker exited without a result".to_string())
                } else {
                    SlotOutcome::TimedOut
                }
            })
        })
        .collect();

    DecodeJoin {
        outcomes,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/join.rs"]
mod tests;

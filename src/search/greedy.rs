use std::time::Instant;

use ndarray::{s, ArrayView3};

use crate::error::DecodeError;
use crate::hypothesis::Hypothesis;
use crate::oracle::AcousticOracle;

use super::state::{argmax, checked_log_softmax};

/// Single-hypothesis arg-max decoding. The predictor is primed once with
/// blank and advanced only when a token is emitted; the arg-max
/// log-probability is accumulated on every frame, blank included.
pub(crate) fn run<O: AcousticOracle>(
    oracle: &O,
    frames: ArrayView3<'_, f32>,
    blank: i32,
) -> Result<Vec<Hypothesis>, DecodeError> {
    let start = Instant::now();
    let vocab = oracle.vocab_size();
    let frame_count = frames.shape()[1];

    let (mut step_output, mut state) = oracle.step(blank, None)?;
    let mut score = 0.0f32;
    let mut emitted: Vec<i32> = Vec::new();

    for t in 0..frame_count {
        let frame = frames.slice(s![0, t, ..]);
        let logits = oracle.predict(frame, &step_output)?;
        let logprobs = checked_log_softmax(&logits, vocab)?;
        let (best, best_logprob) = argmax(&logprobs);
        score += best_logprob;
        if best != blank {
            let (next_output, next_state) = oracle.step(best, Some(&state))?;
            step_output = next_output;
            state = next_state;
            emitted.push(best);
        }
    }

    let mut tokens = Vec::with_capacity(emitted.len() + 2);
    tokens.push(blank);
    tokens.extend(emitted);
    tokens.push(blank);

    log::debug!(
        "greedy_search completed in {:?} (frames: {}, tokens: {})",
        start.elapsed(),
        frame_count,
        tokens.len() - 2
    );

    Ok(vec![Hypothesis { score, tokens }])
}

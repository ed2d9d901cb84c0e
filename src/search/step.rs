use std::sync::Arc;

use ndarray::ArrayView1;

use crate::error::DecodeError;
use crate::oracle::{AcousticOracle, LanguageOracle};

use super::state::{checked_log_softmax, log_softmax, top_emissions, Node};

/// Successor ingredients for one popped hypothesis at one frame.
pub(crate) struct StepOutcome<S, L> {
    /// Log-probability of blank, taken before fusion.
    pub blank_logprob: f32,
    /// Emission candidates (token, fused log-probability), best first.
    pub emissions: Vec<(i32, f32)>,
    /// Predictor state after stepping on the hypothesis's last token.
    pub stepped_state: Arc<S>,
    /// LM state advanced alongside, present only when fusion ran.
    pub lm_state: Option<Arc<L>>,
}

/// One acoustic round-trip for `node` at frame `t`: step the predictor,
/// score the frame, fuse the LM when enabled, rank emission candidates.
pub(crate) fn expand<O, L>(
    oracle: &O,
    fusion: Option<(&L, f32)>,
    node: &Node<O::State, L::State>,
    frame: ArrayView1<'_, f32>,
    t: usize,
    blank: i32,
    beam: usize,
) -> Result<StepOutcome<O::State, L::State>, DecodeError>
where
    O: AcousticOracle,
    L: LanguageOracle,
{
    let vocab = oracle.vocab_size();
    let last = node.last_token(blank);

    let (step_output, stepped_state) = oracle.step(last, node.acoustic_state.as_deref())?;
    let logits = oracle.predict(frame, &step_output)?;
    let mut logprobs = checked_log_softmax(&logits, vocab)?;

    let blank_logprob = logprobs[blank as usize];

    let mut lm_state = None;
    if let Some((lm, lm_weight)) = fusion {
        if t > 0 {
            let (lm_logits, lm_next) = lm.forward(last, node.lm_state.as_deref())?;
            if lm_logits.len() + 1 < vocab {
                return Err(DecodeError::ShortScores {
                    got: lm_logits.len(),
                    expected: vocab - 1,
                });
            }
            let lm_logprobs = log_softmax(lm_logits.view());
            for i in 0..vocab - 1 {
                logprobs[i] += lm_weight * lm_logprobs[i];
            }
            lm_state = Some(Arc::new(lm_next));
        }
    }

    Ok(StepOutcome {
        blank_logprob,
        emissions: top_emissions(&logprobs, blank, beam),
        stepped_state: Arc::new(stepped_state),
        lm_state,
    })
}

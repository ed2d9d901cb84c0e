use std::mem;
use std::time::{Duration, Instant};

use ndarray::{s, ArrayView3};

use crate::config::BeamSearchConfig;
use crate::error::DecodeError;
use crate::hypothesis::Hypothesis;
use crate::oracle::{AcousticOracle, LanguageOracle};

use super::nbest;
use super::state::{Frontier, Node};
use super::step;

/// Time-synchronous best-first search. Each frame pops up to `beam`
/// hypotheses from the current frontier; every pop contributes one blank
/// successor to the next frame's frontier and up to `beam` emit successors
/// back into the current one.
pub(crate) fn run<O, L>(
    oracle: &O,
    fusion: Option<(&L, f32)>,
    frames: ArrayView3<'_, f32>,
    config: &BeamSearchConfig,
) -> Result<Vec<Hypothesis>, DecodeError>
where
    O: AcousticOracle,
    L: LanguageOracle,
{
    let start = Instant::now();
    let beam = config.beam;
    let blank = config.blank;
    let frame_count = frames.shape()[1];

    let nbest_count = config.nbest.min(beam);
    if nbest_count < config.nbest {
        log::debug!(
            "Clamping nbest from {} to beam width {}",
            config.nbest,
            beam
        );
    }

    let mut next = Frontier::new();
    next.push(Node::root(blank));

    for t in 0..frame_count {
        if let Some(budget_ms) = config.deadline_ms {
            if start.elapsed() >= Duration::from_millis(budget_ms) {
                return Err(DecodeError::DeadlineExceeded {
                    frame: t,
                    budget_ms,
                });
            }
        }

        let frame = frames.slice(s![0, t, ..]);
        let mut current = mem::replace(&mut next, Frontier::new());

        for _ in 0..beam {
            let Some(node) = current.pop_best() else {
                break;
            };
            let outcome = step::expand(oracle, fusion, &node, frame, t, blank, beam)?;

            // Blank advances to the next frame on the parent's pre-step state.
            next.push(Node {
                score: node.score + outcome.blank_logprob,
                tokens: node.tokens.clone(),
                acoustic_state: node.acoustic_state.clone(),
                lm_state: node.lm_state.clone(),
            });

            // Emissions stay on this frame for further expansion.
            for &(token, logprob) in &outcome.emissions {
                let mut tokens = node.tokens.clone();
                tokens.push(token);
                current.push(Node {
                    score: node.score + logprob,
                    tokens,
                    acoustic_state: Some(outcome.stepped_state.clone()),
                    lm_state: outcome.lm_state.clone().or_else(|| node.lm_state.clone()),
                });
            }
        }
    }

    log::debug!(
        "beam_search completed in {:?} (frames: {}, beam: {}, terminal: {})",
        start.elapsed(),
        frame_count,
        beam,
        next.len()
    );

    Ok(nbest::extract(next, nbest_count, config.normalized, blank))
}

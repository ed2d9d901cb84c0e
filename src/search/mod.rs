use ndarray::ArrayView3;

use crate::config::BeamSearchConfig;
use crate::error::DecodeError;
use crate::hypothesis::Hypothesis;
use crate::oracle::{AcousticOracle, LanguageOracle, NoFusion};

pub(crate) mod beam;
pub(crate) mod greedy;
pub(crate) mod nbest;
pub(crate) mod state;
pub(crate) mod step;

/// Greedy decoding over a (1, T, D) frame tensor. Returns exactly one
/// hypothesis whose tokens start and end with `blank`.
pub fn greedy_search<O>(
    oracle: &O,
    frames: ArrayView3<'_, f32>,
    blank: i32,
) -> Result<Vec<Hypothesis>, DecodeError>
where
    O: AcousticOracle,
{
    validate(oracle, &frames, blank, None)?;
    greedy::run(oracle, frames, blank)
}

/// Time-synchronous best-first beam search over a (1, T, D) frame tensor.
/// Returns up to `min(config.beam, config.nbest)` hypotheses, best first.
pub fn beam_search<O>(
    oracle: &O,
    frames: ArrayView3<'_, f32>,
    config: &BeamSearchConfig,
) -> Result<Vec<Hypothesis>, DecodeError>
where
    O: AcousticOracle,
{
    validate(oracle, &frames, config.blank, Some(config.beam))?;
    beam::run(oracle, None::<(&NoFusion, f32)>, frames, config)
}

/// Beam search with shallow fusion: from the second frame on, weighted LM
/// log-probabilities are added to the non-blank entries before emission
/// candidates are ranked. Requires the blank id at the final vocabulary
/// index and an LM vocabulary at least as large as the acoustic one.
pub fn beam_search_with_lm<O, L>(
    oracle: &O,
    lm: &L,
    frames: ArrayView3<'_, f32>,
    config: &BeamSearchConfig,
) -> Result<Vec<Hypothesis>, DecodeError>
where
    O: AcousticOracle,
    L: LanguageOracle,
{
    validate(oracle, &frames, config.blank, Some(config.beam))?;
    validate_fusion(oracle, lm, config.blank)?;
    beam::run(oracle, Some((lm, config.lm_weight)), frames, config)
}

fn validate<O: AcousticOracle>(
    oracle: &O,
    frames: &ArrayView3<'_, f32>,
    blank: i32,
    beam: Option<usize>,
) -> Result<(), DecodeError> {
    if blank < 0 {
        return Err(DecodeError::InvalidBlank(blank));
    }
    let batch = frames.shape()[0];
    if batch != 1 {
        return Err(DecodeError::BatchSize(batch));
    }
    let vocab = oracle.vocab_size();
    if blank as usize >= vocab {
        return Err(DecodeError::BlankOutOfRange { blank, vocab });
    }
    if let Some(beam) = beam {
        if beam > vocab {
            return Err(DecodeError::BeamWidth { beam, vocab });
        }
    }
    Ok(())
}

fn validate_fusion<O, L>(oracle: &O, lm: &L, blank: i32) -> Result<(), DecodeError>
where
    O: AcousticOracle,
    L: LanguageOracle,
{
    let acoustic = oracle.vocab_size();
    let lm_vocab = lm.vocab_size();
    if lm_vocab < acoustic {
        return Err(DecodeError::LmVocabulary {
            lm: lm_vocab,
            acoustic,
        });
    }
    if blank as usize != acoustic - 1 {
        return Err(DecodeError::BlankNotLast {
            blank,
            vocab: acoustic,
        });
    }
    Ok(())
}

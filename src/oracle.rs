use ndarray::{Array1, ArrayView1};

/// Errors surfaced by an oracle are propagated through the decode unchanged.
pub type OracleError = Box<dyn std::error::Error + Send + Sync>;

/// The acoustic side of a transducer model: the autoregressive predictor
/// plus the joint network, treated as a black box by the search.
///
/// `step` advances the predictor by one token; `None` state means the
/// initial state. `predict` combines one encoder frame with the predictor
/// output and returns unnormalized logits over the vocabulary.
pub trait AcousticOracle {
    /// Recurrent predictor state. Immutable once returned; the search shares
    /// snapshots between sibling hypotheses.
    type State;
    /// Predictor output consumed by `predict`.
    type Output;

    fn vocab_size(&self) -> usize;

    fn step(
        &self,
        token: i32,
        state: Option<&Self::State>,
    ) -> Result<(Self::Output, Self::State), OracleError>;

    fn predict(
        &self,
        frame: ArrayView1<'_, f32>,
        step_output: &Self::Output,
    ) -> Result<Array1<f32>, OracleError>;
}

/// An external language model used for shallow fusion during beam search.
///
/// Its vocabulary must be at least as large as the acoustic one, and the
/// blank id must sit at the final acoustic vocabulary index when fusion is
/// requested.
pub trait LanguageOracle {
    type State;

    fn vocab_size(&self) -> usize;

    fn forward(
        &self,
        token: i32,
        state: Option<&Self::State>,
    ) -> Result<(Array1<f32>, Self::State), OracleError>;
}

/// Null language model for the fusion-free beam path. Never consulted.
pub(crate) struct NoFusion;

impl LanguageOracle for NoFusion {
    type State = ();

    fn vocab_size(&self) -> usize {
        usize::MAX
    }

    fn forward(
        &self,
        _token: i32,
        _state: Option<&()>,
    ) -> Result<(Array1<f32>, ()), OracleError> {
        Err("no language model attached".into())
    }
}

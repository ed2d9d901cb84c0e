use crate::oracle::OracleError;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("Invalid blank id: {0}")]
    InvalidBlank(i32),
    #[error("Blank id {blank} outside vocabulary of size {vocab}")]
    BlankOutOfRange { blank: i32, vocab: usize },
    #[error("Got batch size {0}, only one utterance is supported")]
    BatchSize(usize),
    #[error("Beam size ({beam}) > vocabulary size ({vocab})")]
    BeamWidth { beam: usize, vocab: usize },
    #[error("LM vocabulary ({lm}) smaller than acoustic vocabulary ({acoustic}), seems a different dictionary is used")]
    LmVocabulary { lm: usize, acoustic: usize },
    #[error("Shallow fusion requires blank at the last vocabulary index, got blank {blank} with vocabulary size {vocab}")]
    BlankNotLast { blank: i32, vocab: usize },
    #[error("Decode exceeded its {budget_ms} ms budget at frame {frame}")]
    DeadlineExceeded { frame: usize, budget_ms: u64 },
    #[error("Oracle produced {got} scores, expected at least {expected}")]
    ShortScores { got: usize, expected: usize },
    #[error("Oracle failure: {0}")]
    Oracle(#[from] OracleError),
}

/// Coarse class of a `DecodeError`, for callers that branch on the failure
/// class rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any search work began.
    InvalidArgument,
    /// Oracles and parameters do not fit together.
    ConfigMismatch,
    /// The optional wall-clock budget ran out.
    DeadlineExceeded,
    /// An oracle failed or broke its contract mid-search.
    Oracle,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBlank(_)
            | Self::BlankOutOfRange { .. }
            | Self::BatchSize(_)
            | Self::BeamWidth { .. } => ErrorKind::InvalidArgument,
            Self::LmVocabulary { .. } | Self::BlankNotLast { .. } => ErrorKind::ConfigMismatch,
            Self::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
            Self::ShortScores { .. } | Self::Oracle(_) => ErrorKind::Oracle,
        }
    }
}

pub mod config;
pub mod error;
pub mod hypothesis;
pub mod oracle;
pub mod search;
pub mod vocab;

pub use config::BeamSearchConfig;
pub use error::{DecodeError, ErrorKind};
pub use hypothesis::Hypothesis;
pub use oracle::{AcousticOracle, LanguageOracle, OracleError};
pub use search::{beam_search, beam_search_with_lm, greedy_search};
pub use vocab::Vocabulary;

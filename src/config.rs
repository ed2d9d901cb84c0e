use serde::{Deserialize, Serialize};

/// Knobs for `beam_search` / `beam_search_with_lm`. Defaults follow the
/// usual transducer inference settings; every field can be overridden from
/// the environment via `from_env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamSearchConfig {
    /// Number of hypotheses expanded per frame.
    pub beam: usize,
    /// Blank token id.
    pub blank: i32,
    /// How many ranked hypotheses to return. Clamped to `beam`.
    pub nbest: usize,
    /// Rank by score divided by emitted length instead of raw score.
    pub normalized: bool,
    /// Weight applied to the language-model log-probabilities during fusion.
    pub lm_weight: f32,
    /// Optional wall-clock budget for one decode, checked once per frame.
    pub deadline_ms: Option<u64>,
}

impl Default for BeamSearchConfig {
    fn default() -> Self {
        Self {
            beam: 16,
            blank: 0,
            nbest: 8,
            normalized: true,
            lm_weight: 0.0,
            deadline_ms: None,
        }
    }
}

impl BeamSearchConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides("RNNT_");
        config
    }

    fn apply_env_overrides(&mut self, prefix: &str) {
        let parse_env = |suffix: &str| std::env::var(format!("{prefix}{suffix}")).ok();

        if let Some(v) = parse_env("BEAM").and_then(|s| s.parse::<usize>().ok()) {
            self.beam = v;
        }
        if let Some(v) = parse_env("BLANK").and_then(|s| s.parse::<i32>().ok()) {
            self.blank = v;
        }
        if let Some(v) = parse_env("NBEST").and_then(|s| s.parse::<usize>().ok()) {
            self.nbest = v;
        }
        if let Some(v) = parse_env("NORMALIZED").and_then(|s| s.parse::<bool>().ok()) {
            self.normalized = v;
        }
        if let Some(v) = parse_env("LM_WEIGHT").and_then(|s| s.parse::<f32>().ok()) {
            self.lm_weight = v;
        }
        if let Some(v) = parse_env("DEADLINE_MS").and_then(|s| s.parse::<u64>().ok()) {
            self.deadline_ms = Some(v);
        }
    }
}

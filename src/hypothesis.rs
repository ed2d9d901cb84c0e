use serde::Serialize;

/// One ranked decode result. `tokens` starts and ends with the blank
/// sentinel; `score` is the raw cumulative log-probability, even when the
/// ranking used length normalization.
#[derive(Debug, Clone, Serialize)]
pub struct Hypothesis {
    pub score: f32,
    pub tokens: Vec<i32>,
}

impl Hypothesis {
    /// The emitted tokens with the boundary sentinels stripped.
    pub fn emitted(&self) -> &[i32] {
        if self.tokens.len() < 2 {
            &[]
        } else {
            &self.tokens[1..self.tokens.len() - 1]
        }
    }
}

use crate::hypothesis::Hypothesis;

use super::state::{Frontier, Node};

/// Materialize the terminal frontier: append the trailing blank, rank by
/// raw or length-normalized score, keep the best `nbest`. Reported scores
/// stay raw; the normalized key only orders the list.
pub(crate) fn extract<S, L>(
    frontier: Frontier<S, L>,
    nbest: usize,
    normalized: bool,
    blank: i32,
) -> Vec<Hypothesis> {
    let mut ranked: Vec<Hypothesis> = frontier
        .into_nodes()
        .into_iter()
        .map(|node| finish(node, blank))
        .collect();
    ranked.sort_by(|a, b| ranking_key(b, normalized).total_cmp(&ranking_key(a, normalized)));
    ranked.truncate(nbest);
    ranked
}

fn finish<S, L>(node: Node<S, L>, blank: i32) -> Hypothesis {
    let mut tokens = node.tokens;
    tokens.push(blank);
    Hypothesis {
        score: node.score,
        tokens,
    }
}

/// Length normalization divides by the emitted count plus one boundary
/// sentinel, so the sentinel-only hypothesis divides by one.
fn ranking_key(hyp: &Hypothesis, normalized: bool) -> f32 {
    if normalized {
        hyp.score / hyp.tokens.len().saturating_sub(1).max(1) as f32
    } else {
        hyp.score
    }
}

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use ndarray::{s, Array1, ArrayView1};

use crate::error::DecodeError;

/// One partial transcription hypothesis during search. `tokens` always
/// starts with the blank sentinel. States are immutable snapshots, shared
/// with successors by reference count; `None` means the oracle's initial
/// state.
pub(crate) struct Node<S, L> {
    pub score: f32,
    pub tokens: Vec<i32>,
    pub acoustic_state: Option<Arc<S>>,
    pub lm_state: Option<Arc<L>>,
}

impl<S, L> Node<S, L> {
    pub fn root(blank: i32) -> Self {
        Self {
            score: 0.0,
            tokens: vec![blank],
            acoustic_state: None,
            lm_state: None,
        }
    }

    pub fn last_token(&self, blank: i32) -> i32 {
        self.tokens.last().copied().unwrap_or(blank)
    }
}

impl<S, L> PartialEq for Node<S, L> {
    fn eq(&self, other: &Self) -> bool {
        self.score.total_cmp(&other.score) == Ordering::Equal
    }
}

impl<S, L> Eq for Node<S, L> {}

impl<S, L> PartialOrd for Node<S, L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, L> Ord for Node<S, L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score)
    }
}

/// Score-ordered hypothesis frontier; extraction returns the best first.
/// Ties share a score class under `total_cmp`, heap order decides.
pub(crate) struct Frontier<S, L> {
    heap: BinaryHeap<Node<S, L>>,
}

impl<S, L> Frontier<S, L> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, node: Node<S, L>) {
        self.heap.push(node);
    }

    pub fn pop_best(&mut self) -> Option<Node<S, L>> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn into_nodes(self) -> Vec<Node<S, L>> {
        self.heap.into_vec()
    }
}

/// Log-softmax by the usual max-shifted log-sum-exp.
pub(crate) fn log_softmax(logits: ArrayView1<'_, f32>) -> Array1<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let log_sum = logits
        .iter()
        .map(|&l| (l - max).exp())
        .sum::<f32>()
        .ln();
    logits.mapv(|l| l - max - log_sum)
}

/// Normalize the leading `vocab` entries of an oracle score vector. Vectors
/// too short to cover the vocabulary are rejected, longer ones truncated.
pub(crate) fn checked_log_softmax(
    logits: &Array1<f32>,
    vocab: usize,
) -> Result<Array1<f32>, DecodeError> {
    if logits.len() < vocab {
        return Err(DecodeError::ShortScores {
            got: logits.len(),
            expected: vocab,
        });
    }
    Ok(log_softmax(logits.slice(s![..vocab])))
}

/// Best (token, log-probability) pair of a score vector. The first maximal
/// entry wins.
pub(crate) fn argmax(logprobs: &Array1<f32>) -> (i32, f32) {
    let mut best = (0i32, f32::NEG_INFINITY);
    for (i, &lp) in logprobs.iter().enumerate() {
        if lp.total_cmp(&best.1) == Ordering::Greater {
            best = (i as i32, lp);
        }
    }
    best
}

/// Top emission candidates: the best `beam + 1` entries with blank skipped,
/// capped at `beam`, so a highly ranked blank cannot starve the emit
/// branches.
pub(crate) fn top_emissions(logprobs: &Array1<f32>, blank: i32, beam: usize) -> Vec<(i32, f32)> {
    let mut ranked: Vec<(i32, f32)> = logprobs
        .iter()
        .enumerate()
        .map(|(i, &lp)| (i as i32, lp))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(beam + 1);
    ranked.retain(|(token, _)| *token != blank);
    ranked.truncate(beam);
    ranked
}

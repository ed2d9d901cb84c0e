#![allow(dead_code)]

use std::cell::Cell;

use ndarray::{array, Array1, Array3, ArrayView1};
use rnnt_decode::{AcousticOracle, LanguageOracle, OracleError};

/// Acoustic oracle whose joint network echoes the encoder frame as logits,
/// so a test scripts the whole search by choosing frame contents. The
/// predictor state counts how often it was advanced.
pub struct ScriptedOracle {
    vocab: usize,
}

impl ScriptedOracle {
    pub fn new(vocab: usize) -> Self {
        Self { vocab }
    }
}

impl AcousticOracle for ScriptedOracle {
    type State = u32;
    type Output = u32;

    fn vocab_size(&self) -> usize {
        self.vocab
    }

    fn step(&self, _token: i32, state: Option<&u32>) -> Result<(u32, u32), OracleError> {
        let depth = state.copied().unwrap_or(0) + 1;
        Ok((depth, depth))
    }

    fn predict(
        &self,
        frame: ArrayView1<'_, f32>,
        _output: &u32,
    ) -> Result<Array1<f32>, OracleError> {
        Ok(frame.to_owned())
    }
}

/// Oracle whose scores flip once the predictor has been advanced past its
/// first step, exposing which state snapshot a successor carried.
pub struct DepthOracle;

impl AcousticOracle for DepthOracle {
    type State = u32;
    type Output = u32;

    fn vocab_size(&self) -> usize {
        2
    }

    fn step(&self, _token: i32, state: Option<&u32>) -> Result<(u32, u32), OracleError> {
        let depth = state.copied().unwrap_or(0) + 1;
        Ok((depth, depth))
    }

    fn predict(
        &self,
        _frame: ArrayView1<'_, f32>,
        output: &u32,
    ) -> Result<Array1<f32>, OracleError> {
        if *output == 1 {
            Ok(array![0.0, -10.0])
        } else {
            Ok(array![-10.0, 0.0])
        }
    }
}

/// Language model returning one fixed logit vector; counts its calls.
pub struct ScriptedLm {
    vocab: usize,
    logits: Vec<f32>,
    pub calls: Cell<usize>,
}

impl ScriptedLm {
    pub fn new(vocab: usize, logits: Vec<f32>) -> Self {
        Self {
            vocab,
            logits,
            calls: Cell::new(0),
        }
    }
}

impl LanguageOracle for ScriptedLm {
    type State = u32;

    fn vocab_size(&self) -> usize {
        self.vocab
    }

    fn forward(&self, _token: i32, state: Option<&u32>) -> Result<(Array1<f32>, u32), OracleError> {
        self.calls.set(self.calls.get() + 1);
        Ok((
            Array1::from_vec(self.logits.clone()),
            state.copied().unwrap_or(0) + 1,
        ))
    }
}

/// Oracle whose joint network always fails.
pub struct FailingOracle;

impl AcousticOracle for FailingOracle {
    type State = ();
    type Output = ();

    fn vocab_size(&self) -> usize {
        3
    }

    fn step(&self, _token: i32, _state: Option<&()>) -> Result<((), ()), OracleError> {
        Ok(((), ()))
    }

    fn predict(
        &self,
        _frame: ArrayView1<'_, f32>,
        _output: &(),
    ) -> Result<Array1<f32>, OracleError> {
        Err("joint network exploded".into())
    }
}

/// Oracle declaring a larger vocabulary than its joint network covers.
pub struct ShortOracle;

impl AcousticOracle for ShortOracle {
    type State = ();
    type Output = ();

    fn vocab_size(&self) -> usize {
        5
    }

    fn step(&self, _token: i32, _state: Option<&()>) -> Result<((), ()), OracleError> {
        Ok(((), ()))
    }

    fn predict(
        &self,
        _frame: ArrayView1<'_, f32>,
        _output: &(),
    ) -> Result<Array1<f32>, OracleError> {
        Ok(array![0.0, -1.0, -2.0])
    }
}

/// Build a (1, T, D) frame tensor from per-frame rows.
pub fn frames(rows: &[&[f32]]) -> Array3<f32> {
    let t = rows.len();
    let d = rows.first().map_or(0, |r| r.len());
    let mut arr = Array3::zeros((1, t, d));
    for (i, row) in rows.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            arr[[0, i, j]] = v;
        }
    }
    arr
}

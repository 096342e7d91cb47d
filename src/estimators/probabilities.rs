// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;
use std::ops::Index;

use crate::error::{Error, Result};

/// Probability mass function over a finite set of outcomes.
///
/// Values are non-negative, finite and sum to one. Construction renormalises
/// any non-negative vector with a positive total.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    p: Array1<f64>,
}

impl Probabilities {
    pub fn new(values: Array1<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::InvalidProbabilities("no outcomes".to_string()));
        }
        if let Some(i) = values.iter().position(|&v| !(v.is_finite() && v >= 0.0)) {
            return Err(Error::InvalidProbabilities(format!(
                "entry {i} is negative or not finite ({})",
                values[i]
            )));
        }
        let total = values.sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(Error::InvalidProbabilities(format!(
                "total mass must be positive and finite (got {total})"
            )));
        }
        let p = if total == 1.0 { values } else { values / total };
        Ok(Self { p })
    }

    /// Relative frequencies of a set of counts.
    pub fn from_counts(counts: &[usize]) -> Result<Self> {
        Self::new(counts.iter().map(|&c| c as f64).collect())
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.p
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.p
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.p.iter()
    }

    /// Shannon entropy in nats, with `0 ln 0 = 0`.
    pub fn shannon_entropy(&self) -> f64 {
        -self
            .p
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.ln())
            .sum::<f64>()
    }
}

impl Index<usize> for Probabilities {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.p[i]
    }
}

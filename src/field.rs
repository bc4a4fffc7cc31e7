//! Periodic scalar field over geodesic distances.

use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::warn;

use crate::F;
use crate::dijkstra::DistanceMap;
use crate::error::{FieldError, Result};

/// What to emit for a vertex with no path from the source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UnreachablePolicy {
    /// Abort generation with [`FieldError::UnreachableVertex`].
    #[default]
    Fail,
    /// Emit `0.0`.
    Zero,
    /// Emit the given value, e.g. `F::NAN`.
    Sentinel(F),
}

/// Parameters of `amplitude * sin(d * angular_frequency + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub amplitude: F,
    pub angular_frequency: F,
    pub phase: F,
    pub unreachable: UnreachablePolicy,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            amplitude: 2.,
            angular_frequency: 2. * PI / 0.3 * 2.,
            phase: 0.3,
            unreachable: UnreachablePolicy::Fail,
        }
    }
}

impl FieldParams {
    pub fn with_amplitude(mut self, amplitude: F) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_angular_frequency(mut self, angular_frequency: F) -> Self {
        self.angular_frequency = angular_frequency;
        self
    }

    pub fn with_phase(mut self, phase: F) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_unreachable(mut self, policy: UnreachablePolicy) -> Self {
        self.unreachable = policy;
        self
    }

    /// Evaluate the periodic transform at distance `d`.
    #[inline]
    pub fn eval(&self, d: F) -> F {
        self.amplitude * (d * self.angular_frequency + self.phase).sin()
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("amplitude", self.amplitude),
            ("angular_frequency", self.angular_frequency),
            ("phase", self.phase),
        ] {
            if !value.is_finite() {
                return Err(FieldError::invalid_param(name, value, "must be finite"));
            }
        }
        Ok(())
    }
}

/// One value per vertex, in vertex-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    values: Vec<F>,
}

impl ScalarField {
    pub fn from_values(values: Vec<F>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn values(&self) -> &[F] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<F> {
        self.values
    }
}

/// Map every vertex distance through [`FieldParams::eval`].
///
/// `n` must match the vertex count the distances were computed over.
/// Unreachable vertices are handled by `params.unreachable`.
pub fn generate_field(distances: &DistanceMap, n: usize, params: &FieldParams) -> Result<ScalarField> {
    if n != distances.len() {
        return Err(FieldError::invalid_param(
            "n",
            n,
            "must equal the number of vertices in the distance map",
        ));
    }
    params.validate()?;

    let substitute = match params.unreachable {
        UnreachablePolicy::Fail => {
            if let Some(vertex) = distances.unreachable().next() {
                return Err(FieldError::UnreachableVertex { vertex });
            }
            0.
        }
        UnreachablePolicy::Zero => 0.,
        UnreachablePolicy::Sentinel(v) => v,
    };

    let unreachable = n - distances.reachable_count();
    if unreachable > 0 {
        warn!(
            unreachable,
            value = substitute,
            "substituting value for vertices unreachable from source {}",
            distances.source()
        );
    }

    let values = (0..n)
        .into_par_iter()
        .map(|i| distances.distance(i).map_or(substitute, |d| params.eval(d)))
        .collect();

    Ok(ScalarField { values })
}

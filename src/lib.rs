//! Periodic scalar fields over approximate geodesic distance on triangle meshes.
//!
//! The pipeline is split into independent stages:
//!
//! ```text
//! Mesh -> AdjacencyGraph -> DistanceMap -> ScalarField -> text
//! ```
//!
//! ```
//! use geodesic_field::{Mesh, FieldParams, run_pipeline, output::to_bytes};
//!
//! let mesh = Mesh::new(
//!     vec![[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]],
//!     vec![[0, 1, 2]],
//! ).unwrap();
//! let field = run_pipeline(&mesh, 0, &FieldParams::default()).unwrap();
//! assert_eq!(field.len(), 3);
//! assert_eq!(to_bytes(&field).unwrap().iter().filter(|&&b| b == b'\n').count(), 3);
//! ```

use clap::{Parser, ValueEnum};
use tracing::Level;

pub mod dijkstra;
pub mod error;
pub mod field;
pub mod graph;
pub mod mesh;
pub mod output;

pub use dijkstra::{DistanceMap, shortest_paths};
pub use error::{FieldError, Result};
pub use field::{FieldParams, ScalarField, UnreachablePolicy, generate_field};
pub use graph::AdjacencyGraph;
pub use mesh::Mesh;

pub type F = f64;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to input mesh
    #[arg(short, long, required = true)]
    pub input: String,

    /// Index of source vertex.
    #[arg(short, long, default_value_t = 0)]
    pub src_idx: usize,

    /// Path to scalar field output, one value per line.
    #[arg(short, long, default_value = "ground_truth.csv")]
    pub output: String,

    /// Amplitude of the sine.
    #[arg(long, default_value_t = 2., allow_negative_numbers = true)]
    pub amplitude: F,

    /// Angular frequency applied to distance. Defaults to 2π / 0.3 × 2.
    #[arg(long, allow_negative_numbers = true)]
    pub frequency: Option<F>,

    /// Phase offset in radians.
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub phase: F,

    /// Value written for vertices with no path from the source.
    #[arg(long, value_enum, default_value_t = Unreachable::Fail)]
    pub unreachable: Unreachable,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: Level,
}

/// CLI spelling of [`UnreachablePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Unreachable {
    /// Abort without writing anything.
    Fail,
    /// Write 0.
    Zero,
    /// Write NaN.
    Nan,
}

impl Args {
    pub fn field_params(&self) -> FieldParams {
        let mut params = FieldParams::default()
            .with_amplitude(self.amplitude)
            .with_phase(self.phase)
            .with_unreachable(match self.unreachable {
                Unreachable::Fail => UnreachablePolicy::Fail,
                Unreachable::Zero => UnreachablePolicy::Zero,
                Unreachable::Nan => UnreachablePolicy::Sentinel(F::NAN),
            });
        if let Some(f) = self.frequency {
            params = params.with_angular_frequency(f);
        }
        params
    }
}

/// Run every stage on `mesh`: graph, shortest paths from `source`, field.
pub fn run_pipeline(mesh: &Mesh, source: usize, params: &FieldParams) -> Result<ScalarField> {
    let graph = AdjacencyGraph::from_mesh(mesh);
    let dists = shortest_paths(&graph, source)?;
    generate_field(&dists, graph.vertex_count(), params)
}

pub fn sub<const N: usize>(a: [F; N], b: [F; N]) -> [F; N] {
    std::array::from_fn(|i| a[i] - b[i])
}

pub fn length_sq<const N: usize>(v: [F; N]) -> F {
    v.into_iter().map(|a| a * a).sum::<F>()
}

/// Euclidean distance, scaled by the largest coordinate so squaring cannot overflow.
pub fn dist<const N: usize>(a: [F; N], b: [F; N]) -> F {
    let scale = a.iter().chain(&b).fold(0., |m: F, c| m.max(c.abs()));
    if scale == 0. || !scale.is_finite() {
        return dist_sq(a, b).sqrt();
    }
    let inv = scale.recip();
    dist_sq(a.map(|c| c * inv), b.map(|c| c * inv)).sqrt() * scale
}

pub fn dist_sq<const N: usize>(a: [F; N], b: [F; N]) -> F {
    length_sq(sub(a, b))
}

use anyhow::{Context, anyhow};
use clap::Parser;
use geodesic_field::{Args, F, Mesh, output, run_pipeline};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let scene = pars3d::load(&args.input)
        .map_err(|e| anyhow!("{e:?}"))
        .with_context(|| format!("failed to load mesh from {}", args.input))?;
    let raw = scene.into_flattened_mesh();

    let vertices: Vec<[F; 3]> = raw.v.iter().map(|&[x, y, z]| [x as F, y as F, z as F]).collect();
    let polygons: Vec<&[usize]> = raw.f.iter().map(|f| f.as_slice()).collect();
    let mesh = Mesh::from_polygons(vertices, &polygons).context("invalid mesh")?;
    info!(
        vertices = mesh.num_vertices(),
        triangles = mesh.num_faces(),
        "loaded {}",
        args.input
    );

    let field = run_pipeline(&mesh, args.src_idx, &args.field_params())
        .context("failed to generate scalar field")?;
    output::save_field(&field, &args.output)
        .with_context(|| format!("failed to write {}", args.output))?;

    info!(values = field.len(), "wrote {}", args.output);
    Ok(())
}

use anyhow::{Context, Result};

mod cli;
mod colormap;
mod config;
mod display;
mod error;
mod figure;
mod io;
mod mesh;
mod plot;
mod series;

use cli::get_args;
use colormap::ColorMap;
use config::PlotConfig;
use figure::{SpatialFigure, TimeSeriesFigure};
use io::ProjectPaths;
use io::mesh::read_mesh;
use io::output::read_output;
use plot::{SpatialPlot, TimeSeriesPlot, render};

fn main() -> Result<()> {
    let args = get_args();
    let config = PlotConfig::load(args.config.as_deref())?;
    let paths = ProjectPaths::new(&args.root, &args.project, &args.run);

    // Mesh is needed to place the field in space
    println!("Reading mesh...");
    let mesh_file = paths.mesh_file();
    let mesh = read_mesh(&mesh_file)
        .with_context(|| format!("Failed to read mesh: {:?}", mesh_file))?;

    let series = read_output(&paths, &args.var, args.location, &mesh).with_context(|| {
        format!(
            "Failed to read '{}' output of run {} in {:?}",
            args.var, args.run, paths.output_dir
        )
    })?;

    let spatial = SpatialFigure::prepare(&mesh, &series, &config)?;
    let temporal = TimeSeriesFigure::prepare(&series)?;

    println!("\nPlot Configuration:");
    println!("  Variable: {} ({})", series.name(), series.unit());
    println!("  Mesh: {} nodes, {} elements", mesh.node_count(), mesh.triangle_count());
    println!("  Timesteps: {}", series.timestep_count());
    println!(
        "  Domain aspect ratio: {:.3} ({:?} colour bar)",
        spatial.aspect_ratio, spatial.layout
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", args.out_dir))?;
    let ext = args.format.extension();
    let spatial_path = args
        .out_dir
        .join(format!("{}.{}.spatial.{}", args.project, args.var, ext));
    let temporal_path = args
        .out_dir
        .join(format!("{}.{}.timeseries.{}", args.project, args.var, ext));

    let cmap = ColorMap::from_config(&config);
    render(
        &SpatialPlot {
            mesh: &mesh,
            figure: &spatial,
            cmap: &cmap,
            config: &config,
        },
        &spatial_path,
        args.format,
        &config,
    )
    .context("Failed to render spatial figure")?;
    render(
        &TimeSeriesPlot {
            figure: &temporal,
            config: &config,
        },
        &temporal_path,
        args.format,
        &config,
    )
    .context("Failed to render time series figure")?;

    if let Some(csv_path) = &args.export_csv {
        io::csv::write_spatial_average(csv_path, &temporal)
            .with_context(|| format!("Failed to write CSV: {:?}", csv_path))?;
    }

    if !args.no_show {
        display::show(&[spatial_path, temporal_path])?;
    }

    Ok(())
}

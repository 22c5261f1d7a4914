//! Demonstration binary for the secant projection finder.
//!
//! Steps:
//! 1. Generate a synthetic family of closed curves in R^n.
//! 2. Compute secants per curve, optionally normalize and cull them.
//! 3. Start from the largest-spread axes (or a saved projection).
//! 4. Run conjugate gradient on the Grassmannian.
//! 5. Analyse projected secant lengths and write the projection + report.

use secant_projection::config::{load_config, ProjectionDemoConfig};
use secant_projection::diagnostics::{
    CullSummary, InputDescriptor, ProjectionReport, TimingBreakdown,
};
use secant_projection::io::write_json_file;
use secant_projection::secants::{compute_secants, cull_secants, SecantSet};
use secant_projection::synthetic::limit_cycle_family;
use secant_projection::ProjSecant;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    let start = Instant::now();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    println!(
        "Total execution time: {:.2} ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
}

fn run() -> Result<(), String> {
    let config = load_config_from_args()?;
    let mut timings = TimingBreakdown::default();

    let data = &config.data;
    let system = timings.time("synthetic", || {
        limit_cycle_family(
            data.dimension,
            &data.parameters,
            data.points_per_set,
            data.harmonics,
        )
    })?;

    let raw = timings.time("secants", || compute_secants(&system));
    let reduced = timings.time("cull", || reduce_secants(&raw, &config));
    let culling = CullSummary::from_sets(
        config.secants.cull_degrees,
        config.secants.normalize,
        &raw,
        &reduced,
    );
    println!(
        "Secants: {} -> {} across {} sets",
        culling.total_before(),
        culling.total_after(),
        reduced.len()
    );

    let mut proj = ProjSecant::with_params(config.target_dimension, config.optimizer.resolve());
    let initial_axes = timings.time("initial", || initialize(&mut proj, &config, &system))?;
    let initial_statistics = proj.analyse_secants_multi(&reduced);

    let optimize = timings.time("optimize", || proj.find_multi(&reduced))?;
    println!(
        "Optimizer: {:?} after {} steps, cost {:.6e} -> {:.6e}",
        optimize.outcome, optimize.steps, optimize.initial_cost, optimize.final_cost
    );

    let final_statistics = timings.time("analyse", || proj.analyse_secants_multi(&reduced));
    if let Some(stats) = &final_statistics {
        println!(
            "Projected lengths: min {:.4} max {:.4} mean {:.4} (min ratio {:.4})",
            stats.min, stats.max, stats.mean, stats.min_ratio
        );
        if let Some(met) = stats.target_met {
            println!("Minimum length target met: {met}");
        }
    }

    let out_dir = &config.output.dir;
    proj.write_binary(&out_dir.join(&config.output.binary))?;
    proj.write_csv(&out_dir.join(&config.output.csv))?;
    timings.close();

    let report = ProjectionReport {
        input: InputDescriptor {
            ambient_dimension: system.dimension(),
            target_dimension: proj.target_dimension(),
            data_sets: system.len(),
            points: system.total_points(),
            parameters: system.parameters().to_vec(),
        },
        initial_axes,
        culling,
        optimize,
        initial_statistics,
        final_statistics,
        projection: proj.projection().clone(),
        timings,
    };
    let report_path = out_dir.join(&config.output.report);
    write_json_file(&report_path, &report)?;
    println!("Projection report written to {}", report_path.display());
    Ok(())
}

fn usage() -> String {
    "Usage: proj_secant_demo <config.json>".to_string()
}

fn load_config_from_args() -> Result<ProjectionDemoConfig, String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    load_config(Path::new(&config_path))
}

fn reduce_secants(raw: &[SecantSet], config: &ProjectionDemoConfig) -> Vec<SecantSet> {
    let sets: Vec<SecantSet> = if config.secants.normalize {
        raw.iter().map(SecantSet::normalized).collect()
    } else {
        raw.to_vec()
    };
    match config.secants.cull_degrees {
        Some(deg) => cull_secants(&sets, deg),
        None => sets,
    }
}

/// Loads the resume file when configured, otherwise applies the axis heuristic.
fn initialize(
    proj: &mut ProjSecant,
    config: &ProjectionDemoConfig,
    system: &secant_projection::DataSystem,
) -> Result<Option<Vec<usize>>, String> {
    match &config.initial_projection {
        Some(path) => {
            proj.read_binary(path)?;
            println!("Resuming from {}", path.display());
            Ok(None)
        }
        None => {
            let axes = proj.compute_initial_system(system)?;
            println!("Initial axes: {axes:?}");
            Ok(Some(axes))
        }
    }
}

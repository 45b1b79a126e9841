use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use ts_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, RunTiming, ScenarioOverrides,
    query, run_service, scenario_service,
};

#[derive(Parser)]
#[command(name = "thermosurge")]
#[command(about = "ThermoSurge CLI - electronics/PCM package surge simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference scenario to a new file
    Init {
        /// Path of the scenario file to create (.yaml or .json)
        scenario_path: PathBuf,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Run a simulation
    Run {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Output time step in seconds
        #[arg(long)]
        dt: Option<f64>,
        /// End time in seconds
        #[arg(long)]
        t_end: Option<f64>,
        /// Surge intensity in watts, applied to every surge window
        #[arg(long)]
        surge_intensity: Option<f64>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a run's temperatures as CSV
    Export {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { scenario_path } => cmd_init(&scenario_path),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            dt,
            t_end,
            surge_intensity,
            no_cache,
        } => cmd_run(
            &scenario_path,
            ScenarioOverrides {
                dt_s: dt,
                t_end_s: t_end,
                surge_intensity_w: surge_intensity,
            },
            !no_cache,
        ),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::Export {
            scenario_path,
            run_id,
            output,
        } => cmd_export(&scenario_path, &run_id, output.as_deref()),
    };

    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

fn cmd_init(scenario_path: &Path) -> AppResult<()> {
    let scenario = scenario_service::init_scenario(scenario_path)?;
    println!(
        "✓ Wrote scenario '{}' to {}",
        scenario.name,
        scenario_path.display()
    );
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    scenario_service::validate_scenario(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!(
        "  {} surge window(s), dt = {} s, t_end = {} s",
        scenario.surges.len(),
        scenario.simulation.dt_s,
        scenario.simulation.t_end_s
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, overrides: ScenarioOverrides, use_cache: bool) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let request = RunRequest {
        scenario_path,
        overrides,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let fraction = event
                .transient
                .as_ref()
                .map(|t| t.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let stats = &response.manifest.solver_stats;
    println!(
        "  Integrator: {} ({} accepted, {} rejected steps, {} rhs calls)",
        response.manifest.integrator, stats.accepted_steps, stats.rejected_steps, stats.rhs_calls
    );

    let (_manifest, records) = run_service::load_run(scenario_path, &response.run_id)?;
    print_summary(&query::get_run_summary(&records)?);

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, &event.transient) {
        (RunStage::Simulating, Some(t)) => {
            let width = 28usize;
            let filled = ((t.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.3}/{:.3}s  steps={}  rejected={}  elapsed={:.1}s",
                bar,
                t.fraction_complete * 100.0,
                t.sim_time_s,
                t.t_end_s,
                t.accepted_steps,
                t.rejected_steps,
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTiming) {
    let total = timing.total_time_s.max(1.0e-12);
    let pct = |v: f64| 100.0 * v / total;

    println!("\nTiming summary:");
    println!(
        "  Compile:  {:.3}s ({:.1}%)",
        timing.compile_time_s,
        pct(timing.compile_time_s)
    );
    println!(
        "  Simulate: {:.3}s ({:.1}%)",
        timing.simulate_time_s,
        pct(timing.simulate_time_s)
    );
    println!(
        "  Save:     {:.3}s ({:.1}%)",
        timing.save_time_s,
        pct(timing.save_time_s)
    );
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:    {:.3}s", timing.total_time_s);
}

fn print_summary(summary: &query::RunSummary) {
    println!("\nRun Summary:");
    println!("  Time points: {}", summary.record_count);
    println!(
        "  Time range: {:.3} - {:.3} s",
        summary.time_range.0, summary.time_range.1
    );
    println!(
        "  Peak electronics: {:.3} °C at t = {:.3} s",
        summary.peak_electronics_c, summary.peak_electronics_time_s
    );
    println!("  Peak PCM: {:.3} °C", summary.peak_pcm_c);
    println!(
        "  Final: electronics {:.3} °C, PCM {:.3} °C",
        summary.final_electronics_c, summary.final_pcm_c
    );
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", scenario_path.display());
    } else {
        println!(
            "Cached runs in {}:",
            run_service::runs_dir(scenario_path)?.display()
        );
        for manifest in runs {
            println!(
                "  {} ({}, {}, {} samples)",
                manifest.run_id, manifest.timestamp, manifest.integrator, manifest.samples
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(scenario_path, run_id)?;
    println!("  Scenario: {}", manifest.scenario_name);
    println!("  Created: {}", manifest.timestamp);
    println!(
        "  dt = {} s, t_end = {} s, integrator = {}",
        manifest.dt_s, manifest.t_end_s, manifest.integrator
    );
    print_summary(&query::get_run_summary(&records)?);

    Ok(())
}

fn cmd_export(scenario_path: &Path, run_id: &str, output: Option<&Path>) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(scenario_path, run_id)?;

    if let Some(path) = output {
        ts_results::write_csv(path, &records)?;
        println!(
            "✓ Exported {} data points to {}",
            records.len(),
            path.display()
        );
    } else {
        print!("{}", ts_results::to_csv_string(&records));
    }

    Ok(())
}

use anyhow::Context;
use bridge::bridge::DataBridge;
use bridge::model::SnapshotModel;
use clap::Parser;
use generator::fleet::generate_records;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::FeederConfig;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Vehicle snapshot provider for the V2Sense radar")]
struct Args {
    /// Load a feeder config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 4)]
    count: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 5.0)]
    speed_min: f32,
    #[arg(long, default_value_t = 15.0)]
    speed_max: f32,
    /// Write the snapshot as JSON (e.g. data.json next to the visualizer)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Run the frame loop headless and print vehicle broadcasts
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Frames to step in offline mode
    #[arg(long, default_value_t = 100)]
    steps: usize,
    /// Serve the snapshot over HTTP until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        FeederConfig::load(path)?
    } else {
        FeederConfig::from_args(args.count, args.seed, args.speed_min, args.speed_max)
    };

    let records = generate_records(&config.generator).context("generating vehicle snapshot")?;
    let model = SnapshotModel::new(records.clone());
    info!(
        "generated {} vehicles (seed {})",
        records.len(),
        config.generator.seed
    );

    if let Some(path) = args.output.as_ref() {
        let json = model.to_json_pretty().context("encoding snapshot")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
        println!("Snapshot written to {}", path.display());
    }

    if args.offline {
        let runner = Runner::new(config.clone());
        let result = runner.execute(&records, args.steps)?;

        println!(
            "Offline run -> {} vehicles, {} frames, {} primitives in last frame",
            result.broadcasts.len(),
            result.metrics.frames_stepped,
            result.primitives
        );
        for broadcast in &result.broadcasts {
            println!("{}", serde_json::to_string(broadcast)?);
        }
        if result.warnings.is_empty() {
            println!("No imminent collisions detected.");
        } else {
            for warning in &result.warnings {
                println!("WARNING: {}", warning);
            }
        }

        let report = format!(
            "vehicles={} steps={} rendered={} warnings={}\n",
            result.broadcasts.len(),
            result.metrics.frames_stepped,
            result.metrics.frames_rendered,
            result.warnings.len()
        );
        let report_path = PathBuf::from("tools/data/offline_run.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        let bridge = DataBridge::new(SnapshotModel::default());
        bridge.publish(model)?;
        bridge.serve(config.bind_address);
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

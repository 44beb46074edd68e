use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use facebrain_core::{AsymmetryPair, FaceMonitor, Measurement, Readout};
use facebrain_hw::{FrameSource, Headset, HeadsetError, JsonLinesSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "facebrain", about = "Facial asymmetry monitor CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a recorded frame file through a local monitor
    Replay {
        /// JSON-lines frame file, or "-" for stdin
        path: String,
        /// Take one measurement every N frames (default: measure every pair once at the end)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        measure_every: Option<u64>,
        /// Print the readout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the daemon to score the next pair
    Measure,
    /// Show the daemon's current readout
    Readout,
    /// Show daemon status
    Status,
    /// Scan for paired brain-wave headsets
    Scan {
        /// Device directory to scan
        #[arg(long, default_value = "/dev")]
        dev_dir: PathBuf,
    },
}

#[zbus::proxy(
    interface = "org.facebrain.Monitor1",
    default_service = "org.facebrain.Monitor1",
    default_path = "/org/facebrain/Monitor1"
)]
trait Monitor {
    fn measure(&self) -> zbus::Result<String>;
    fn readout(&self) -> zbus::Result<String>;
    fn status(&self) -> zbus::Result<String>;
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            path,
            measure_every,
            json,
        } => {
            let mut source = JsonLinesSource::open(&path)?;
            let (monitor, measurements) = replay_frames(&mut source, measure_every)?;
            let readout = monitor.readout();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "measurements": measurements,
                        "readout": readout,
                    }))?
                );
            } else {
                for m in &measurements {
                    println!("{:<16} {:>6.2}", m.pair.label(), m.difference);
                }
                print_readout(&readout);
            }
        }
        Commands::Measure => {
            println!("{}", daemon().await?.measure().await?);
        }
        Commands::Readout => {
            println!("{}", daemon().await?.readout().await?);
        }
        Commands::Status => {
            println!("{}", daemon().await?.status().await?);
        }
        Commands::Scan { dev_dir } => match Headset::with_dev_dir(&dev_dir).scan() {
            Ok(devices) => {
                for d in devices {
                    println!("{}  {}", d.node, d.path);
                }
            }
            Err(HeadsetError::NotFound(dir)) => println!("No headsets found under {dir}"),
        },
    }

    Ok(())
}

async fn daemon() -> Result<MonitorProxy<'static>> {
    let connection = zbus::Connection::session()
        .await
        .context("failed to connect to the session bus")?;
    MonitorProxy::new(&connection)
        .await
        .context("facebraind not reachable")
}

/// Feed every frame from `source` into a fresh monitor.
///
/// With `measure_every`, one pair is scored after every N-th frame;
/// without it, all four pairs are scored once after the last frame.
fn replay_frames<S: FrameSource>(
    source: &mut S,
    measure_every: Option<u64>,
) -> Result<(FaceMonitor, Vec<Measurement>)> {
    let mut monitor = FaceMonitor::default();
    let mut measurements = Vec::new();

    while let Some(frame) = source.next_frame()? {
        monitor.on_frame(&frame);
        if let Some(n) = measure_every {
            if monitor.frames_seen() % n == 0 {
                measurements.push(monitor.measure());
            }
        }
    }
    tracing::debug!(frames = monitor.frames_seen(), "replay finished");

    if measure_every.is_none() {
        for _ in AsymmetryPair::ALL {
            measurements.push(monitor.measure());
        }
    }

    Ok((monitor, measurements))
}

fn print_readout(readout: &Readout) {
    println!("Frames: {}", readout.frames_seen);
    println!("Tracked:");
    for slot in &readout.tracked {
        println!("  {:<18} {:>5.2}", slot.shape.name(), slot.value);
    }
    println!("Differences:");
    for d in &readout.differences {
        match d.difference {
            Some(v) => println!("  {:<18} {:>5.2}", d.pair.label(), v),
            None => println!("  {:<18} {:>5.2} (unmeasured)", d.pair.label(), d.display),
        }
    }
    println!("Next: {}", readout.next_pair);
}

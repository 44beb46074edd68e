use anyhow::Result;
use facebrain_hw::{Headset, HeadsetError, JsonLinesSource};
use tracing_subscriber::EnvFilter;

mod config;
mod dbus_interface;
mod engine;

use config::Config;
use dbus_interface::{MonitorService, BUS_NAME, OBJECT_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    tracing::info!(
        source = %config.frame_source,
        activation_threshold = config.activation_threshold,
        "facebraind starting"
    );

    let headsets = if config.headset_enabled {
        match Headset::default().scan() {
            Ok(found) => found,
            Err(HeadsetError::NotFound(dir)) => {
                tracing::warn!(
                    dev_dir = %dir,
                    "no brain-wave headset found; continuing with face tracking only"
                );
                Vec::new()
            }
        }
    } else {
        tracing::info!("headset scan disabled via FACEBRAIN_HEADSET_ENABLED=0");
        Vec::new()
    };

    // Fail fast if there is no face-tracking input.
    let source = JsonLinesSource::open(&config.frame_source)?;
    let engine = engine::spawn_engine(source, config.monitor_config(), config.channel_capacity)?;

    let _connection = zbus::connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, MonitorService::new(engine, headsets))?
        .build()
        .await?;

    tracing::info!(bus_name = BUS_NAME, "facebraind ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("facebraind shutting down");

    Ok(())
}

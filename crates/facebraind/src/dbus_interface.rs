use crate::engine::{EngineError, EngineHandle};
use facebrain_hw::HeadsetInfo;
use zbus::interface;

pub const BUS_NAME: &str = "org.facebrain.Monitor1";
pub const OBJECT_PATH: &str = "/org/facebrain/Monitor1";

/// D-Bus interface for the facebrain monitor daemon.
///
/// Bus name: org.facebrain.Monitor1
/// Object path: /org/facebrain/Monitor1
pub struct MonitorService {
    engine: EngineHandle,
    headsets: Vec<HeadsetInfo>,
}

impl MonitorService {
    pub fn new(engine: EngineHandle, headsets: Vec<HeadsetInfo>) -> Self {
        Self { engine, headsets }
    }
}

#[interface(name = "org.facebrain.Monitor1")]
impl MonitorService {
    /// Score the next left/right pair. Returns the measurement as JSON.
    async fn measure(&self) -> zbus::fdo::Result<String> {
        tracing::info!("measure requested");
        let measurement = self.engine.measure().await.map_err(engine_failed)?;
        to_json(&measurement)
    }

    /// Current tracked values and differences as JSON.
    async fn readout(&self) -> zbus::fdo::Result<String> {
        let readout = self.engine.readout().await.map_err(engine_failed)?;
        to_json(&readout)
    }

    /// Return daemon status information.
    async fn status(&self) -> zbus::fdo::Result<String> {
        let readout = self.engine.readout().await.map_err(engine_failed)?;
        Ok(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "frames_processed": readout.frames_seen,
            "next_pair": readout.next_pair,
            "last_measurement": readout.last_measurement,
            "headsets": self.headsets,
        })
        .to_string())
    }
}

fn engine_failed(err: EngineError) -> zbus::fdo::Error {
    tracing::warn!(error = %err, "engine request failed");
    zbus::fdo::Error::Failed(err.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> zbus::fdo::Result<String> {
    serde_json::to_string(value).map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
}

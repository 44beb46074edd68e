use facebrain_core::{BlendShapeFrame, FaceMonitor, Measurement, MonitorConfig, Readout};
use facebrain_hw::FrameSource;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to spawn {0} thread: {1}")]
    Spawn(&'static str, std::io::Error),
    #[error("engine thread exited")]
    ChannelClosed,
}

/// Messages sent to the engine thread, from the frame reader and from D-Bus handlers.
enum EngineRequest {
    Frame(BlendShapeFrame),
    Measure {
        reply: oneshot::Sender<Measurement>,
    },
    Readout {
        reply: oneshot::Sender<Readout>,
    },
}

/// Clone-safe handle to the engine thread.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    /// Score the next asymmetry pair.
    pub async fn measure(&self) -> Result<Measurement, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::Measure { reply: reply_tx })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)
    }

    /// Snapshot the tracked values and differences.
    pub async fn readout(&self) -> Result<Readout, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::Readout { reply: reply_tx })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)
    }
}

/// Spawn the engine and its frame reader on dedicated OS threads.
///
/// The engine thread owns the `FaceMonitor`; frames and requests share one
/// channel, so sampling and scoring never run concurrently. The reader stops
/// at end of stream or on the first source error.
pub fn spawn_engine<S>(
    mut source: S,
    config: MonitorConfig,
    channel_capacity: usize,
) -> Result<EngineHandle, EngineError>
where
    S: FrameSource + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<EngineRequest>(channel_capacity);
    let mut monitor = FaceMonitor::new(config);

    std::thread::Builder::new()
        .name("facebrain-engine".into())
        .spawn(move || {
            tracing::info!("engine thread started");
            while let Some(req) = rx.blocking_recv() {
                match req {
                    EngineRequest::Frame(frame) => {
                        monitor.on_frame(&frame);
                    }
                    EngineRequest::Measure { reply } => {
                        let _ = reply.send(monitor.measure());
                    }
                    EngineRequest::Readout { reply } => {
                        let _ = reply.send(monitor.readout());
                    }
                }
            }
            tracing::info!(frames = monitor.frames_seen(), "engine thread exiting");
        })
        .map_err(|e| EngineError::Spawn("engine", e))?;

    let frame_tx = tx.clone();
    std::thread::Builder::new()
        .name("facebrain-frames".into())
        .spawn(move || {
            loop {
                match source.next_frame() {
                    Ok(Some(frame)) => {
                        if frame_tx.blocking_send(EngineRequest::Frame(frame)).is_err() {
                            tracing::debug!("engine gone; frame reader stopping");
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::info!("frame source ended");
                        break;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "frame source failed; no further frames");
                        break;
                    }
                }
            }
        })
        .map_err(|e| EngineError::Spawn("frame reader", e))?;

    Ok(EngineHandle { tx })
}

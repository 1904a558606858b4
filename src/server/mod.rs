//! Server orchestration
//!
//! Wires the subsystems together and runs them:
//!
//! ```text
//! GloveBridgeServer
//!   ├─> Ingest Task (UDP glove stream -> pipeline -> shared state)
//!   ├─> Consumer Listener (TCP, newline-delimited JSON push + control)
//!   └─> Shared State (torn-read-free cursor snapshot)
//! ```
//!
//! # Threading Model
//!
//! - **Ingest task:** owns the pipeline and recording sink; processes one
//!   datagram to completion before the next (single logical pipeline).
//! - **Consumer tasks:** one per connection, read-only against shared state,
//!   forwarding control messages to the ingest task over a channel.

mod client;
mod ingest;

pub use ingest::IngestTask;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::config::Config;
use crate::recording::CsvRecorder;
use crate::session::SessionController;
use crate::state::SharedState;

/// Capacity of the consumer-to-ingest control channel.
const CONTROL_CHANNEL_CAPACITY: usize = 32;

/// Glove bridge server.
///
/// Owns configuration and the published state; `run` starts the ingest task
/// and the consumer accept loop and blocks until a fatal error.
pub struct GloveBridgeServer {
    config: Arc<Config>,
    shared: Arc<SharedState>,
}

impl GloveBridgeServer {
    /// Create a server instance from validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            shared: Arc::new(SharedState::new()),
        })
    }

    /// Published state handle, readable at any time without side effects.
    pub fn shared_state(&self) -> Arc<SharedState> {
        Arc::clone(&self.shared)
    }

    /// Run the server. Blocks until a fatal error occurs.
    pub async fn run(self) -> Result<()> {
        let listen_addr: SocketAddr = self
            .config
            .server
            .listen_addr
            .parse()
            .context("Invalid listen address")?;
        let ingest_addr: SocketAddr = self
            .config
            .ingest
            .bind_addr
            .parse()
            .context("Invalid ingest bind address")?;

        let ingest_socket = UdpSocket::bind(ingest_addr)
            .await
            .context("Failed to bind glove ingest socket")?;
        let listener = TcpListener::bind(listen_addr)
            .await
            .context("Failed to bind consumer listener")?;

        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("  glove-bridge is ready");
        info!("  Glove ingest (UDP): {}", ingest_addr);
        info!("  Consumer listener (TCP): {}", listen_addr);
        info!("  Push rate: every {} ms", self.config.server.publish_interval_ms);
        info!("  Recording target: {}", self.config.recording.output_path.display());
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let (control_tx, control_rx) = mpsc::channel(CONTROL_CHANNEL_CAPACITY);

        let recorder = CsvRecorder::new(&self.config.recording.output_path);
        let session = SessionController::new(recorder);
        let ingest = IngestTask::new(
            ingest_socket,
            session,
            Arc::clone(&self.shared),
            control_rx,
            Duration::from_millis(self.config.ingest.idle_timeout_ms),
        );
        let mut ingest_handle = tokio::spawn(ingest.run());

        let publish_interval = Duration::from_millis(self.config.server.publish_interval_ms);
        let limiter = Arc::new(Semaphore::new(self.config.server.max_connections));

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted.context("Consumer accept failed")?;
                    match Arc::clone(&limiter).try_acquire_owned() {
                        Ok(permit) => {
                            let shared = Arc::clone(&self.shared);
                            let control_tx = control_tx.clone();
                            tokio::spawn(async move {
                                client::handle_consumer(
                                    stream,
                                    peer,
                                    shared,
                                    control_tx,
                                    publish_interval,
                                )
                                .await;
                                drop(permit);
                            });
                        }
                        Err(_) => {
                            warn!("Refusing consumer {}: connection limit reached", peer);
                        }
                    }
                }

                finished = &mut ingest_handle => {
                    return match finished {
                        Ok(Ok(())) => Err(anyhow::anyhow!("Ingest task exited unexpectedly")),
                        Ok(Err(e)) => Err(e.context("Ingest task failed")),
                        Err(e) => Err(anyhow::Error::from(e).context("Ingest task panicked")),
                    };
                }
            }
        }
    }
}

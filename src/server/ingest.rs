//! Glove stream ingest
//!
//! Dedicated task that owns the UDP socket, the sensor pipeline, and the
//! recording sink. Each datagram is one raw record; it is decoded and
//! processed to completion before the next is accepted, then the result is
//! published to the shared state.
//!
//! Stream lifecycle is derived from traffic: the first datagram after
//! silence that decodes to a valid record counts as connect, a configurable
//! idle window with no datagrams counts as disconnect (which clears the
//! calibration reference).

use crate::protocol::ControlMessage;
use crate::recording::RecordingSink;
use crate::session::{SessionController, SessionState};
use crate::state::SharedState;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// How often the idle window is checked.
const IDLE_CHECK_PERIOD: Duration = Duration::from_millis(250);

/// Largest datagram the glove firmware can send.
const MAX_DATAGRAM: usize = 2048;

/// Ingest task wiring: socket in, shared state out, control events in.
pub struct IngestTask<R: RecordingSink> {
    socket: UdpSocket,
    session: SessionController<R>,
    shared: Arc<SharedState>,
    control_rx: mpsc::Receiver<ControlMessage>,
    idle_timeout: Duration,
}

impl<R: RecordingSink> IngestTask<R> {
    /// Assemble the ingest task.
    pub fn new(
        socket: UdpSocket,
        session: SessionController<R>,
        shared: Arc<SharedState>,
        control_rx: mpsc::Receiver<ControlMessage>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            socket,
            session,
            shared,
            control_rx,
            idle_timeout,
        }
    }

    /// Run until the socket fails.
    pub async fn run(self) -> Result<()> {
        let Self {
            socket,
            mut session,
            shared,
            mut control_rx,
            idle_timeout,
        } = self;

        let local = socket.local_addr().context("Ingest socket has no local address")?;
        info!("Listening for glove datagrams on {}", local);

        let mut buf = [0u8; MAX_DATAGRAM];
        let mut last_packet: Option<Instant> = None;
        let mut first_packet = true;

        let mut idle_check = interval(IDLE_CHECK_PERIOD);
        idle_check.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                received = socket.recv_from(&mut buf) => {
                    let (len, addr) = received.context("Glove ingest socket failed")?;

                    if first_packet {
                        info!("Receiving glove data from {}", addr);
                        first_packet = false;
                    }

                    last_packet = Some(Instant::now());

                    match std::str::from_utf8(&buf[..len]) {
                        Ok(text) => {
                            let line = text.trim();
                            if let Some(update) = session.handle_line(line) {
                                shared.apply_update(line, &update);
                            }
                        }
                        Err(_) => debug!("Dropping non-UTF-8 datagram from {}", addr),
                    }

                    shared.set_session(session.state());
                    shared.set_recording(session.is_recording());
                }

                control = control_rx.recv() => {
                    match control {
                        Some(msg) => {
                            apply_control(&mut session, msg);
                            shared.set_session(session.state());
                            shared.set_recording(session.is_recording());
                        }
                        // All consumers and the server handle are gone
                        None => {
                            warn!("Control channel closed, stopping ingest");
                            session.stop_recording();
                            return Ok(());
                        }
                    }
                }

                _ = idle_check.tick() => {
                    if session.state() != SessionState::Disconnected {
                        if let Some(t) = last_packet {
                            if t.elapsed() > idle_timeout {
                                session.on_disconnected();
                                shared.set_session(session.state());
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Apply one consumer control message to the session.
fn apply_control<R: RecordingSink>(session: &mut SessionController<R>, msg: ControlMessage) {
    debug!("Control message: {:?}", msg);
    match msg {
        ControlMessage::Recalibrate => session.recalibrate(),
        ControlMessage::StartRec => session.start_recording(),
        ControlMessage::StopRec => session.stop_recording(),
    }
}

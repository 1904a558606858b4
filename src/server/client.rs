//! Consumer connection handling
//!
//! One task per consumer. State frames are pushed at a fixed cadence
//! (independent of sensor rate); inbound lines are parsed as control
//! messages and forwarded to the ingest task, fire-and-forget.

use crate::protocol::{self, ControlMessage, StateFrame};
use crate::state::SharedState;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

/// Serve one consumer until it disconnects.
pub(crate) async fn handle_consumer(
    stream: TcpStream,
    addr: SocketAddr,
    shared: Arc<SharedState>,
    control_tx: mpsc::Sender<ControlMessage>,
    publish_interval: Duration,
) {
    info!("Consumer connected: {}", addr);

    let mut framed = Framed::new(stream, LinesCodec::new());
    let mut ticker = interval(publish_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = shared.snapshot();
                // Nothing to push until the first record has been accepted
                if let Some(frame) = StateFrame::from_snapshot(&snapshot) {
                    if let Err(e) = framed.send(frame.to_line()).await {
                        debug!("Consumer {} write failed: {}", addr, e);
                        break;
                    }
                }
            }

            inbound = framed.next() => {
                match inbound {
                    Some(Ok(line)) => {
                        if let Some(msg) = protocol::parse_control(&line) {
                            if control_tx.send(msg).await.is_err() {
                                warn!("Control channel closed, dropping consumer {}", addr);
                                break;
                            }
                        }
                        // Malformed lines were logged by the parser and are dropped
                    }
                    Some(Err(e)) => {
                        warn!("Consumer {} read error: {}", addr, e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    info!("Consumer disconnected: {}", addr);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SensorPipeline;
    use tokio::io::AsyncBufReadExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_consumer_receives_state_frames_and_sends_control() {
        let shared = Arc::new(SharedState::new());

        // Seed shared state with one processed record
        let mut pipeline = SensorPipeline::new();
        pipeline.process_line("0,0,0,0,0,0,0,0,0,0,0,0");
        let line = "0,0,0,0,0,0,0,0,0,0,5,0";
        let update = pipeline.process_line(line).unwrap();
        shared.apply_update(line, &update);

        let (control_tx, mut control_rx) = mpsc::channel(8);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server_shared = Arc::clone(&shared);
        tokio::spawn(async move {
            let (stream, peer) = listener.accept().await.unwrap();
            handle_consumer(
                stream,
                peer,
                server_shared,
                control_tx,
                Duration::from_millis(5),
            )
            .await;
        });

        let client = TcpStream::connect(addr).await.unwrap();
        let (read_half, mut write_half) = client.into_split();

        // Read one pushed state frame
        let mut reader = tokio::io::BufReader::new(read_half);
        let mut pushed = String::new();
        reader.read_line(&mut pushed).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(pushed.trim()).unwrap();
        assert_eq!(value["raw"], line);
        assert!(value["cursor"]["y"].as_f64().unwrap() > 0.0);

        // Send a control message and a malformed line
        use tokio::io::AsyncWriteExt;
        write_half
            .write_all(b"{\"type\": \"RECALIBRATE\"}\nnot json\n")
            .await
            .unwrap();

        let msg = tokio::time::timeout(Duration::from_secs(2), control_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(msg, ControlMessage::Recalibrate);

        // The malformed line produced no further control messages
        assert!(control_rx.try_recv().is_err());
    }
}

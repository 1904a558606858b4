//! # glove-bridge
//!
//! Bridge daemon for a wearable-glove pointing device: ingests the glove's
//! raw inertial sensor stream, turns it into a calibrated, smoothed 2D
//! cursor position plus a click signal, and serves the result to consumers
//! over a persistent socket at sensor rate.
//!
//! # Architecture
//!
//! ```text
//! glove-bridge
//!   ├─> Ingest Task (UDP datagrams from the glove, one record each)
//!   ├─> Sensor Pipeline (decode -> calibrate -> condition -> integrate/detect)
//!   ├─> Session Controller (stream lifecycle, recalibration, recording signals)
//!   ├─> Recording Sink (CSV capture of raw frames while recording)
//!   └─> Consumer Server (TCP, JSON state push + control messages)
//! ```
//!
//! # Data Flow
//!
//! **Sensor Path:** Glove → UDP → Decoder → Calibration → Conditioner →
//! Integrator/Click Detector → Shared State → Consumers
//!
//! **Control Path:** Consumer → JSON line → Ingest Task → Session Controller
//!
//! **Recording Path:** Ingest Task → Recording Sink → CSV file

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Server configuration
pub mod config;

/// Sensor stream processor: the decode/calibrate/condition/integrate/detect
/// pipeline. Smoothing and integration are the only stateful stages; their
/// state is threaded through pure update functions.
pub mod pipeline;

/// Consumer wire protocol (control messages, state frames)
pub mod protocol;

/// Frame recording collaborator (CSV sink behind a trait)
pub mod recording;

/// Main server implementation
pub mod server;

/// Stream session lifecycle state machine
pub mod session;

/// Published cursor state shared across the concurrency boundary
pub mod state;

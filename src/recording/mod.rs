//! Frame recording
//!
//! Storage collaborator for recorded gesture frames. The session controller
//! only signals start/stop; everything about persisting frames lives behind
//! [`RecordingSink`]. The shipped implementation appends raw frames to a CSV
//! file with a wall-clock timestamp column, matching the capture format the
//! playback tooling expects.

use crate::pipeline::SensorSample;
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Result type for recording operations
pub type Result<T> = std::result::Result<T, RecordingError>;

/// Recording sink error types
#[derive(Error, Debug)]
pub enum RecordingError {
    /// No recording is active
    #[error("No recording in progress")]
    NotRecording,

    /// IO error while writing frames
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for recorded frames.
///
/// `begin` opens a fresh recording (discarding any previous one at the same
/// destination), `append` persists one frame, `finish` flushes and closes.
/// All three are fire-and-forget from the session controller's point of view;
/// failures are the sink's to report, never fatal to the stream.
pub trait RecordingSink: Send {
    /// Start a new recording, replacing any previous one.
    fn begin(&mut self) -> Result<()>;

    /// Persist one frame of the active recording.
    fn append(&mut self, sample: &SensorSample) -> Result<()>;

    /// Flush and close the active recording.
    fn finish(&mut self) -> Result<()>;

    /// Whether a recording is currently open.
    fn is_active(&self) -> bool;
}

/// CSV column header: the 12 sensor fields plus capture timestamp.
const CSV_HEADER: &str = "ax1,ay1,az1,gx1,gy1,gz1,ax2,ay2,az2,gx2,gy2,gz2,timestamp";

/// CSV file recorder.
///
/// Each `begin` truncates the output file and writes the header row; each
/// frame row carries the 12 fields followed by epoch seconds with millisecond
/// precision.
pub struct CsvRecorder {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl CsvRecorder {
    /// Create a recorder targeting `path`. No file is touched until `begin`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordingSink for CsvRecorder {
    fn begin(&mut self) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER)?;
        self.writer = Some(writer);
        info!("Recording to {}", self.path.display());
        Ok(())
    }

    fn append(&mut self, sample: &SensorSample) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(RecordingError::NotRecording)?;
        let timestamp = Utc::now().timestamp_millis() as f64 / 1000.0;
        let fields = sample
            .to_fields()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{},{:.3}", fields, timestamp)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            info!("Recording saved: {}", self.path.display());
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Drop for CsvRecorder {
    fn drop(&mut self) {
        // Best effort flush if the stream dies mid-recording
        let _ = self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SensorSample {
        SensorSample::from_fields([
            0.1, 0.2, 1.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0, -3.0,
        ])
    }

    #[test]
    fn test_begin_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");
        let mut recorder = CsvRecorder::new(&path);

        recorder.begin().unwrap();
        recorder.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next().unwrap(), CSV_HEADER);
    }

    #[test]
    fn test_append_writes_fields_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");
        let mut recorder = CsvRecorder::new(&path);

        recorder.begin().unwrap();
        recorder.append(&sample()).unwrap();
        recorder.append(&sample()).unwrap();
        recorder.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let row: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(row.len(), 13);
        assert_eq!(row[2], "1.9");
        assert_eq!(row[10], "5");
        // Timestamp parses as epoch seconds
        assert!(row[12].parse::<f64>().unwrap() > 1_600_000_000.0);
    }

    #[test]
    fn test_append_without_begin_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CsvRecorder::new(dir.path().join("capture.csv"));
        assert!(matches!(
            recorder.append(&sample()),
            Err(RecordingError::NotRecording)
        ));
    }

    #[test]
    fn test_restart_truncates_previous_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.csv");
        let mut recorder = CsvRecorder::new(&path);

        recorder.begin().unwrap();
        recorder.append(&sample()).unwrap();
        recorder.append(&sample()).unwrap();
        recorder.finish().unwrap();

        recorder.begin().unwrap();
        recorder.append(&sample()).unwrap();
        recorder.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn test_finish_without_begin_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CsvRecorder::new(dir.path().join("capture.csv"));
        assert!(recorder.finish().is_ok());
        assert!(!recorder.is_active());
    }
}

//! External MP3 transcoding.
//!
//! The transcoder is an optional dependency: every failure mode is
//! reported as a [`TranscodeFailure`] and the caller falls back to WAV.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::TranscoderConfig;

/// Interval between child status checks while waiting on the transcoder.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to wait for stderr once the child has exited or been killed.
/// Descendants of the child may keep the pipe open indefinitely.
const STDERR_GRACE: Duration = Duration::from_millis(500);

/// Why a transcode attempt did not produce the compressed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeFailure {
    /// The transcoder binary could not be found.
    NotFound(String),
    /// The transcoder ran but exited unsuccessfully.
    Failed {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The transcoder exceeded its time budget and was killed.
    TimedOut(Duration),
    /// Spawning or waiting on the process failed for another reason.
    Io(String),
    /// Transcoding was switched off for this run.
    Disabled,
}

impl fmt::Display for TranscodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscodeFailure::NotFound(program) => write!(f, "{} not available", program),
            TranscodeFailure::Failed { code, stderr } => {
                match code {
                    Some(code) => write!(f, "transcoder exited with status {}", code)?,
                    None => write!(f, "transcoder terminated by signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            TranscodeFailure::TimedOut(limit) => {
                write!(f, "transcoder timed out after {:.1}s", limit.as_secs_f64())
            }
            TranscodeFailure::Io(reason) => write!(f, "failed to run transcoder: {}", reason),
            TranscodeFailure::Disabled => write!(f, "transcoding disabled"),
        }
    }
}

impl std::error::Error for TranscodeFailure {}

/// Converts an uncompressed WAV into a compressed file.
pub trait Transcoder {
    /// Short name used in progress messages.
    fn name(&self) -> &str;

    /// Produces `output` from `input`, or explains why it could not.
    ///
    /// Implementations must not leave `output` behind on failure.
    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeFailure>;
}

/// Transcoder that shells out to `ffmpeg` with the LAME MP3 encoder.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
    quality: u8,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(config: &TranscoderConfig) -> Self {
        Self {
            program: config.program.clone(),
            quality: config.quality,
            timeout: config.timeout(),
        }
    }

    /// Builds the ffmpeg invocation for one file.
    pub fn command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-loglevel", "error", "-i"])
            .arg(input)
            .args(["-codec:a", "libmp3lame", "-qscale:a"])
            .arg(self.quality.to_string())
            .args(["-ac", "1"])
            .arg(output);
        cmd
    }

    /// Checks whether the transcoder can be launched at all.
    pub fn probe(&self) -> Result<(), TranscodeFailure> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-version");
        run_with_timeout(cmd, &self.program_name(), self.timeout)
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(&TranscoderConfig::default())
    }
}

impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeFailure> {
        tracing::debug!(
            program = %self.program.display(),
            input = %input.display(),
            output = %output.display(),
            "running transcoder"
        );

        let result = run_with_timeout(
            self.command(input, output),
            &self.program_name(),
            self.timeout,
        );
        if result.is_err() && output.exists() {
            if let Err(e) = std::fs::remove_file(output) {
                tracing::warn!(
                    path = %output.display(),
                    error = %e,
                    "failed to remove partial output"
                );
            }
        }
        result
    }
}

/// Transcoder used with `--wav-only`: every sound falls back to WAV.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTranscoder;

impl Transcoder for DisabledTranscoder {
    fn name(&self) -> &str {
        "none"
    }

    fn transcode(&self, _input: &Path, _output: &Path) -> Result<(), TranscodeFailure> {
        Err(TranscodeFailure::Disabled)
    }
}

/// Runs `cmd` to completion, killing it once `timeout` has elapsed.
///
/// Standard input and output are discarded; standard error is captured
/// for the failure message.
pub fn run_with_timeout(
    mut cmd: Command,
    program: &str,
    timeout: Duration,
) -> Result<(), TranscodeFailure> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TranscodeFailure::NotFound(program.to_string()),
        _ => TranscodeFailure::Io(e.to_string()),
    })?;

    // Drain stderr on a detached thread so a chatty child cannot block on a full pipe.
    let stderr_rx = child.stderr.take().map(|mut stderr| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut bytes = Vec::new();
            let _ = stderr.read_to_end(&mut bytes);
            let _ = tx.send(String::from_utf8_lossy(&bytes).into_owned());
        });
        rx
    });

    let status = wait_with_deadline(&mut child, timeout)?;
    let stderr = stderr_rx
        .and_then(|rx| rx.recv_timeout(STDERR_GRACE).ok())
        .unwrap_or_default();

    match status {
        status if status.success() => Ok(()),
        status => Err(TranscodeFailure::Failed {
            code: status.code(),
            stderr: stderr.trim().to_string(),
        }),
    }
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Result<ExitStatus, TranscodeFailure> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(TranscodeFailure::TimedOut(timeout));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TranscodeFailure::Io(e.to_string()));
            }
        }
    }
}

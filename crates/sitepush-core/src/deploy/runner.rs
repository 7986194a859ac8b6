//! Deploy tool runner: spawn, answer prompts, relay output, wait.
//!
//! The child's stdout and stderr share one pipe, so lines reach the sink in
//! the order the tool wrote them. The call blocks until the tool exits;
//! there is no timeout and no retry.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{ChildStdin, Command, Stdio};

use super::detect::detect_deploy_url;
use super::plan::DeployPlan;

/// Receives the tool's combined output as it arrives.
pub trait OutputSink {
    /// One line of stdout or stderr, without its line terminator.
    fn line(&mut self, line: &str);

    /// A line announced a published URL.
    fn url_found(&mut self, url: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("Failed to launch deploy tool '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Deploy tool {0} was not captured")]
    MissingPipe(&'static str),

    #[error("I/O error while running deploy tool: {0}")]
    Io(#[from] io::Error),
}

/// What the tool did, as observed by the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the tool was terminated by a signal
    pub exit_code: Option<i32>,
    pub urls: Vec<String>,
    pub lines: usize,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `plan` to completion, relaying output to `sink`.
pub fn run_deploy(plan: &DeployPlan, sink: &mut dyn OutputSink) -> Result<RunOutcome, DeployError> {
    let (output, output_writer) = io::pipe()?;

    // The Command holds the write ends; dropping it at the end of this block
    // leaves the child as the only writer, so the reader sees EOF on exit.
    let mut child = {
        let mut command = Command::new(&plan.program);
        command
            .args(&plan.args)
            .current_dir(&plan.working_dir)
            .stdin(Stdio::piped())
            .stdout(output_writer.try_clone()?)
            .stderr(output_writer);
        command.spawn().map_err(|source| DeployError::Spawn {
            program: plan.program.clone(),
            source,
        })?
    };

    tracing::info!(pid = child.id(), command = %plan, "Started deploy tool");

    let Some(stdin) = child.stdin.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(DeployError::MissingPipe("stdin"));
    };

    if let Err(err) = write_responses(stdin, &plan.responses) {
        let _ = child.kill();
        let _ = child.wait();
        return Err(err.into());
    }

    let mut outcome = RunOutcome::default();
    let relayed = relay_lines(BufReader::new(output), |line| {
        outcome.lines += 1;
        sink.line(line);
        if let Some(url) = detect_deploy_url(line, &plan.provider) {
            tracing::debug!(%url, "Detected deploy URL");
            sink.url_found(&url);
            outcome.urls.push(url);
        }
    });

    let status = child.wait()?;
    if let Err(err) = relayed {
        tracing::debug!(error = %err, "Failed to read deploy tool output");
        return Err(err.into());
    }

    outcome.exit_code = status.code();
    match outcome.exit_code {
        Some(0) => tracing::info!("Deploy tool finished successfully"),
        Some(code) => tracing::warn!(code, "Deploy tool exited with a non-zero status"),
        None => tracing::warn!("Deploy tool was terminated by a signal"),
    }

    Ok(outcome)
}

/// Write each response followed by a newline, then close stdin.
///
/// A tool that exits or stops reading before all answers are written is
/// not an error here; its exit status decides the outcome.
fn write_responses(mut stdin: ChildStdin, responses: &[String]) -> io::Result<()> {
    for (index, response) in responses.iter().enumerate() {
        let written = stdin
            .write_all(response.as_bytes())
            .and_then(|_| stdin.write_all(b"\n"))
            .and_then(|_| stdin.flush());

        match written {
            Ok(()) => tracing::debug!(index, "Sent prompt response"),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                tracing::warn!(
                    index,
                    "Deploy tool closed its input before all prompt responses were sent"
                );
                return Ok(());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Split `reader` into lines as bytes arrive and hand each to `on_line`.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, so progress frames redrawn
/// with carriage returns are relayed one by one. A trailing unterminated
/// line is delivered at EOF.
fn relay_lines<R, F>(mut reader: R, mut on_line: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut pending = Vec::new();
    let mut after_cr = false;
    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if chunk.is_empty() {
            break;
        }

        for &byte in chunk {
            match byte {
                b'\n' if after_cr => after_cr = false,
                b'\n' | b'\r' => {
                    on_line(&String::from_utf8_lossy(&pending));
                    pending.clear();
                    after_cr = byte == b'\r';
                }
                _ => {
                    after_cr = false;
                    pending.push(byte);
                }
            }
        }

        let consumed = chunk.len();
        reader.consume(consumed);
    }

    if !pending.is_empty() {
        on_line(&String::from_utf8_lossy(&pending));
    }
    Ok(())
}

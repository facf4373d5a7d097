use crate::error::{Result, SmbUserError};
use log::debug;
use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::thread;
use subprocess::{ExitStatus, Popen, PopenConfig, Redirection};

#[derive(Debug, Clone)]
pub struct CmdResult {
    pub out: String,
    pub err: String,
    pub status: ExitStatus,
}

impl CmdResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs one external command to completion.
pub trait Runner {
    fn run(&self, argv: &[&str], input: Option<&str>) -> Result<CmdResult>;
}

/// Runs commands as real child processes. Blocks until the child exits.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, argv: &[&str], input: Option<&str>) -> Result<CmdResult> {
        debug!("Running {}", argv.join(" "));
        let mut p = Popen::create(
            argv,
            PopenConfig {
                stdin: Redirection::Pipe,
                stdout: Redirection::Pipe,
                stderr: Redirection::Pipe,
                ..Default::default()
            },
        )?;

        // Stdin is always closed, so nothing can wait on a prompt.
        let writer = p.stdin.take().map(|stdin| {
            let input = input.unwrap_or("").to_owned();
            thread::spawn(move || feed_stdin(stdin, &input))
        });
        let (out, err) = p.communicate(None)?;
        let status = p.wait()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::new(ErrorKind::Other, "stdin writer panicked"))??;
        }
        debug!("{} exited with {:?}", argv[0], status);

        Ok(CmdResult {
            out: out.unwrap_or_default(),
            err: err.unwrap_or_default(),
            status,
        })
    }
}

/// A child that exits without reading its input is not an error here;
/// its exit status and stderr tell the story.
fn feed_stdin(mut stdin: File, input: &str) -> io::Result<()> {
    match stdin.write_all(input.as_bytes()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("Child exited before reading its input");
            Ok(())
        }
        other => other,
    }
}

/// Resolve `tool` on PATH, or check an explicit path when one is given.
pub fn find_tool(tool: &str, explicit: Option<&str>) -> Result<PathBuf> {
    which::which(explicit.unwrap_or(tool)).map_err(|source| SmbUserError::ToolNotFound {
        tool: explicit.unwrap_or(tool).to_owned(),
        source,
    })
}

/// Fails with the captured stderr when the command did not exit cleanly.
pub fn check(argv: &[&str], result: CmdResult) -> Result<CmdResult> {
    if result.success() {
        Ok(result)
    } else {
        Err(SmbUserError::CommandFailed {
            command: argv.join(" "),
            stderr: result.err,
        })
    }
}

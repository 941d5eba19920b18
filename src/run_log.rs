// src/run_log.rs
// =============================================================================
// This module implements the run log: a buffer that captures every message
// the tool emits while also echoing it to the console.
//
// Why buffer instead of writing lines to disk as they happen?
// - The log file is optional (--log-path); we only find out at the end of
//   the run whether the target directory is usable
// - One append at the end keeps runs together as a single block in the file
//
// The buffer is owned by main and passed down as `&mut RunLog`, so there is
// no global state - every component that wants to log gets handed the sink.
// =============================================================================

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

// Name of the log file inside the chosen directory
const LOG_FILE_NAME: &str = "sitemap_generator_logs.txt";

// Captures the full transcript of a run
#[derive(Debug, Default)]
pub struct RunLog {
    buffer: String,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    // Records an informational message and prints it to stdout
    pub fn log(&mut self, message: &str) {
        println!("{message}");
        self.buffer.push_str(message);
        self.buffer.push('\n');
    }

    // Records an error message and prints it to stderr
    //
    // Errors still go into the same buffer - the log file is a transcript
    // of the whole run, warnings and all
    pub fn error(&mut self, message: &str) {
        eprintln!("{message}");
        self.buffer.push_str(message);
        self.buffer.push('\n');
    }

    // Appends the buffered transcript to <dir>/sitemap_generator_logs.txt
    //
    // "." means the current working directory. Any other value must name a
    // directory that already exists - we never create directories here.
    // Returns the path the log was written to.
    pub fn save_to(&self, dir: &str) -> Result<PathBuf> {
        let dir_path = if dir == "." {
            env::current_dir().context("could not determine the current directory")?
        } else {
            PathBuf::from(dir.trim_end_matches('/'))
        };

        if !dir_path.is_dir() {
            bail!("'{dir}' is not an existing directory");
        }

        let path = dir_path.join(LOG_FILE_NAME);

        // Append so repeated runs accumulate in one file
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("could not open {}", path.display()))?;
        file.write_all(self.buffer.as_bytes())
            .with_context(|| format!("could not write {}", path.display()))?;

        Ok(path)
    }
}

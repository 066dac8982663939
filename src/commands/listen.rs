use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use tidybuild::{Config, EventCompiler, EventStream, Notifier, NotifierOptions, TidyError};

pub fn cmd_listen(input: Option<&Path>, config: &Config, json: bool, verbose: u8) -> Result<()> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    // Ctrl+C ends the session, even while blocked on input.
    ctrlc::set_handler(|| std::process::exit(0)).context("Error setting Ctrl+C handler")?;

    super::with_reporter(config, json, |reporter| {
        let mut compiler = EventCompiler::new();
        let _notifier =
            Notifier::with_options(reporter, NotifierOptions::from(config)).attach(&mut compiler);

        for event in EventStream::new(reader) {
            match event {
                Ok(event) => {
                    if verbose > 1 {
                        eprintln!("[listen] {}", event.to_json());
                    }
                    compiler.emit(&event)?;
                }
                Err(err @ TidyError::InvalidEvent { .. }) => {
                    if verbose > 0 {
                        eprintln!("[listen] skipped: {err}");
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    })
}

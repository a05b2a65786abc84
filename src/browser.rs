//! Launching the platform web browser.

use log::debug;
use std::io;
use std::process::Stdio;

/// Something able to show a url to the user
pub trait Browser {
    /// Open `url`, returning `Ok(false)` when the launcher declined the request
    fn open(&self, url: &str) -> io::Result<bool>;
}

/// Default browser of the running platform
///
/// Launchers known to the `open` crate are tried in order until one of them
/// succeeds. A launcher exiting with a failure status counts as a declined
/// request, only a failure to start any launcher at all is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<bool> {
        let mut declined = false;
        let mut last_error = None;

        for mut command in open::commands(url) {
            debug!("Launching browser with {:?}", command);
            match command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                Ok(status) if status.success() => return Ok(true),
                Ok(status) => {
                    debug!("Browser launcher exited with {}", status);
                    declined = true;
                }
                Err(err) => {
                    debug!("Browser launcher could not be started: {}", err);
                    last_error = Some(err);
                }
            }
        }

        if declined {
            return Ok(false);
        }

        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no browser launcher available")
        }))
    }
}

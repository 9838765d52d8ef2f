// src/frontend/console.rs

//! Raw-mode console I/O.
//!
//! `ConsoleIo` puts the controlling terminal into raw mode on construction
//! and restores the saved attributes on cleanup (with a `Drop` backstop, so
//! a panic does not leave the shell unusable). Input is poll-driven: the
//! application loop blocks until stdin has bytes or a caller-supplied
//! timeout elapses, then reads and decodes whatever arrived.

use std::io::{self, stdout, Read, Write};
use std::mem;
use std::os::fd::AsFd;
use std::os::unix::io::RawFd;
use std::time::Duration;

use anyhow::{Context, Result};
use libc::{winsize, STDIN_FILENO, TIOCGWINSZ};
use log::{debug, error, info, trace, warn};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSANOW, VMIN, VTIME};

use crate::frontend::input::KeyDecoder;
use crate::frontend::{FrontendEvent, DEFAULT_TERM_HEIGHT_CELLS, DEFAULT_TERM_WIDTH_CELLS};

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H";

/// Console transport for the editor: raw-mode stdin plus ANSI frames out.
pub struct ConsoleIo {
    /// Original terminal attributes, restored on cleanup.
    original_termios: Option<Termios>,
    /// Read buffer for stdin; key sequences are only a few bytes each.
    input_buffer: [u8; 128],
    decoder: KeyDecoder,
}

impl ConsoleIo {
    /// Switches the terminal to raw mode and hides its native cursor.
    ///
    /// Raw mode disables echo, line buffering, and signal generation so
    /// every key press, Ctrl-C included, arrives as plain bytes. If the
    /// attributes cannot be changed the editor still runs, just with
    /// degraded input handling.
    pub fn new() -> Result<Self> {
        info!("Initializing console I/O.");
        let original_termios = match Termios::from_fd(STDIN_FILENO) {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!(
                    "Failed to get initial termios: {}. Proceeding without raw mode.",
                    e
                );
                None
            }
        };

        if let Some(ref ots) = original_termios {
            let mut raw_termios = *ots;
            // Disable echo, canonical mode (line buffering), and signal
            // generation so Ctrl-C reaches the key decoder.
            raw_termios.c_lflag &= !(ECHO | ICANON | ISIG);
            // Disable software flow control and CR/NL mangling on input.
            raw_termios.c_iflag &=
                !(libc::IXON | libc::IXOFF | libc::ICRNL | libc::INLCR | libc::IGNCR);
            // Disable output processing; frames position the cursor themselves.
            raw_termios.c_oflag &= !libc::OPOST;
            // Non-blocking reads; poll() decides when to read.
            raw_termios.c_cc[VMIN] = 0;
            raw_termios.c_cc[VTIME] = 0;

            if let Err(e) = tcsetattr(STDIN_FILENO, TCSANOW, &raw_termios) {
                warn!(
                    "Failed to set raw terminal attributes: {}. Input might not work as expected.",
                    e
                );
            } else {
                debug!("Terminal set to raw mode.");
            }
        }

        print!("{}", CURSOR_HIDE);
        stdout()
            .flush()
            .context("Failed to flush stdout for initial cursor hide")?;

        Ok(ConsoleIo {
            original_termios,
            input_buffer: [0u8; 128],
            decoder: KeyDecoder::new(),
        })
    }

    /// Waits up to `timeout` for input, then reads and decodes it.
    ///
    /// `None` blocks until input arrives. An empty vector means the wait
    /// timed out or was interrupted by a signal; the caller just runs its
    /// loop again.
    pub fn poll_input(&mut self, timeout: Option<Duration>) -> Result<Vec<FrontendEvent>> {
        let poll_timeout = match timeout {
            None => PollTimeout::NONE,
            Some(duration) => {
                let millis = duration.as_millis().min(u128::from(u16::MAX)) as u16;
                PollTimeout::from(millis)
            }
        };

        let stdin = io::stdin();
        let mut poll_fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
        let ready = match poll(&mut poll_fds, poll_timeout) {
            Ok(n) => n,
            Err(Errno::EINTR) => {
                trace!("poll interrupted by signal.");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e).context("poll on stdin failed"),
        };
        if ready == 0 {
            return Ok(Vec::new());
        }

        match stdin.lock().read(&mut self.input_buffer) {
            Ok(0) => {
                // EOF: the controlling terminal closed underneath us.
                info!("EOF on stdin. Requesting close.");
                Ok(vec![FrontendEvent::CloseRequested])
            }
            Ok(bytes_read) => {
                trace!("Read {} bytes from stdin.", bytes_read);
                let events = self
                    .decoder
                    .feed(&self.input_buffer[..bytes_read])
                    .into_iter()
                    .map(FrontendEvent::Key)
                    .collect();
                Ok(events)
            }
            Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => Ok(Vec::new()),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => Ok(Vec::new()),
            Err(e) => Err(e).context("Error reading from stdin"),
        }
    }

    /// Writes one fully composed frame and flushes it.
    pub fn write_frame(&mut self, frame: &str) -> Result<()> {
        print!("{}", frame);
        stdout()
            .flush()
            .context("Failed to flush stdout after frame")
    }

    /// Sets the window title via OSC 0.
    pub fn set_title(&mut self, title: &str) {
        print!("\x1b]0;{}\x07", title);
        trace!("Set window title to '{}'", title);
    }

    /// Terminal size in character cells.
    pub fn size_cells(&self) -> Result<(u16, u16)> {
        get_terminal_size_cells(STDIN_FILENO)
    }

    /// Clears the screen, shows the cursor, and restores the saved terminal
    /// attributes.
    pub fn cleanup(&mut self) -> Result<()> {
        info!("Restoring console state.");
        print!("{}{}", CLEAR_SCREEN_AND_HOME, CURSOR_SHOW);
        stdout()
            .flush()
            .context("Failed to flush stdout during cleanup")?;

        if let Some(original_termios_val) = self.original_termios.take() {
            debug!("Restoring original terminal attributes.");
            tcsetattr(STDIN_FILENO, TCSANOW, &original_termios_val)
                .context("Failed to restore original terminal attributes")?;
        }
        Ok(())
    }
}

/// Retrieves the terminal size in character cells via `ioctl(TIOCGWINSZ)`,
/// substituting defaults for the zero dimensions some environments report.
fn get_terminal_size_cells(fd: RawFd) -> Result<(u16, u16)> {
    // SAFETY: ioctl writes a winsize struct through the pointer we pass; the
    // struct lives on the stack for the duration of the call.
    unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(anyhow::Error::from(std::io::Error::last_os_error())
                .context("ioctl(TIOCGWINSZ) failed"));
        }
        let cols = if winsz.ws_col == 0 {
            DEFAULT_TERM_WIDTH_CELLS
        } else {
            winsz.ws_col
        };
        let rows = if winsz.ws_row == 0 {
            DEFAULT_TERM_HEIGHT_CELLS
        } else {
            winsz.ws_row
        };
        Ok((cols, rows))
    }
}

/// Restores the terminal even when the application unwinds.
impl Drop for ConsoleIo {
    fn drop(&mut self) {
        if self.original_termios.is_some() {
            debug!("ConsoleIo dropped before cleanup; restoring terminal now.");
            if let Err(e) = self.cleanup() {
                error!("Error during cleanup in drop: {}", e);
            }
        }
    }
}

// src/frontend/input.rs

//! Decodes raw stdin bytes into [`KeyEvent`]s.
//!
//! Raw mode hands us unparsed byte chunks: printable ASCII, C0 control
//! bytes, and multi-byte escape sequences for the arrow and shifted keys.
//! The decoder is a small state machine over a carry buffer so a CSI
//! sequence split across two reads still decodes once the tail arrives.
//!
//! A chunk that ends in a bare ESC is reported as the Escape key rather
//! than held back: terminals transmit a full escape sequence in one write,
//! so a trailing lone ESC is the user pressing the key, and holding it
//! would make Escape feel dead until the next key press.

use log::trace;

use crate::keys::{KeyEvent, KeySymbol, Modifiers};

const ESC: u8 = 0x1b;

/// Outcome of decoding one event from the front of the buffer.
enum Step {
    /// An event was produced from the first `usize` bytes.
    Event(KeyEvent, usize),
    /// The buffer starts a CSI sequence whose final byte has not arrived.
    Incomplete,
}

/// Stateful byte-to-key decoder. One instance per input stream.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        KeyDecoder::default()
    }

    /// Appends a chunk of raw bytes and returns every key event that is now
    /// complete. An unfinished escape sequence carries over to the next feed.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        self.pending.extend_from_slice(bytes);
        let mut events = Vec::new();
        while !self.pending.is_empty() {
            match decode_front(&self.pending) {
                Step::Event(event, consumed) => {
                    trace!("Decoded {:?} from {} bytes", event, consumed);
                    self.pending.drain(..consumed);
                    events.push(event);
                }
                Step::Incomplete => break,
            }
        }
        events
    }
}

/// Decodes a single event from the front of `buffer`, which is non-empty.
fn decode_front(buffer: &[u8]) -> Step {
    let byte = buffer[0];
    if byte == ESC {
        return decode_escape(buffer);
    }
    let event = match byte {
        b'\r' | b'\n' => KeyEvent::plain(KeySymbol::Enter),
        b'\t' => KeyEvent::plain(KeySymbol::Tab),
        // Terminals disagree on which byte backspace sends.
        0x08 | 0x7f => KeyEvent::plain(KeySymbol::Backspace),
        // C0 controls map back to Ctrl plus the letter, so 0x03 becomes
        // Ctrl+C and quits through the same path as the letter keys.
        0x01..=0x1a => KeyEvent::with_modifiers(
            KeySymbol::Char((byte - 0x01 + b'a') as char),
            Modifiers::CONTROL,
        ),
        0x20..=0x7e => KeyEvent::plain(KeySymbol::Char(byte as char)),
        _ => KeyEvent::plain(KeySymbol::Unknown),
    };
    Step::Event(event, 1)
}

/// Decodes a sequence starting with ESC.
fn decode_escape(buffer: &[u8]) -> Step {
    match buffer.get(1) {
        // Bare ESC at the end of a chunk is the Escape key.
        None => Step::Event(KeyEvent::plain(KeySymbol::Escape), 1),
        Some(b'[') => decode_csi(buffer),
        // SS3 sequences (F-keys, application-mode arrows) are three bytes.
        Some(b'O') => match buffer.get(2) {
            None => Step::Incomplete,
            Some(byte) => {
                trace!("Ignoring SS3 sequence with final byte {:#04x}", byte);
                Step::Event(KeyEvent::plain(KeySymbol::Unknown), 3)
            }
        },
        // ESC followed by anything else: report Escape and leave the rest
        // of the chunk to decode on its own.
        Some(_) => Step::Event(KeyEvent::plain(KeySymbol::Escape), 1),
    }
}

/// Decodes a CSI sequence (`ESC [`), consuming parameter and intermediate
/// bytes through the final byte so multi-parameter sequences like Shift+Up
/// (`ESC [ 1 ; 2 A`) do not bleed their tails into the key stream.
fn decode_csi(buffer: &[u8]) -> Step {
    let mut idx = 2;
    while let Some(&byte) = buffer.get(idx) {
        match byte {
            // Parameter (0x30-0x3f) and intermediate (0x20-0x2f) bytes.
            0x20..=0x3f => idx += 1,
            // Final byte terminates the sequence.
            0x40..=0x7e => {
                let event = if idx == 2 {
                    match byte {
                        b'A' => KeyEvent::plain(KeySymbol::Up),
                        b'B' => KeyEvent::plain(KeySymbol::Down),
                        b'C' => KeyEvent::plain(KeySymbol::Right),
                        b'D' => KeyEvent::plain(KeySymbol::Left),
                        b'Z' => KeyEvent::with_modifiers(KeySymbol::Tab, Modifiers::SHIFT),
                        other => {
                            trace!("Ignoring CSI sequence with final byte {:#04x}", other);
                            KeyEvent::plain(KeySymbol::Unknown)
                        }
                    }
                } else {
                    trace!(
                        "Ignoring parameterized CSI sequence of {} bytes",
                        idx + 1
                    );
                    KeyEvent::plain(KeySymbol::Unknown)
                };
                return Step::Event(event, idx + 1);
            }
            // Malformed sequence. Drop what we have and let the offending
            // byte decode on its own.
            _ => return Step::Event(KeyEvent::plain(KeySymbol::Unknown), idx),
        }
    }
    Step::Incomplete
}

//! Byte-stream key decoding for raw terminal input.
//!
//! Raw mode hands us single bytes. Everything except the escape-prefixed
//! arrow and forward-delete sequences maps one byte to one key.

use std::io::{self, Read};

pub const INTERRUPT: u8 = 0x03;
pub const BACKSPACE: u8 = 0x7f;
pub const ESCAPE: u8 = 0x1b;
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const LINE_FEED: u8 = b'\n';

/// One logical key decoded from the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII, space through tilde.
    Char(char),
    Enter,
    Interrupt,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    DeleteForward,
    /// Anything else; ignored by the editor.
    Other,
}

/// Single-byte reader with one byte of push-back.
#[derive(Debug)]
pub struct ByteSource<R> {
    inner: R,
    pending: Option<u8>,
}

impl<R: Read> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    /// Next byte, or `None` at end of stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Return `byte` from the next [`Self::next_byte`] call.
    pub fn push_back(&mut self, byte: u8) {
        self.pending = Some(byte);
    }

    /// Decode the next key, or `None` at end of stream.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        let Some(byte) = self.next_byte()? else {
            return Ok(None);
        };
        let key = match byte {
            CARRIAGE_RETURN | LINE_FEED => Key::Enter,
            INTERRUPT => Key::Interrupt,
            BACKSPACE => Key::Backspace,
            ESCAPE => self.read_escape()?,
            b' '..=b'~' => Key::Char(char::from(byte)),
            _ => Key::Other,
        };
        Ok(Some(key))
    }

    fn read_escape(&mut self) -> io::Result<Key> {
        let (Some(first), Some(second)) = (self.next_byte()?, self.next_byte()?) else {
            return Ok(Key::Other);
        };
        let key = match (first, second) {
            (b'[', b'A') => Key::Up,
            (b'[', b'B') => Key::Down,
            (b'[', b'C') => Key::Right,
            (b'[', b'D') => Key::Left,
            _ => match self.next_byte()? {
                Some(b'~') if first == b'[' && second == b'3' => Key::DeleteForward,
                Some(third) => {
                    self.push_back(third);
                    Key::Other
                }
                None => Key::Other,
            },
        };
        Ok(key)
    }
}

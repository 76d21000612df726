use std::io::{self, Read};

/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    /// Ctrl-C
    Interrupt,
    /// Ctrl-D
    EndOfFile,
    /// Escape sequences and other control bytes the editor does not handle.
    Ignored,
}

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;
const BS: u8 = 0x08;
const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

/// Decodes a raw byte stream into keys, one UTF-8 character at a time.
pub struct KeyReader<R> {
    inner: R,
}

impl<R: Read> KeyReader<R> {
    pub fn new(inner: R) -> Self {
        KeyReader { inner }
    }

    /// `Ok(None)` once the stream is exhausted.
    pub fn next_key(&mut self) -> io::Result<Option<Key>> {
        let Some(byte) = self.read_byte()? else {
            return Ok(None);
        };

        let key = match byte {
            CTRL_C => Key::Interrupt,
            CTRL_D => Key::EndOfFile,
            b'\r' | b'\n' => Key::Enter,
            b'\t' => Key::Tab,
            BS | DEL => Key::Backspace,
            ESC => {
                self.skip_escape_sequence()?;
                Key::Ignored
            }
            0x00..=0x1f => Key::Ignored,
            0x20..=0x7e => Key::Char(byte as char),
            _ => self.read_utf8(byte)?,
        };
        Ok(Some(key))
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    // CSI (`ESC [ params final`) and SS3 (`ESC O x`) as sent by arrow and
    // function keys. Anything else after ESC is dropped with it.
    fn skip_escape_sequence(&mut self) -> io::Result<()> {
        match self.read_byte()? {
            Some(b'[') => {
                while let Some(b) = self.read_byte()? {
                    if (0x40..=0x7e).contains(&b) {
                        break;
                    }
                }
            }
            Some(b'O') => {
                self.read_byte()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn read_utf8(&mut self, lead: u8) -> io::Result<Key> {
        let width = match lead {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Ok(Key::Ignored),
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.read_byte()? {
                Some(b) => *slot = b,
                None => return Ok(Key::Ignored),
            }
        }

        Ok(std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Key::Ignored, Key::Char))
    }
}

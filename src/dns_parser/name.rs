use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::str::from_utf8;

use byteorder::WriteBytesExt;

use super::Error;

/// Longest allowed label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;
/// Longest allowed encoded name, terminator included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0b1100_0000;

/// A domain name decoded out of a packet (or built from a string).
///
/// Stored as its sequence of labels. Compression pointers are resolved
/// during `scan`, so an encoded `Name` is always a plain run of
/// length-prefixed labels with a zero terminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    /// Decodes a name starting at `offset` in `packet`.
    ///
    /// Returns the name and the offset of the first byte after it in the
    /// caller's section. When the name contains a compression pointer the
    /// returned offset is just past the two pointer bytes, no matter where
    /// in the packet the pointed-to labels live.
    pub fn scan(packet: &[u8], offset: usize) -> Result<(Name, usize), Error> {
        let mut labels = Vec::new();
        // terminating zero byte
        let mut encoded_len = 1;
        let mut pos = offset;
        let mut next_offset = None;

        loop {
            let byte = *packet.get(pos).ok_or(Error::UnexpectedEof)?;
            if byte == 0 {
                return Ok((Name { labels }, next_offset.unwrap_or(pos + 1)));
            } else if byte & POINTER_MASK == POINTER_MASK {
                let low = *packet.get(pos + 1).ok_or(Error::UnexpectedEof)?;
                let target = u16::from_be_bytes([byte & !POINTER_MASK, low]) as usize;
                // Only backward jumps are allowed; anything else could loop.
                if target >= pos {
                    return Err(Error::PointerNotBackward { at: pos, target });
                }
                if next_offset.is_none() {
                    next_offset = Some(pos + 2);
                }
                pos = target;
            } else if byte & POINTER_MASK == 0 {
                let end = pos + 1 + byte as usize;
                let label = packet.get(pos + 1..end).ok_or(Error::UnexpectedEof)?;
                encoded_len += 1 + label.len();
                if encoded_len > MAX_NAME_LEN {
                    return Err(Error::NameTooLong);
                }
                let label = from_utf8(label).map_err(|_| Error::LabelIsNotAscii)?;
                labels.push(label.to_owned());
                pos = end;
            } else {
                return Err(Error::UnknownLabelFormat);
            }
        }
    }

    /// Builds a name from dotted notation, enforcing the label and name
    /// length limits. An empty string is the root name.
    pub fn from_str<T: AsRef<str>>(name: T) -> Result<Name, Error> {
        let name = name.as_ref();
        if name.is_empty() {
            return Ok(Name { labels: Vec::new() });
        }

        let mut labels = Vec::new();
        let mut encoded_len = 1;
        for part in name.split('.') {
            if part.is_empty() || part.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong);
            }
            encoded_len += 1 + part.len();
            if encoded_len > MAX_NAME_LEN {
                return Err(Error::NameTooLong);
            }
            labels.push(part.to_owned());
        }
        Ok(Name { labels })
    }

    /// Writes the name as length-prefixed labels with a zero terminator.
    /// Never emits compression pointers.
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for label in &self.labels {
            writer.write_u8(label.len() as u8)?;
            writer.write_all(label.as_bytes())?;
        }
        writer.write_u8(0)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for Name {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i != 0 {
                fmt.write_char('.')?;
            }
            fmt.write_str(label)?;
        }
        Ok(())
    }
}

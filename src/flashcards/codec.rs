//! Text encoding of a deck file
//!
//! ```text
//! <cursor level> <cursor index> <text size>\n
//! <hard count>\n
//! <normal count>\n
//! <good count>\n
//! label=transcript\n      (hard cards, then normal, then good)
//! ```
//!
//! Fields are written verbatim, so neither a label nor a transcript may
//! contain `=` or a newline.

use std::io::{self, Write};

use thiserror::Error;

use super::models::{Cursor, MemoryLevel};

const DELIMITER: u8 = b'=';
const NEWLINE: u8 = b'\n';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("line {line}: unexpected end of file")]
    UnexpectedEof { line: usize },

    #[error("line {line}: missing '=' between label and transcript")]
    MissingDelimiter { line: usize },

    #[error("line {line}: invalid header: {reason}")]
    InvalidHeader { line: usize, reason: String },

    #[error("line {line}: text is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("line {line}: data after the last declared card")]
    TrailingData { line: usize },

    #[error("header declares {declared} bytes of card text, records hold {actual}")]
    SizeMismatch { declared: usize, actual: usize },
}

/// Everything stored ahead of the card records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoHeader {
    pub cursor: Cursor,
    pub textbuf_size: usize,
    /// Card count per level, in bucket order
    pub counts: [usize; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Label,
    Transcript,
}

/// Check that `text` can be stored as a card field without ambiguity
pub fn validate_field(kind: FieldKind, text: &str) -> Result<(), String> {
    let name = match kind {
        FieldKind::Label => "label",
        FieldKind::Transcript => "transcript",
    };
    if kind == FieldKind::Label && text.is_empty() {
        return Err("label must not be empty".to_string());
    }
    if text.contains(DELIMITER as char) {
        return Err(format!("{} must not contain '='", name));
    }
    if text.contains(NEWLINE as char) {
        return Err(format!("{} must not contain a line break", name));
    }
    Ok(())
}

pub fn write_header<W: Write>(w: &mut W, header: &RepoHeader) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {}",
        header.cursor.level.index(),
        header.cursor.index,
        header.textbuf_size
    )?;
    for count in header.counts {
        writeln!(w, "{}", count)?;
    }
    Ok(())
}

pub fn write_card<W: Write>(w: &mut W, label: &str, transcript: &str) -> io::Result<()> {
    w.write_all(label.as_bytes())?;
    w.write_all(&[DELIMITER])?;
    w.write_all(transcript.as_bytes())?;
    w.write_all(&[NEWLINE])
}

/// Sequential decoder over the bytes of a deck file
pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, line: 1 }
    }

    /// Line number of the next record (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn read_header(&mut self) -> Result<RepoHeader, CodecError> {
        let first_line = self.line;
        let first = self.next_line()?;
        let fields: Vec<&str> = first.split(' ').collect();
        let [level, index, size] = fields[..] else {
            return Err(CodecError::InvalidHeader {
                line: first_line,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        };

        let level = parse_number(level, first_line, "cursor level")?;
        let level = MemoryLevel::from_index(level).ok_or_else(|| CodecError::InvalidHeader {
            line: first_line,
            reason: format!("cursor level {} out of range", level),
        })?;
        let index = parse_number(index, first_line, "cursor index")?;
        let textbuf_size = parse_number(size, first_line, "text size")?;

        let mut counts = [0; 3];
        for (count, level) in counts.iter_mut().zip(MemoryLevel::ALL) {
            let line = self.line;
            let text = self.next_line()?;
            *count = parse_number(text, line, level.as_str())?;
        }

        Ok(RepoHeader {
            cursor: Cursor::new(level, index),
            textbuf_size,
            counts,
        })
    }

    /// Decode one `label=transcript` record
    pub fn read_card(&mut self) -> Result<(&'a str, &'a str), CodecError> {
        let line = self.line;
        let record = self.next_raw_line()?;
        let split = record
            .iter()
            .position(|&b| b == DELIMITER)
            .ok_or(CodecError::MissingDelimiter { line })?;

        let label = std::str::from_utf8(&record[..split]).map_err(|_| CodecError::InvalidUtf8 { line })?;
        let transcript =
            std::str::from_utf8(&record[split + 1..]).map_err(|_| CodecError::InvalidUtf8 { line })?;
        Ok((label, transcript))
    }

    /// Succeeds only if every byte has been consumed
    pub fn finish(self) -> Result<(), CodecError> {
        if self.pos < self.buf.len() {
            return Err(CodecError::TrailingData { line: self.line });
        }
        Ok(())
    }

    fn next_line(&mut self) -> Result<&'a str, CodecError> {
        let line = self.line;
        let raw = self.next_raw_line()?;
        std::str::from_utf8(raw).map_err(|_| CodecError::InvalidUtf8 { line })
    }

    /// Bytes up to the next newline, which is consumed but not returned
    fn next_raw_line(&mut self) -> Result<&'a [u8], CodecError> {
        let rest = &self.buf[self.pos..];
        let end = rest
            .iter()
            .position(|&b| b == NEWLINE)
            .ok_or(CodecError::UnexpectedEof { line: self.line })?;
        self.pos += end + 1;
        self.line += 1;
        Ok(&rest[..end])
    }
}

fn parse_number(text: &str, line: usize, what: &str) -> Result<usize, CodecError> {
    // `usize::from_str` accepts a leading '+', the format does not
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidHeader {
            line,
            reason: format!("{} is not a number: {:?}", what, text),
        });
    }
    text.parse().map_err(|_| CodecError::InvalidHeader {
        line,
        reason: format!("{} is out of range: {}", what, text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_header(header: &RepoHeader) -> Vec<u8> {
        let mut out = Vec::new();
        write_header(&mut out, header).unwrap();
        out
    }

    #[test]
    fn test_empty_header_format() {
        assert_eq!(encode_header(&RepoHeader::default()), b"0 0 0\n0\n0\n0\n");
    }

    #[test]
    fn test_header_roundtrip() {
        let header = RepoHeader {
            cursor: Cursor::new(MemoryLevel::Normal, 7),
            textbuf_size: 1234,
            counts: [3, 9, 27],
        };
        let bytes = encode_header(&header);
        assert_eq!(bytes, b"1 7 1234\n3\n9\n27\n");

        let mut reader = RecordReader::new(&bytes);
        assert_eq!(reader.read_header().unwrap(), header);
        assert_eq!(reader.line(), 5);
        reader.finish().unwrap();
    }

    #[test]
    fn test_card_record() {
        let mut out = Vec::new();
        write_card(&mut out, "chien", "dog").unwrap();
        assert_eq!(out, b"chien=dog\n");

        let mut reader = RecordReader::new(&out);
        assert_eq!(reader.read_card().unwrap(), ("chien", "dog"));
        reader.finish().unwrap();
    }

    #[test]
    fn test_label_ends_at_first_delimiter() {
        let mut reader = RecordReader::new(b"a=b=c\n");
        assert_eq!(reader.read_card().unwrap(), ("a", "b=c"));
    }

    #[test]
    fn test_missing_delimiter() {
        let mut reader = RecordReader::new(b"chien dog\n");
        assert_eq!(
            reader.read_card().unwrap_err(),
            CodecError::MissingDelimiter { line: 1 }
        );
    }

    #[test]
    fn test_missing_final_newline() {
        let mut reader = RecordReader::new(b"chat=cat\nchien=dog");
        reader.read_card().unwrap();
        assert_eq!(
            reader.read_card().unwrap_err(),
            CodecError::UnexpectedEof { line: 2 }
        );
    }

    #[test]
    fn test_truncated_header() {
        let mut reader = RecordReader::new(b"0 0 0\n1\n");
        assert_eq!(
            reader.read_header().unwrap_err(),
            CodecError::UnexpectedEof { line: 3 }
        );
    }

    #[test]
    fn test_invalid_headers() {
        let cases: &[&[u8]] = &[
            b"0 0\n0\n0\n0\n",
            b"0 0 0 0\n0\n0\n0\n",
            b"3 0 0\n0\n0\n0\n",
            b"0 -1 0\n0\n0\n0\n",
            b"0 0 +4\n0\n0\n0\n",
            b"0 0 0\nx\n0\n0\n",
            b"0  0 0\n0\n0\n0\n",
        ];
        for case in cases {
            let mut reader = RecordReader::new(case);
            assert!(
                matches!(reader.read_header(), Err(CodecError::InvalidHeader { .. })),
                "accepted {:?}",
                String::from_utf8_lossy(case)
            );
        }
    }

    #[test]
    fn test_invalid_utf8_record() {
        let mut reader = RecordReader::new(b"ch\xffat=cat\n");
        assert_eq!(
            reader.read_card().unwrap_err(),
            CodecError::InvalidUtf8 { line: 1 }
        );
    }

    #[test]
    fn test_trailing_data() {
        let mut reader = RecordReader::new(b"a=b\nc=d\n");
        reader.read_card().unwrap();
        assert_eq!(reader.finish().unwrap_err(), CodecError::TrailingData { line: 2 });
    }

    #[test]
    fn test_validate_field() {
        assert!(validate_field(FieldKind::Label, "chat").is_ok());
        assert!(validate_field(FieldKind::Transcript, "").is_ok());
        assert!(validate_field(FieldKind::Label, "").is_err());
        assert!(validate_field(FieldKind::Label, "a=b").is_err());
        assert!(validate_field(FieldKind::Transcript, "two\nlines").is_err());
    }
}

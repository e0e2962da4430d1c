//! The flat frequency-table file: one `<word> <frequency>` entry per line.
//!
//! Malformed lines are skipped with a warning. Bad training data degrades
//! the lexicon but never aborts a run.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::error::{LexicaError, Result};

/// Whether `word` can be stored in a frequency table.
pub fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && !word.contains([' ', '\n', '\r'])
}

/// Parse one `<word><space><frequency>` line.
pub fn parse_line(line: &str) -> Result<(String, u64)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (word, frequency) = line
        .split_once(' ')
        .ok_or_else(|| LexicaError::parse("missing frequency"))?;
    if word.is_empty() {
        return Err(LexicaError::parse("empty word"));
    }
    let frequency = frequency
        .parse::<u64>()
        .map_err(|e| LexicaError::parse(format!("invalid frequency '{frequency}': {e}")))?;
    Ok((word.to_string(), frequency))
}

/// Read every well-formed entry from `reader`.
pub fn read_frequency_table_from<R: BufRead>(mut reader: R) -> Result<Vec<(String, u64)>> {
    let mut entries = Vec::new();
    let mut buffer = Vec::new();
    let mut line_number = 0usize;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;
        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }

        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line,
            Err(e) => {
                warn!("skipping frequency table line {line_number}: {e}");
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("skipping frequency table line {line_number}: {e}"),
        }
    }

    Ok(entries)
}

/// Read a frequency-table file.
pub fn read_frequency_table<P: AsRef<Path>>(path: P) -> Result<Vec<(String, u64)>> {
    let file = File::open(path)?;
    read_frequency_table_from(BufReader::new(file))
}

/// Write entries to `writer`, skipping words that cannot be stored.
///
/// Returns the number of entries written.
pub fn write_frequency_table_to<W, I, S>(writer: &mut W, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = (S, u64)>,
    S: AsRef<str>,
{
    let mut written = 0;
    for (word, frequency) in entries {
        let word = word.as_ref();
        if !is_valid_word(word) {
            warn!("not writing invalid word {word:?} to frequency table");
            continue;
        }
        writeln!(writer, "{word} {frequency}")?;
        written += 1;
    }
    Ok(written)
}

/// Write a frequency-table file.
pub fn write_frequency_table<P, I, S>(path: P, entries: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (S, u64)>,
    S: AsRef<str>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    let written = write_frequency_table_to(&mut writer, entries)?;
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("hello 42").unwrap(), ("hello".to_string(), 42));
        assert_eq!(parse_line("词语 7\r").unwrap(), ("词语".to_string(), 7));
        assert!(parse_line("hello").is_err());
        assert!(parse_line("hello x").is_err());
        assert!(parse_line(" 5").is_err());
        assert!(parse_line("two words 5").is_err());
        assert!(parse_line("hello -3").is_err());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let mut data = b"good 3\nno_frequency\nbad words 4\n\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b' ', b'1', b'\n']);
        data.extend_from_slice("也好 9".as_bytes());

        let entries = read_frequency_table_from(Cursor::new(data)).unwrap();
        assert_eq!(
            entries,
            vec![("good".to_string(), 3), ("也好".to_string(), 9)]
        );
    }

    #[test]
    fn test_write_then_read_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let written = write_frequency_table(
            temp_file.path(),
            vec![("alpha", 5), ("has space", 1), ("beta", 2), ("", 4)],
        )
        .unwrap();
        assert_eq!(written, 2);

        let entries = read_frequency_table(temp_file.path()).unwrap();
        assert_eq!(
            entries,
            vec![("alpha".to_string(), 5), ("beta".to_string(), 2)]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_frequency_table("/definitely/not/here.freq").is_err());
    }
}

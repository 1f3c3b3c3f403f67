//! The persisted document frequency table.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use bitsift_common::{error::Error, result::verify_entry, Result};
use bitsift_term_model::Term;
use itertools::Itertools;

/// One row of the table: a term and the proportion of corpus documents that
/// contain it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentFrequencyTableEntry {
    term: Term,
    frequency: f64,
}

impl DocumentFrequencyTableEntry {
    pub fn term(&self) -> Term {
        self.term
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

/// A document frequency table previously persisted by the corpus-analysis
/// step.
///
/// The persisted form is one entry per line, with comma-separated fields:
///
/// ```text
/// <term hash, 16 hex digits>,<gram size>,<stream id>,<frequency>
/// ```
///
/// Entries must be ordered by non-increasing frequency, which lets the
/// TermTable builder assign the most valuable row space to the most common
/// terms in a single forward pass. The loader verifies the order and every
/// field, materializes all entries, and derives each term's IDF class from
/// its parsed frequency. Blank lines are tolerated.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequencyTable {
    entries: Vec<DocumentFrequencyTableEntry>,
}

impl DocumentFrequencyTable {
    /// Reads a table from a buffered stream.
    ///
    /// # Errors
    ///
    /// Returns a `Format` error naming the offending line when a field is
    /// malformed, a frequency is non-finite or outside `[0, 1]`, or the
    /// frequency order ascends. Stream failures surface as `Io` errors.
    pub fn read_from<R: BufRead>(reader: R) -> Result<DocumentFrequencyTable> {
        let mut entries = Vec::new();
        let mut previous_frequency = f64::INFINITY;
        for (index, line) in reader.lines().enumerate() {
            let line_number = index as u64 + 1;
            let line = line.map_err(|e| Error::io("document frequency table", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_entry(line_number, &line)?;
            verify_entry(
                entry.frequency <= previous_frequency,
                line_number,
                "non-monotonic frequency",
            )?;
            previous_frequency = entry.frequency;
            entries.push(entry);
        }
        Ok(DocumentFrequencyTable { entries })
    }

    /// Reads a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<DocumentFrequencyTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        DocumentFrequencyTable::read_from(BufReader::new(file))
    }

    /// Writes the table in the persisted line format. Frequencies are emitted
    /// in the shortest decimal form that parses back to the identical `f64`,
    /// so a write/read round trip reproduces every entry exactly.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            let term = entry.term;
            writeln!(
                writer,
                "{:016X},{},{},{}",
                term.hash(),
                term.gram_size(),
                term.stream_id(),
                entry.frequency
            )
            .map_err(|e| Error::io("document frequency table", e))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentFrequencyTableEntry> {
        self.entries.get(index)
    }

    /// Iterates entries in file order, most frequent first.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentFrequencyTableEntry> {
        self.entries.iter()
    }
}

impl std::ops::Index<usize> for DocumentFrequencyTable {
    type Output = DocumentFrequencyTableEntry;

    fn index(&self, index: usize) -> &DocumentFrequencyTableEntry {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a DocumentFrequencyTable {
    type Item = &'a DocumentFrequencyTableEntry;
    type IntoIter = std::slice::Iter<'a, DocumentFrequencyTableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn parse_entry(line_number: u64, line: &str) -> Result<DocumentFrequencyTableEntry> {
    let Some((hash_text, gram_text, stream_text, frequency_text)) =
        line.split(',').collect_tuple()
    else {
        return Err(Error::format(line_number, "expected 4 comma-separated fields"));
    };

    verify_entry(
        hash_text.len() == 16 && hash_text.bytes().all(|b| b.is_ascii_hexdigit()),
        line_number,
        "malformed term hash",
    )?;
    let hash = u64::from_str_radix(hash_text, 16)
        .map_err(|_| Error::format(line_number, "malformed term hash"))?;

    let gram_size: u8 = gram_text
        .parse()
        .map_err(|_| Error::format(line_number, "malformed gram size"))?;
    let stream_id: u8 = stream_text
        .parse()
        .map_err(|_| Error::format(line_number, "malformed stream id"))?;

    let frequency: f64 = frequency_text
        .parse()
        .map_err(|_| Error::format(line_number, "malformed frequency"))?;
    verify_entry(
        frequency.is_finite() && (0.0..=1.0).contains(&frequency),
        line_number,
        "frequency outside [0, 1]",
    )?;

    Ok(DocumentFrequencyTableEntry {
        term: Term::new(hash, gram_size, stream_id, frequency),
        frequency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitsift_common::error::ErrorKind;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::io::Cursor;

    fn read(text: &str) -> Result<DocumentFrequencyTable> {
        DocumentFrequencyTable::read_from(Cursor::new(text))
    }

    #[test]
    fn test_read_well_formed() {
        let table = read(
            "000000000000CAFE,1,0,0.5\n\
             000000000000BEEF,2,1,0.25\n\
             000000000000F00D,1,0,0.25\n",
        )
        .unwrap();
        assert_eq!(table.len(), 3);

        let first = &table[0];
        assert_eq!(first.term().hash(), 0xCAFE);
        assert_eq!(first.term().gram_size(), 1);
        assert_eq!(first.term().stream_id(), 0);
        assert_eq!(first.frequency(), 0.5);

        let second = table.get(1).unwrap();
        assert_eq!(second.term().hash(), 0xBEEF);
        assert_eq!(second.term().gram_size(), 2);
        assert_eq!(second.term().stream_id(), 1);

        // Ties in frequency are legal; the order is non-increasing.
        assert_eq!(table[2].frequency(), 0.25);
    }

    #[test]
    fn test_idf_derived_from_frequency() {
        let table = read("000000000000CAFE,1,0,0.01\n").unwrap();
        assert_eq!(table[0].term().idf(), 20);
    }

    #[test]
    fn test_blank_lines_tolerated() {
        let table = read("000000000000CAFE,1,0,0.5\n\n000000000000BEEF,1,0,0.4\n\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rejects_ascending_frequency() {
        let result = read(
            "000000000000BEEF,1,0,0.5\n\
             000000000000CAFE,1,0,0.6\n",
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            ErrorKind::Format { line: 2, .. }
        ));
    }

    #[test]
    fn test_rejects_malformed_hash() {
        // Too short.
        assert!(read("CAFE,1,0,0.5\n").is_err());
        // Right length, not hex.
        assert!(read("00000000000ZCAFE,1,0,0.5\n").is_err());
        // Sign characters are not hex digits.
        assert!(read("+00000000000CAFE,1,0,0.5\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_fields() {
        assert!(read("000000000000CAFE,999,0,0.5\n").is_err());
        assert!(read("000000000000CAFE,1,x,0.5\n").is_err());
        assert!(read("000000000000CAFE,1,0\n").is_err());
        assert!(read("000000000000CAFE,1,0,0.5,extra\n").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_frequency() {
        assert!(read("000000000000CAFE,1,0,1.5\n").is_err());
        assert!(read("000000000000CAFE,1,0,-0.5\n").is_err());
        assert!(read("000000000000CAFE,1,0,NaN\n").is_err());
        assert!(read("000000000000CAFE,1,0,inf\n").is_err());
    }

    #[test]
    fn test_error_carries_line_number() {
        let result = read(
            "000000000000CAFE,1,0,0.5\n\
             \n\
             000000000000BEEF,1,0,bogus\n",
        );
        assert!(matches!(
            result.unwrap_err().kind(),
            ErrorKind::Format { line: 3, .. }
        ));
    }

    #[test]
    fn test_write_read_round_trip() {
        let original = read(
            "000000000000CAFE,1,0,0.5\n\
             000000000000BEEF,2,1,0.1\n\
             000000000000F00D,1,0,0.0001\n",
        )
        .unwrap();

        let mut buffer = Vec::new();
        original.write_to(&mut buffer).unwrap();
        let reloaded = DocumentFrequencyTable::read_from(Cursor::new(buffer)).unwrap();

        assert_eq!(reloaded.len(), original.len());
        for (a, b) in original.iter().zip(reloaded.iter()) {
            assert_eq!(a.term(), b.term());
            assert_eq!(a.frequency().to_bits(), b.frequency().to_bits());
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut frequencies: Vec<f64> = (0..200).map(|_| rng.random_range(0.0..1.0)).collect();
        frequencies.sort_by(|a, b| b.partial_cmp(a).unwrap());

        let mut text = String::new();
        for (i, frequency) in frequencies.iter().enumerate() {
            text.push_str(&format!("{:016X},1,0,{}\n", i as u64, frequency));
        }
        let original = read(&text).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc_frequencies.csv");
        let mut file = File::create(&path).unwrap();
        original.write_to(&mut file).unwrap();
        drop(file);

        let reloaded = DocumentFrequencyTable::load(&path).unwrap();
        assert_eq!(reloaded.len(), original.len());
        for (a, b) in original.iter().zip(reloaded.iter()) {
            assert_eq!(a.term(), b.term());
            assert_eq!(a.frequency().to_bits(), b.frequency().to_bits());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = DocumentFrequencyTable::load(dir.path().join("absent.csv"));
        assert!(matches!(
            result.unwrap_err().kind(),
            ErrorKind::Io { .. }
        ));
    }
}

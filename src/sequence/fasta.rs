// Tue Jan 13 2026 - Alex

use crate::sequence::provider::{check_bounds, SequenceProvider};
use crate::sequence::SequenceError;
use ahash::AHashMap;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One line of a samtools-style `.fai` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaiEntry {
    pub length: u64,
    pub offset: u64,
    pub line_bases: u64,
    pub line_bytes: u64,
}

impl FaiEntry {
    /// Byte offset in the FASTA file of the 0-based base position `pos0`.
    pub fn byte_position(&self, pos0: u64) -> u64 {
        self.offset + (pos0 / self.line_bases) * self.line_bytes + pos0 % self.line_bases
    }
}

#[derive(Debug, Clone, Default)]
pub struct FastaIndex {
    names: Vec<String>,
    entries: AHashMap<String, FaiEntry>,
}

impl FastaIndex {
    pub fn default_path(fasta: &Path) -> PathBuf {
        let mut name = fasta.as_os_str().to_os_string();
        name.push(".fai");
        PathBuf::from(name)
    }

    pub fn load(path: &Path) -> Result<Self, SequenceError> {
        let file = File::open(path).map_err(|e| {
            SequenceError::Index(format!("Could not open FASTA index '{}': {}", path.display(), e))
        })?;
        Self::parse(BufReader::new(file), &path.display().to_string())
    }

    pub fn parse<R: BufRead>(reader: R, source: &str) -> Result<Self, SequenceError> {
        let mut index = Self::default();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let cols: Vec<&str> = trimmed.split('\t').collect();
            if cols.len() < 5 {
                return Err(SequenceError::Index(format!(
                    "line {} in '{}': expected 5 tab-separated fields",
                    i + 1,
                    source
                )));
            }

            let field = |col: usize, label: &str| -> Result<u64, SequenceError> {
                cols[col].parse::<u64>().map_err(|e| {
                    SequenceError::Index(format!(
                        "invalid {} '{}' at line {} in '{}': {}",
                        label,
                        cols[col],
                        i + 1,
                        source,
                        e
                    ))
                })
            };

            let entry = FaiEntry {
                length: field(1, "length")?,
                offset: field(2, "offset")?,
                line_bases: field(3, "line_bases")?,
                line_bytes: field(4, "line_bytes")?,
            };

            if entry.line_bases == 0 || entry.line_bytes < entry.line_bases {
                return Err(SequenceError::Index(format!(
                    "line {} in '{}': line_bases must be > 0 and no larger than line_bytes",
                    i + 1,
                    source
                )));
            }

            index.insert(cols[0], entry)?;
        }

        if index.is_empty() {
            return Err(SequenceError::Index(format!("FASTA index '{}' is empty", source)));
        }

        Ok(index)
    }

    /// Scans a FASTA file once and derives its index.
    pub fn build(fasta: &Path) -> Result<Self, SequenceError> {
        let file = File::open(fasta)?;
        let mut reader = BufReader::new(file);
        let mut index = Self::default();
        let mut active: Option<(String, FaiEntry, bool)> = None;
        let mut byte_offset = 0u64;
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = reader.read_until(b'\n', &mut line)?;
            if bytes_read == 0 {
                break;
            }

            let mut end = line.len();
            while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
                end -= 1;
            }
            let stripped = &line[..end];

            if stripped.first() == Some(&b'>') {
                if let Some((name, entry, _)) = active.take() {
                    index.finish_record(fasta, name, entry)?;
                }

                let header = String::from_utf8_lossy(&stripped[1..]);
                let name = header
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| {
                        SequenceError::Index(format!(
                            "FASTA '{}' has a malformed header line",
                            fasta.display()
                        ))
                    })?
                    .to_string();

                active = Some((
                    name,
                    FaiEntry {
                        length: 0,
                        offset: 0,
                        line_bases: 0,
                        line_bytes: 0,
                    },
                    false,
                ));
            } else {
                let (_, entry, saw_short_line) = match active.as_mut() {
                    Some(record) => record,
                    None if stripped.is_empty() => {
                        byte_offset += bytes_read as u64;
                        continue;
                    }
                    None => {
                        return Err(SequenceError::Index(format!(
                            "FASTA '{}' contains sequence data before the first header",
                            fasta.display()
                        )))
                    }
                };

                let bases = stripped.len() as u64;
                if entry.line_bases == 0 {
                    if bases > 0 {
                        entry.offset = byte_offset;
                        entry.line_bases = bases;
                        entry.line_bytes = bytes_read as u64;
                    }
                } else if bases > 0 && (*saw_short_line || bases > entry.line_bases) {
                    return Err(SequenceError::Index(format!(
                        "FASTA '{}' has inconsistent line lengths",
                        fasta.display()
                    )));
                } else if bases < entry.line_bases {
                    *saw_short_line = true;
                }
                entry.length += bases;
            }

            byte_offset += bytes_read as u64;
        }

        if let Some((name, entry, _)) = active {
            index.finish_record(fasta, name, entry)?;
        }

        if index.is_empty() {
            return Err(SequenceError::Index(format!(
                "FASTA '{}' does not contain any sequence records",
                fasta.display()
            )));
        }

        Ok(index)
    }

    /// Loads `index_path` if present, otherwise builds the index and writes it there.
    pub fn load_or_build(fasta: &Path, index_path: &Path) -> Result<Self, SequenceError> {
        if index_path.exists() {
            return Self::load(index_path);
        }

        log::info!(
            "FASTA index '{}' not found, building it from '{}'",
            index_path.display(),
            fasta.display()
        );
        let index = Self::build(fasta)?;
        index.write(index_path)?;
        Ok(index)
    }

    pub fn write(&self, path: &Path) -> Result<(), SequenceError> {
        let mut writer = BufWriter::new(File::create(path)?);
        for name in &self.names {
            let e = &self.entries[name];
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}",
                name, e.length, e.offset, e.line_bases, e.line_bytes
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FaiEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert(&mut self, name: &str, entry: FaiEntry) -> Result<(), SequenceError> {
        if self.entries.contains_key(name) {
            return Err(SequenceError::Index(format!(
                "Contig [{}] listed twice in FASTA index",
                name
            )));
        }
        self.names.push(name.to_string());
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    fn finish_record(&mut self, fasta: &Path, name: String, entry: FaiEntry) -> Result<(), SequenceError> {
        if entry.length == 0 {
            return Err(SequenceError::Index(format!(
                "FASTA '{}' has empty sequence record '{}'",
                fasta.display(),
                name
            )));
        }
        self.insert(&name, entry)
    }
}

/// Memory-mapped FASTA with a `.fai` index. Clones share the mapping.
#[derive(Clone)]
pub struct IndexedFasta {
    path: PathBuf,
    mmap: Arc<Mmap>,
    index: Arc<FastaIndex>,
}

impl IndexedFasta {
    /// Opens `fasta` using `<fasta>.fai`, building the index when it does not exist.
    pub fn open(fasta: &Path) -> Result<Self, SequenceError> {
        Self::open_with_index(fasta, &FastaIndex::default_path(fasta))
    }

    pub fn open_with_index(fasta: &Path, index_path: &Path) -> Result<Self, SequenceError> {
        let index = FastaIndex::load_or_build(fasta, index_path)?;
        let file = File::open(fasta)?;
        let mmap = unsafe { Mmap::map(&file) }?;

        log::debug!(
            "Opened FASTA '{}' ({} contigs, {} bytes)",
            fasta.display(),
            index.len(),
            mmap.len()
        );

        Ok(Self {
            path: fasta.to_path_buf(),
            mmap: Arc::new(mmap),
            index: Arc::new(index),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> &FastaIndex {
        &self.index
    }

    fn entry(&self, contig: &str) -> Result<&FaiEntry, SequenceError> {
        self.index
            .get(contig)
            .ok_or_else(|| SequenceError::NotFound(contig.to_string()))
    }
}

impl SequenceProvider for IndexedFasta {
    fn fetch(&self, contig: &str, start0: u64, end1: u64) -> Result<String, SequenceError> {
        let entry = self.entry(contig)?;
        check_bounds(contig, start0, end1, entry.length)?;

        let first = entry.byte_position(start0) as usize;
        let last = entry.byte_position(end1 - 1) as usize;
        if last >= self.mmap.len() {
            return Err(SequenceError::fetch(
                contig,
                start0,
                end1,
                format!("'{}' is shorter than its index describes", self.path.display()),
            ));
        }

        let seq: String = self.mmap[first..=last]
            .iter()
            .filter(|&&b| b != b'\n' && b != b'\r')
            .map(|&b| char::from(b.to_ascii_uppercase()))
            .collect();

        let expected = (end1 - start0) as usize;
        if seq.len() != expected {
            return Err(SequenceError::fetch(
                contig,
                start0,
                end1,
                format!("expected {} bases, read {}", expected, seq.len()),
            ));
        }

        Ok(seq)
    }

    fn length(&self, contig: &str) -> Result<u64, SequenceError> {
        Ok(self.entry(contig)?.length)
    }

    fn contains(&self, contig: &str) -> bool {
        self.index.get(contig).is_some()
    }

    fn contig_names(&self) -> Vec<String> {
        self.index.names().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FASTA: &str = ">chr1 first contig\nACGTACGTAC\nggttaacc\n>chr2\nTTTTT\n";

    fn write_fasta(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("test.fa");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_build_index() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(dir.path(), FASTA);

        let index = FastaIndex::build(&fasta).unwrap();
        assert_eq!(index.names(), &["chr1".to_string(), "chr2".to_string()]);
        assert_eq!(
            index.get("chr1"),
            Some(&FaiEntry {
                length: 18,
                offset: 19,
                line_bases: 10,
                line_bytes: 11,
            })
        );
        assert_eq!(index.get("chr2").unwrap().offset, 45);
        assert_eq!(index.get("chr2").unwrap().length, 5);
    }

    #[test]
    fn test_index_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(dir.path(), FASTA);
        let index_path = FastaIndex::default_path(&fasta);
        assert!(index_path.to_string_lossy().ends_with("test.fa.fai"));

        let built = FastaIndex::load_or_build(&fasta, &index_path).unwrap();
        assert!(index_path.exists());

        let loaded = FastaIndex::load(&index_path).unwrap();
        assert_eq!(loaded.names(), built.names());
        assert_eq!(loaded.get("chr2"), built.get("chr2"));
    }

    #[test]
    fn test_fetch_across_line_breaks() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(dir.path(), FASTA);
        let reader = IndexedFasta::open(&fasta).unwrap();

        assert_eq!(reader.fetch("chr1", 0, 18).unwrap(), "ACGTACGTACGGTTAACC");
        assert_eq!(reader.fetch("chr1", 8, 12).unwrap(), "ACGG");
        assert_eq!(reader.fetch("chr2", 1, 3).unwrap(), "TT");
        assert_eq!(reader.length("chr1").unwrap(), 18);
        assert!(reader.contains("chr2"));
        assert_eq!(reader.contig_names(), vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_fetch_errors() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(dir.path(), FASTA);
        let reader = IndexedFasta::open(&fasta).unwrap();

        assert!(matches!(reader.fetch("chr9", 0, 1), Err(SequenceError::NotFound(_))));
        assert!(matches!(reader.fetch("chr1", 0, 19), Err(SequenceError::Range { .. })));
        assert!(matches!(reader.fetch("chr1", 5, 5), Err(SequenceError::Range { .. })));
    }

    #[test]
    fn test_truncated_fasta_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = write_fasta(dir.path(), ">chr1\nACGT\n");
        let index_path = dir.path().join("custom.fai");
        fs::write(&index_path, "chr1\t40\t6\t4\t5\n").unwrap();

        let reader = IndexedFasta::open_with_index(&fasta, &index_path).unwrap();
        assert!(matches!(reader.fetch("chr1", 0, 40), Err(SequenceError::Fetch { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        let duplicate = "chr1\t10\t6\t10\t11\nchr1\t10\t6\t10\t11\n";
        assert!(FastaIndex::parse(duplicate.as_bytes(), "dup").is_err());

        let short = "chr1\t10\t6\n";
        assert!(FastaIndex::parse(short.as_bytes(), "short").is_err());

        let zero = "chr1\t10\t6\t0\t1\n";
        assert!(FastaIndex::parse(zero.as_bytes(), "zero").is_err());

        let commented = "# comment\n\nchr1\t10\t6\t10\t11\n";
        assert_eq!(FastaIndex::parse(commented.as_bytes(), "ok").unwrap().len(), 1);
    }

    #[test]
    fn test_build_rejects_malformed_fasta() {
        let dir = tempfile::tempdir().unwrap();

        let headless = write_fasta(dir.path(), "ACGT\n>chr1\nACGT\n");
        assert!(FastaIndex::build(&headless).is_err());

        let ragged = write_fasta(dir.path(), ">chr1\nACGT\nAC\nACGT\n");
        assert!(FastaIndex::build(&ragged).is_err());

        let empty_record = write_fasta(dir.path(), ">chr1\n>chr2\nACGT\n");
        assert!(FastaIndex::build(&empty_record).is_err());
    }
}

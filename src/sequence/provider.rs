// Wed Jan 15 2026 - Alex

use crate::sequence::SequenceError;

/// Random-access, read-only view of named contigs.
///
/// Coordinates are half-open and 0-based: `fetch(contig, 0, 10)` returns the
/// first ten bases. Implementations return upper-cased bases with line breaks
/// removed and must be safe to share between worker threads.
pub trait SequenceProvider: Send + Sync {
    fn fetch(&self, contig: &str, start0: u64, end1: u64) -> Result<String, SequenceError>;
    fn length(&self, contig: &str) -> Result<u64, SequenceError>;
    fn contains(&self, contig: &str) -> bool;
    /// Contig names in storage order.
    fn contig_names(&self) -> Vec<String>;
}

pub(crate) fn check_bounds(contig: &str, start0: u64, end1: u64, length: u64) -> Result<(), SequenceError> {
    if end1 <= start0 {
        return Err(SequenceError::range(contig, start0, end1, "end must be greater than start"));
    }
    if end1 > length {
        return Err(SequenceError::range(
            contig,
            start0,
            end1,
            format!("end is past the contig length ({})", length),
        ));
    }
    Ok(())
}

/// Contigs held in memory as raw bytes, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySequences {
    contigs: Vec<(String, Vec<u8>)>,
}

impl InMemorySequences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contig(mut self, name: &str, sequence: &str) -> Self {
        self.insert(name, sequence);
        self
    }

    pub fn insert(&mut self, name: &str, sequence: &str) {
        let sequence: Vec<u8> = sequence
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_uppercase())
            .collect();

        match self.contigs.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = sequence,
            None => self.contigs.push((name.to_string(), sequence)),
        }
    }

    fn get(&self, contig: &str) -> Result<&[u8], SequenceError> {
        self.contigs
            .iter()
            .find(|(n, _)| n == contig)
            .map(|(_, s)| s.as_slice())
            .ok_or_else(|| SequenceError::NotFound(contig.to_string()))
    }
}

impl SequenceProvider for InMemorySequences {
    fn fetch(&self, contig: &str, start0: u64, end1: u64) -> Result<String, SequenceError> {
        let seq = self.get(contig)?;
        check_bounds(contig, start0, end1, seq.len() as u64)?;

        let bases = seq
            .get(start0 as usize..end1 as usize)
            .ok_or_else(|| SequenceError::range(contig, start0, end1, "range is outside the contig"))?;
        if let Some(pos) = bases.iter().position(|b| !b.is_ascii()) {
            return Err(SequenceError::fetch(
                contig,
                start0,
                end1,
                format!("non-ASCII byte at position {}", start0 + pos as u64),
            ));
        }
        Ok(bases.iter().map(|&b| char::from(b)).collect())
    }

    fn length(&self, contig: &str) -> Result<u64, SequenceError> {
        Ok(self.get(contig)?.len() as u64)
    }

    fn contains(&self, contig: &str) -> bool {
        self.contigs.iter().any(|(n, _)| n == contig)
    }

    fn contig_names(&self) -> Vec<String> {
        self.contigs.iter().map(|(n, _)| n.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_fetch() {
        let store = InMemorySequences::new()
            .with_contig("chr1", "acgt\nACGT")
            .with_contig("chr2", "TTTT");

        assert_eq!(store.fetch("chr1", 0, 4).unwrap(), "ACGT");
        assert_eq!(store.fetch("chr1", 2, 6).unwrap(), "GTAC");
        assert_eq!(store.length("chr1").unwrap(), 8);
        assert!(store.contains("chr2"));
        assert!(!store.contains("chr3"));
        assert_eq!(store.contig_names(), vec!["chr1", "chr2"]);
    }

    #[test]
    fn test_in_memory_errors() {
        let store = InMemorySequences::new().with_contig("chr1", "ACGT");

        assert!(matches!(store.fetch("chrX", 0, 1), Err(SequenceError::NotFound(_))));
        assert!(matches!(store.fetch("chr1", 2, 2), Err(SequenceError::Range { .. })));
        assert!(matches!(store.fetch("chr1", 0, 5), Err(SequenceError::Range { .. })));
    }

    #[test]
    fn test_non_ascii_contig_is_fetch_error() {
        let store = InMemorySequences::new().with_contig("c", "ACGTé");

        assert_eq!(store.length("c").unwrap(), 6);
        assert_eq!(store.fetch("c", 0, 4).unwrap(), "ACGT");
        assert!(matches!(store.fetch("c", 0, 5), Err(SequenceError::Fetch { .. })));
        assert!(matches!(store.fetch("c", 4, 6), Err(SequenceError::Fetch { .. })));
    }
}

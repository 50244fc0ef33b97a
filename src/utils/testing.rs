// Tue Jan 13 2026 - Alex

//! Shared fixtures for unit tests.

use crate::sequence::InMemorySequences;

pub const TEST_CONTIG: &str = "test_a";

/// Sense hit at offset 0 (plus an overlapping non-canonical one at offset 3),
/// `ATTA` filler, and an antisense hit occupying the last 23 bases (offset 217).
pub fn test_a_sequence() -> String {
    let head = "GAGAAGACTATTTCCGTAGGAGGTGG";
    let tail = "CCTCCTACGGAAATAGTCTTCTC";
    let filler: String = "ATTA".repeat(60).chars().take(240 - head.len() - tail.len()).collect();
    format!("{}{}{}", head, filler, tail)
}

pub fn test_store() -> InMemorySequences {
    InMemorySequences::new().with_contig(TEST_CONTIG, &test_a_sequence())
}

/// Writes `test_a` as a 60-column FASTA file into `dir`.
pub fn write_test_fasta(dir: &std::path::Path) -> std::path::PathBuf {
    let seq = test_a_sequence();
    let mut contents = format!(">{}\n", TEST_CONTIG);
    for line in seq.as_bytes().chunks(60) {
        contents.push_str(std::str::from_utf8(line).unwrap());
        contents.push('\n');
    }
    let path = dir.join("test.fa");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_fixture_layout() {
    let seq = test_a_sequence();
    assert_eq!(seq.len(), 240);
    assert_eq!(seq.find("CCTCCTACGGAAATAGTCTTCTC"), Some(217));
}

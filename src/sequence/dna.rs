// Tue Jan 13 2026 - Alex

use crate::sequence::SequenceError;

pub fn complement(base: u8) -> Result<u8, SequenceError> {
    match base.to_ascii_uppercase() {
        b'A' => Ok(b'T'),
        b'T' => Ok(b'A'),
        b'C' => Ok(b'G'),
        b'G' => Ok(b'C'),
        b'N' => Ok(b'N'),
        other => Err(SequenceError::InvalidBase(other as char)),
    }
}

/// Upper-cased reverse complement over `{A,C,G,T,N}`; any other character is an error.
pub fn reverse_complement(seq: &[u8]) -> Result<String, SequenceError> {
    let bases = seq
        .iter()
        .rev()
        .map(|&b| complement(b))
        .collect::<Result<Vec<u8>, _>>()?;
    // Only ASCII bases reach this point.
    Ok(bases.into_iter().map(char::from).collect())
}

pub fn g_count(seq: &str) -> usize {
    seq.bytes().filter(|&b| b == b'G').count()
}

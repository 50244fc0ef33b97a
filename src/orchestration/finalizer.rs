// Tue Jan 13 2026 - Alex

use crate::site::GuideSite;
use std::io::{self, BufWriter, Write};

pub const BASE_HEADER: &str = "Contig,Start,End,gRNA_Seq,PAM,Strand,G_start";
pub const UNIQUE_HEADER: &str = "Contig,Start,End,gRNA_Seq,PAM,Strand,G_start,Unique";

/// Writes the site table as comma-separated text.
pub struct RecordWriter<W: Write> {
    out: BufWriter<W>,
    with_unique: bool,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, with_unique: bool) -> Self {
        Self {
            out: BufWriter::new(out),
            with_unique,
            written: 0,
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        let header = if self.with_unique { UNIQUE_HEADER } else { BASE_HEADER };
        writeln!(self.out, "{}", header)
    }

    /// `unique` is required exactly when the table carries the Unique column.
    pub fn write_site(&mut self, site: &GuideSite, unique: Option<bool>) -> io::Result<()> {
        match (self.with_unique, unique) {
            (true, Some(flag)) => writeln!(self.out, "{},{}", site, if flag { "Yes" } else { "No" })?,
            (false, None) => writeln!(self.out, "{}", site)?,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "uniqueness flag does not match the table header",
                ))
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Pushes buffered rows through, for streaming output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

// Tue Jan 13 2026 - Alex

use std::fmt;

/// One position of a fixed-width DNA motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseClass {
    Base(u8),
    Any { allow_n: bool },
}

impl BaseClass {
    pub fn matches(&self, base: u8) -> bool {
        match *self {
            Self::Base(b) => b == base,
            Self::Any { allow_n } => {
                matches!(base, b'A' | b'C' | b'G' | b'T') || (allow_n && base == b'N')
            }
        }
    }

    fn regex_atom(&self) -> String {
        match *self {
            Self::Base(b) => (b as char).to_string(),
            Self::Any { allow_n: false } => "[ACGT]".to_string(),
            Self::Any { allow_n: true } => "[ACGTN]".to_string(),
        }
    }
}

/// Fixed-width motif built position by position, e.g. `G` + 17 wildcards + `GG` + 1 wildcard + `GG`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Motif {
    positions: Vec<BaseClass>,
}

impl Motif {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(mut self, bases: &[u8]) -> Self {
        self.positions
            .extend(bases.iter().map(|&b| BaseClass::Base(b.to_ascii_uppercase())));
        self
    }

    pub fn any(mut self, count: usize, allow_n: bool) -> Self {
        self.positions
            .extend(std::iter::repeat(BaseClass::Any { allow_n }).take(count));
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Tests the first `len()` bases of `window`.
    pub fn matches(&self, window: &[u8]) -> bool {
        if window.len() < self.positions.len() {
            return false;
        }
        self.positions
            .iter()
            .zip(window)
            .all(|(class, &base)| class.matches(base))
    }

    /// Equivalent regular expression, with runs of identical classes collapsed into `{n}`.
    pub fn to_regex(&self) -> String {
        let mut out = String::new();
        let mut i = 0;

        while i < self.positions.len() {
            let class = self.positions[i];
            let run = self.positions[i..]
                .iter()
                .take_while(|&&c| c == class)
                .count();

            match class {
                BaseClass::Base(_) => {
                    for _ in 0..run {
                        out.push_str(&class.regex_atom());
                    }
                }
                BaseClass::Any { .. } => {
                    out.push_str(&class.regex_atom());
                    if run > 1 {
                        out.push_str(&format!("{{{}}}", run));
                    }
                }
            }

            i += run;
        }

        out
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_regex())
    }
}

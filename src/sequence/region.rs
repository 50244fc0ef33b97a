// Wed Jan 15 2026 - Alex

use crate::config::ConfigError;
use crate::pattern::SITE_LEN;
use crate::sequence::{SequenceError, SequenceProvider};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+):([0-9][0-9,]*)-([0-9][0-9,]*)$").expect("valid region regex"))
}

/// A user region: `contig` or `contig:start-end` with 1-based inclusive coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub contig: String,
    pub range: Option<(u64, u64)>,
}

impl RegionSpec {
    pub fn whole(contig: &str) -> Self {
        Self {
            contig: contig.to_string(),
            range: None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(ConfigError::Region(format!("'{}' is not a valid region", s)));
        }

        if let Some(caps) = range_regex().captures(s) {
            let coord = |i: usize| -> Result<u64, ConfigError> {
                caps[i]
                    .replace(',', "")
                    .parse::<u64>()
                    .map_err(|e| ConfigError::Region(format!("'{}': {}", s, e)))
            };
            return Ok(Self {
                contig: caps[1].to_string(),
                range: Some((coord(2)?, coord(3)?)),
            });
        }

        if let Some((_, tail)) = s.rsplit_once(':') {
            if tail.contains('-') {
                return Err(ConfigError::Region(format!(
                    "'{}' should look like contig:start-end",
                    s
                )));
            }
        }

        Ok(Self::whole(s))
    }

    /// Checks the region against the store and converts it to a half-open range.
    pub fn resolve(&self, provider: &dyn SequenceProvider) -> Result<Region, SequenceError> {
        if !provider.contains(&self.contig) {
            return Err(SequenceError::NotFound(self.contig.clone()));
        }
        let length = provider.length(&self.contig)?;

        let (start, end) = self.range.unwrap_or((1, length));
        if start < 1 {
            return Err(SequenceError::range(&self.contig, start, end, "start is before the contig start"));
        }
        if start > end {
            return Err(SequenceError::range(&self.contig, start, end, "start is greater than end"));
        }
        if end > length {
            return Err(SequenceError::range(
                &self.contig,
                start,
                end,
                format!("end is after the contig end ({})", length),
            ));
        }

        let region = Region {
            contig: self.contig.clone(),
            start0: start - 1,
            end1: end,
        };
        if region.len() < SITE_LEN as u64 {
            return Err(SequenceError::range(
                &self.contig,
                start,
                end,
                format!("region too small to find gRNA ({} bp)", region.len()),
            ));
        }

        Ok(region)
    }
}

impl FromStr for RegionSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some((start, end)) => write!(f, "{}:{}-{}", self.contig, start, end),
            None => write!(f, "{}", self.contig),
        }
    }
}

/// A validated region in the store's half-open, 0-based convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    pub contig: String,
    pub start0: u64,
    pub end1: u64,
}

impl Region {
    pub fn len(&self) -> u64 {
        self.end1 - self.start0
    }

    pub fn is_empty(&self) -> bool {
        self.end1 <= self.start0
    }
}

/// Resolves every spec, or every contig of the store when `specs` is empty.
pub fn resolve_regions(specs: &[String], provider: &dyn SequenceProvider) -> Result<Vec<Region>, crate::orchestration::ScanError> {
    let parsed: Vec<RegionSpec> = if specs.is_empty() {
        provider
            .contig_names()
            .iter()
            .map(|name| RegionSpec::whole(name))
            .collect()
    } else {
        specs
            .iter()
            .map(|s| RegionSpec::parse(s))
            .collect::<Result<_, _>>()?
    };

    let regions = parsed
        .iter()
        .map(|spec| spec.resolve(provider))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(regions)
}

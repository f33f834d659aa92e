//! Latest-version set: the highest patch of every major.minor line

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;
use serde::{Serialize, Serializer};

use crate::release::filter::is_eligible;

/// Highest version per `(major, minor)`, iterated newest line first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestVersionSet {
    lines: BTreeMap<(u64, u64), Version>,
}

impl LatestVersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `version`, keeping only the highest patch of its line.
    ///
    /// Returns true if the set changed.
    pub fn insert(&mut self, version: Version) -> bool {
        let key = (version.major, version.minor);
        match self.lines.get_mut(&key) {
            Some(existing) if version.patch > existing.patch => {
                *existing = version;
                true
            }
            Some(_) => false,
            None => {
                self.lines.insert(key, version);
                true
            }
        }
    }

    /// Iterates descending by major, then minor
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Version> {
        self.lines.values().rev()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_vec(self) -> Vec<Version> {
        self.lines.into_values().rev().collect()
    }
}

impl fmt::Display for LatestVersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, version) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", version)?;
        }
        f.write_str("]")
    }
}

impl Serialize for LatestVersionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Fold `versions` into a [`LatestVersionSet`].
///
/// Input order and duplicates do not matter. Versions that would not pass the
/// release filter for `floor` are skipped.
pub fn aggregate<I>(versions: I, floor: &Version) -> LatestVersionSet
where
    I: IntoIterator<Item = Version>,
{
    let mut set = LatestVersionSet::new();
    for version in versions {
        if is_eligible(&version, floor) {
            set.insert(version);
        }
    }
    set
}

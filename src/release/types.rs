use std::fmt;

use semver::Version;

/// A repository whose release lines should be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub owner: String,
    pub name: String,
    /// Inclusive floor for reported versions
    pub min_version: Version,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, min_version: Version) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            min_version,
        }
    }

    /// Returns `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One page of raw release tags as delivered by a release source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleasePage {
    /// Tags in source order, newest first
    pub tags: Vec<String>,
    /// Index of the following page, `None` when the listing is exhausted
    pub next_page: Option<u32>,
}

impl ReleasePage {
    pub fn new(tags: Vec<String>, next_page: Option<u32>) -> Self {
        Self { tags, next_page }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#![allow(dead_code)]

mod source;

pub use source::{ScriptedSource, Step};

use semver::Version;

use release_lines::release::types::RepositoryTarget;

/// Build a target for `owner/name` with the given minimum version
pub fn target(repository: &str, min_version: &str) -> RepositoryTarget {
    let (owner, name) = repository.split_once('/').unwrap();
    RepositoryTarget::new(owner, name, Version::parse(min_version).unwrap())
}

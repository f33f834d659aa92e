//! Repository list reader
//!
//! The list is a text file whose first line is a header. Every other
//! non-blank line names one repository and its minimum version:
//!
//! ```text
//! repository,minimum
//! kubernetes/kubernetes,1.8.0
//! prometheus/prometheus,v2.2.0
//! ```

use std::path::{Path, PathBuf};

use semver::Version;
use thiserror::Error;
use tracing::debug;

use crate::release::types::RepositoryTarget;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read repository list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected `owner/name,minVersion`, got {content:?}")]
    MalformedRow { line: usize, content: String },

    #[error("line {line}: invalid minimum version {value:?}: {source}")]
    InvalidMinVersion {
        line: usize,
        value: String,
        #[source]
        source: semver::Error,
    },
}

/// Read the repository list at `path`.
///
/// Only an unreadable file fails as a whole; bad rows are returned in place.
pub fn read_targets(path: &Path) -> Result<Vec<Result<RepositoryTarget, InputError>>, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_targets(&content))
}

/// Parse repository list content, skipping the header line and blank lines.
pub fn parse_targets(content: &str) -> Vec<Result<RepositoryTarget, InputError>> {
    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(i + 1, line))
        .collect()
}

/// Parse one `owner/name,minVersion` row. `line` is 1-based.
pub fn parse_row(line: usize, content: &str) -> Result<RepositoryTarget, InputError> {
    let malformed = || InputError::MalformedRow {
        line,
        content: content.to_string(),
    };

    let (repo, min) = content.split_once(',').ok_or_else(malformed)?;
    let (owner, name) = repo.split_once('/').ok_or_else(malformed)?;
    let (owner, name, min) = (owner.trim(), name.trim(), min.trim());

    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(malformed());
    }

    let min_version = parse_min_version(min).map_err(|source| InputError::InvalidMinVersion {
        line,
        value: min.to_string(),
        source,
    })?;

    debug!("Line {}: {}/{} from {}", line, owner, name, min_version);

    Ok(RepositoryTarget::new(owner, name, min_version))
}

/// Parse a minimum version, accepting a leading 'v'
pub fn parse_min_version(value: &str) -> Result<Version, semver::Error> {
    Version::parse(value.strip_prefix('v').unwrap_or(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn parse_targets_skips_header_and_blank_lines() {
        let content = "repository,minimum\nkubernetes/kubernetes,1.8.0\n\n  \nprometheus/prometheus,v2.2.0\n";

        let result: Vec<RepositoryTarget> = parse_targets(content)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            result,
            vec![
                RepositoryTarget::new("kubernetes", "kubernetes", Version::new(1, 8, 0)),
                RepositoryTarget::new("prometheus", "prometheus", Version::new(2, 2, 0)),
            ]
        );
    }

    #[test]
    fn parse_targets_keeps_good_rows_around_bad_ones() {
        let content = "header\nowner/a,1.0.0\nowner/b,not-a-version\nowner/c,2.0.0\n";

        let result = parse_targets(content);

        assert_eq!(result.len(), 3);
        assert!(result[0].is_ok());
        assert!(matches!(
            &result[1],
            Err(InputError::InvalidMinVersion { line: 3, value, .. }) if value == "not-a-version"
        ));
        assert_eq!(result[2].as_ref().unwrap().name, "c");
    }

    #[test]
    fn parse_targets_of_header_only_is_empty() {
        assert!(parse_targets("repository,minimum\n").is_empty());
        assert!(parse_targets("").is_empty());
    }

    #[rstest]
    #[case("owner/name,1.2.3", "owner", "name", "1.2.3")]
    #[case(" owner / name , v1.2.3 ", "owner", "name", "1.2.3")]
    #[case("o/n,1.0.0-rc.1", "o", "n", "1.0.0-rc.1")]
    fn parse_row_accepts_valid_rows(
        #[case] row: &str,
        #[case] owner: &str,
        #[case] name: &str,
        #[case] min: &str,
    ) {
        let target = parse_row(2, row).unwrap();

        assert_eq!(target.owner, owner);
        assert_eq!(target.name, name);
        assert_eq!(target.min_version, Version::parse(min).unwrap());
    }

    #[rstest]
    #[case("owner/name")]
    #[case("ownername,1.0.0")]
    #[case("/name,1.0.0")]
    #[case("owner/,1.0.0")]
    #[case("owner/name/extra,1.0.0")]
    fn parse_row_rejects_malformed_rows(#[case] row: &str) {
        assert!(matches!(
            parse_row(4, row),
            Err(InputError::MalformedRow { line: 4, .. })
        ));
    }

    #[rstest]
    #[case("owner/name,")]
    #[case("owner/name,1.2")]
    #[case("owner/name,latest")]
    fn parse_row_rejects_invalid_min_version(#[case] row: &str) {
        assert!(matches!(
            parse_row(2, row),
            Err(InputError::InvalidMinVersion { line: 2, .. })
        ));
    }

    #[test]
    fn read_targets_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "repository,minimum").unwrap();
        writeln!(file, "rust-lang/rust,1.70.0").unwrap();

        let result = read_targets(file.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].as_ref().unwrap().full_name(), "rust-lang/rust");
    }

    #[test]
    fn read_targets_reports_missing_file() {
        let result = read_targets(Path::new("/nonexistent/repos.txt"));

        assert!(matches!(result, Err(InputError::Io { .. })));
    }
}

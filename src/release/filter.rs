use semver::Version;
use tracing::trace;

/// Comparison key used for selection: build metadata and prerelease are ignored.
pub(crate) fn triple(version: &Version) -> (u64, u64, u64) {
    (version.major, version.minor, version.patch)
}

fn strip_v(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Parse a tag into a version, stripping a single leading 'v'.
///
/// No eligibility rules are applied.
///
/// Examples:
/// - "v1.2.3" -> Version(1, 2, 3)
/// - "2.0.0-rc.1" -> Version(2, 0, 0, pre = "rc.1")
/// - "release-1" -> None
pub fn parse_lenient(tag: &str) -> Option<Version> {
    Version::parse(strip_v(tag)).ok()
}

/// Returns true when `version` may appear in a latest-version set for `floor`.
///
/// Major 0 is pre-stable and never eligible, whatever the floor.
pub fn is_eligible(version: &Version, floor: &Version) -> bool {
    version.major >= 1 && version.pre.is_empty() && triple(version) >= triple(floor)
}

/// Parse a raw release tag and apply the release filter.
///
/// Returns `None` for tags that do not start with a non-zero digit (after an
/// optional 'v'), that are not valid semver, that carry a prerelease, or that
/// are below `floor`.
pub fn parse_tag(tag: &str, floor: &Version) -> Option<Version> {
    let stripped = strip_v(tag);

    if !stripped.starts_with(|c: char| ('1'..='9').contains(&c)) {
        trace!("Dropping tag {:?}: does not start with a stable major", tag);
        return None;
    }

    let version = Version::parse(stripped)
        .inspect_err(|e| trace!("Dropping tag {:?}: {}", tag, e))
        .ok()?;

    if !version.pre.is_empty() {
        trace!("Dropping tag {:?}: prerelease", tag);
        return None;
    }

    if triple(&version) < triple(floor) {
        trace!("Dropping tag {:?}: below minimum {}", tag, floor);
        return None;
    }

    Some(version)
}

/// Returns true when `tag` proves that every later (older) release is below `floor`.
///
/// Tags that cannot be parsed never prove anything.
pub fn is_below_floor(tag: &str, floor: &Version) -> bool {
    parse_lenient(tag).is_some_and(|v| triple(&v) < triple(floor))
}

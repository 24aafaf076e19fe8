//! pub version constraint
//!
//! Supports the constraint syntax used by `pubspec.yaml` and `pubspec.lock`:
//! - `any` - matches every version
//! - `1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0, >=0.2.3 <0.3.0 for 0.x)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `>=2.19.6 <3.0.0` - space-separated, all must be satisfied

use std::fmt;

use semver::Version;

use crate::version::semver::parse_version;

/// Operators that may be written apart from their version (`>= 2.0.0`)
const OPERATORS: [&str; 5] = [">=", "<=", ">", "<", "^"];

/// A parsed pub version constraint
///
/// Keeps the text it was parsed from so it can be reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    raw: String,
    spec: ConstraintSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConstraintSpec {
    Any,
    /// AND of comparators
    All(Vec<Comparator>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Comparator {
    Exact(Version),
    Caret(Version),
    Gte(Version),
    Gt(Version),
    Lte(Version),
    Lt(Version),
}

impl Constraint {
    /// Parse a constraint string, returning None if it is not valid pub syntax
    pub fn parse(spec: &str) -> Option<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return None;
        }

        let parsed = if trimmed == "any" {
            ConstraintSpec::Any
        } else {
            let comparators: Option<Vec<Comparator>> = split_comparators(trimmed)?
                .iter()
                .map(|part| Comparator::parse(part))
                .collect();
            ConstraintSpec::All(comparators?)
        };

        Some(Self {
            raw: trimmed.to_string(),
            spec: parsed,
        })
    }

    /// The constraint as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check if a version satisfies this constraint
    pub fn satisfies(&self, version: &Version) -> bool {
        match &self.spec {
            ConstraintSpec::Any => true,
            ConstraintSpec::All(comparators) => {
                comparators.iter().all(|c| c.satisfies(version))
                    && !excludes_prerelease(comparators, version)
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Comparator {
    fn parse(part: &str) -> Option<Self> {
        if let Some(rest) = part.strip_prefix(">=") {
            parse_version(rest).map(Comparator::Gte)
        } else if let Some(rest) = part.strip_prefix('>') {
            parse_version(rest).map(Comparator::Gt)
        } else if let Some(rest) = part.strip_prefix("<=") {
            parse_version(rest).map(Comparator::Lte)
        } else if let Some(rest) = part.strip_prefix('<') {
            parse_version(rest).map(Comparator::Lt)
        } else if let Some(rest) = part.strip_prefix('^') {
            parse_version(rest).map(Comparator::Caret)
        } else {
            parse_version(part).map(Comparator::Exact)
        }
    }

    fn satisfies(&self, version: &Version) -> bool {
        match self {
            Comparator::Exact(v) => version == v,
            Comparator::Caret(v) => version >= v && *version < next_breaking(v),
            Comparator::Gte(v) => version >= v,
            Comparator::Gt(v) => version > v,
            Comparator::Lte(v) => version <= v,
            Comparator::Lt(v) => version < v,
        }
    }

    /// Exclusive upper bound, if this comparator has one
    fn exclusive_upper(&self) -> Option<Version> {
        match self {
            Comparator::Lt(v) => Some(v.clone()),
            Comparator::Caret(v) => Some(next_breaking(v)),
            _ => None,
        }
    }

    /// Lower bound, if this comparator has one
    fn lower(&self) -> Option<&Version> {
        match self {
            Comparator::Exact(v) | Comparator::Caret(v) | Comparator::Gte(v) | Comparator::Gt(v) => {
                Some(v)
            }
            Comparator::Lte(_) | Comparator::Lt(_) => None,
        }
    }
}

/// Split a constraint into comparators, joining detached operators with their version
fn split_comparators(spec: &str) -> Option<Vec<String>> {
    let mut parts = Vec::new();
    let mut pending: Option<&str> = None;

    for token in spec.split_whitespace() {
        match pending.take() {
            Some(op) => parts.push(format!("{}{}", op, token)),
            None if OPERATORS.contains(&token) => pending = Some(token),
            None => parts.push(token.to_string()),
        }
    }

    // Dangling operator such as ">=2.0.0 <"
    if pending.is_some() {
        return None;
    }

    Some(parts)
}

/// The first version that is not API-compatible with `version`
///
/// pub treats a 0.x minor bump as breaking: ^0.2.3 -> <0.3.0, ^0.0.3 -> <0.1.0
fn next_breaking(version: &Version) -> Version {
    if version.major == 0 {
        Version::new(0, version.minor + 1, 0)
    } else {
        Version::new(version.major + 1, 0, 0)
    }
}

/// pub excludes pre-releases of an exclusive upper bound: `<3.0.0` does not
/// admit `3.0.0-1.0.dev` unless the lower bound is itself a pre-release of 3.0.0
fn excludes_prerelease(comparators: &[Comparator], version: &Version) -> bool {
    if version.pre.is_empty() {
        return false;
    }

    let hits_upper_bound = comparators
        .iter()
        .filter_map(Comparator::exclusive_upper)
        .any(|upper| upper.pre.is_empty() && same_release(&upper, version));

    if !hits_upper_bound {
        return false;
    }

    let lower_is_prerelease = comparators
        .iter()
        .filter_map(Comparator::lower)
        .any(|lower| !lower.pre.is_empty() && same_release(lower, version));

    !lower_is_prerelease
}

fn same_release(a: &Version, b: &Version) -> bool {
    a.major == b.major && a.minor == b.minor && a.patch == b.patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(version: &str) -> Version {
        Version::parse(version).unwrap()
    }

    #[rstest]
    #[case("any", "0.0.1", true)]
    #[case("any", "3.13.9", true)]
    #[case("3.7.12", "3.7.12", true)]
    #[case("3.7.12", "3.7.13", false)]
    #[case("^3.7.12", "3.7.12", true)]
    #[case("^3.7.12", "3.13.9", true)]
    #[case("^3.7.12", "3.7.11", false)]
    #[case("^3.7.12", "4.0.0", false)]
    #[case("^0.2.3", "0.2.9", true)]
    #[case("^0.2.3", "0.3.0", false)]
    #[case("^0.0.3", "0.0.9", true)]
    #[case("^0.0.3", "0.1.0", false)]
    #[case(">=2.19.6 <3.0.0", "2.19.6", true)]
    #[case(">=2.19.6 <3.0.0", "2.19.5", false)]
    #[case(">=2.19.6 <3.0.0", "3.0.0", false)]
    #[case(">=3.7.12", "3.13.9", true)]
    #[case(">3.7.12", "3.7.12", false)]
    #[case("<=3.7.12", "3.7.12", true)]
    #[case(">= 2.19.6 < 3.0.0", "2.19.6", true)]
    fn satisfies_returns_expected(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        let constraint = Constraint::parse(spec).unwrap();
        assert_eq!(constraint.satisfies(&v(version)), expected);
    }

    #[rstest]
    #[case(">=2.19.6 <3.0.0", "3.0.0-1.0.dev", false)]
    #[case("^3.0.0", "4.0.0-0.1.pre", false)]
    #[case(">=3.0.0-0 <3.0.0", "3.0.0-1.0.dev", true)]
    #[case(">=3.10.0 <4.0.0", "3.13.0-0.2.pre", true)]
    fn satisfies_handles_prereleases(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        let constraint = Constraint::parse(spec).unwrap();
        assert_eq!(constraint.satisfies(&v(version)), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("latest")]
    #[case(">=2.19.6 <")]
    #[case("^")]
    #[case(">=abc")]
    fn parse_rejects_invalid_constraints(#[case] spec: &str) {
        assert_eq!(Constraint::parse(spec), None);
    }

    #[test]
    fn display_returns_trimmed_source_text() {
        let constraint = Constraint::parse("  >=2.19.6 <3.0.0 ").unwrap();
        assert_eq!(constraint.to_string(), ">=2.19.6 <3.0.0");
        assert_eq!(constraint.as_str(), ">=2.19.6 <3.0.0");
    }
}

//! Channel version parsing and ordering.
//!
//! Operator channels are named like `v3`, `v3.20` or `stable-v1.2`. Only the
//! text after the first `v` is significant; a name without a `v` counts as
//! `0.0`. A single component is padded to two (`v3` becomes `3.0`).

use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

const DEFAULT_VERSION: &str = "0.0";

/// Split a raw channel name into its normalised, still unparsed components.
fn raw_components(raw: &str) -> Vec<&str> {
    let numeric = raw
        .split_once('v')
        .map_or(DEFAULT_VERSION, |(_, rest)| rest);

    let mut components: Vec<&str> = numeric.split('.').collect();
    if components.len() == 1 {
        components.push("0");
    }
    components
}

fn parse_component(raw: &str, component: &str, position: usize) -> Result<i64, VersionError> {
    component
        .parse::<i64>()
        .map_err(|source| VersionError::InvalidComponent {
            raw: raw.to_string(),
            component: component.to_string(),
            position,
            source,
        })
}

/// A normalised channel version: at least two integer components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelVersion {
    components: Vec<i64>,
}

impl ChannelVersion {
    /// Parse a raw channel name.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidComponent`] if any `.`-separated
    /// component after the prefix is not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use operand_core::ChannelVersion;
    ///
    /// let version = ChannelVersion::parse("v4").unwrap();
    /// assert_eq!(version.components(), &[4, 0]);
    ///
    /// let version = ChannelVersion::parse("stable").unwrap();
    /// assert_eq!(version.components(), &[0, 0]);
    /// ```
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let components = raw_components(raw)
            .into_iter()
            .enumerate()
            .map(|(position, component)| parse_component(raw, component, position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }

    /// The integer components, most significant first.
    #[must_use]
    pub fn components(&self) -> &[i64] {
        &self.components
    }

    /// Whether `self` orders strictly after `other`.
    ///
    /// Components are compared left to right over `self`'s length and the
    /// first difference decides. A component `other` lacks counts as `0`;
    /// components beyond `self`'s length are ignored.
    #[must_use]
    pub fn is_newer_than(&self, other: &Self) -> bool {
        for (index, &mine) in self.components.iter().enumerate() {
            let theirs = other.components.get(index).copied().unwrap_or(0);
            match mine.cmp(&theirs) {
                Ordering::Greater => return true,
                Ordering::Less => return false,
                Ordering::Equal => {}
            }
        }
        false
    }
}

impl FromStr for ChannelVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChannelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .components
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "v{joined}")
    }
}

/// Returns `true` if channel `v1` is strictly newer than channel `v2`.
///
/// Components are parsed as the comparison reaches them, driven by `v1`'s
/// length. The first differing component decides; anything after it, and
/// any extra trailing components of `v2`, is never parsed. A component `v2`
/// lacks counts as `0`.
///
/// # Errors
///
/// Returns [`VersionError`] if a component reached by the comparison is not
/// an integer.
///
/// # Examples
///
/// ```
/// use operand_core::compare_channel_version;
///
/// assert!(!compare_channel_version("v1.2", "v1.10").unwrap());
/// assert!(compare_channel_version("v2.0", "v1.9").unwrap());
/// assert!(!compare_channel_version("v1", "v1.0").unwrap());
/// assert!(compare_channel_version("v1.x", "v1.0").is_err());
/// assert!(compare_channel_version("v2.0", "v1.x").unwrap());
/// ```
pub fn compare_channel_version(v1: &str, v2: &str) -> Result<bool, VersionError> {
    let first = raw_components(v1);
    let second = raw_components(v2);

    for (position, component) in first.iter().enumerate() {
        let mine = parse_component(v1, component, position)?;
        let theirs = match second.get(position) {
            Some(component) => parse_component(v2, component, position)?,
            None => 0,
        };
        match mine.cmp(&theirs) {
            Ordering::Greater => {
                tracing::trace!(v1, v2, position, "Channel v1 is newer");
                return Ok(true);
            }
            Ordering::Less => return Ok(false),
            Ordering::Equal => {}
        }
    }

    tracing::trace!(v1, v2, "Channel v1 is not newer");
    Ok(false)
}

/// Errors that can occur while parsing a channel version.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// A component is not an integer
    #[error("invalid component {component:?} at position {position} in channel {raw:?}: {source}")]
    InvalidComponent {
        /// The full channel name
        raw: String,
        /// The offending component text
        component: String,
        /// Zero-based component index
        position: usize,
        /// Integer parse failure
        #[source]
        source: ParseIntError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newer(v1: &str, v2: &str) -> bool {
        compare_channel_version(v1, v2).unwrap()
    }

    #[test]
    fn numeric_not_lexical() {
        assert!(!newer("v1.2", "v1.10"));
        assert!(newer("v1.10", "v1.2"));
    }

    #[test]
    fn major_decides_first() {
        assert!(newer("v2.0", "v1.9"));
        assert!(!newer("v1.9", "v2.0"));
    }

    #[test]
    fn single_component_padded() {
        assert!(!newer("v1", "v1.0"));
        assert!(!newer("v1.0", "v1"));
        assert!(newer("v2", "v1.5"));
    }

    #[test]
    fn equal_is_not_larger() {
        assert!(!newer("v3.1", "v3.1"));
    }

    #[test]
    fn missing_prefix_defaults_to_zero() {
        assert!(!newer("abc", "v1.0"));
        assert!(newer("v0.1", "stable"));
        assert!(!newer("stable", "beta"));
    }

    #[test]
    fn prefix_before_v_ignored() {
        assert!(newer("stable-v1.2", "v1.1"));
        assert_eq!(ChannelVersion::parse("stable-v1.2").unwrap().components(), &[1, 2]);
    }

    #[test]
    fn shorter_second_treated_as_zero() {
        assert!(newer("v1.0.1", "v1.0"));
        assert!(!newer("v1.0.0", "v1.0"));
    }

    #[test]
    fn longer_second_tail_ignored() {
        assert!(!newer("v1.0", "v1.0.5"));
        assert!(newer("v1.1", "v1.0.5"));
    }

    #[test]
    fn non_numeric_second_tail_never_parsed() {
        assert!(newer("v1.1", "v1.0.x"));
        assert!(!newer("v2", "v2.0.beta"));
        assert!(!newer("v1.0", "v1.0.rc1"));
    }

    #[test]
    fn first_difference_stops_parsing() {
        assert!(newer("v2.0", "v1.x"));
        assert!(!newer("v1.x", "v2.0"));
        assert!(newer("v2", "v1.0.beta"));
        assert!(!newer("v1.0.x", "v1.1"));
    }

    #[test]
    fn full_parse_rejects_bad_components() {
        assert!(ChannelVersion::parse("v1.0.x").is_err());
        assert!(ChannelVersion::parse("v2.0").unwrap().is_newer_than(&"v1.9.9".parse().unwrap()));
    }

    #[test]
    fn non_integer_component_fails() {
        let err = compare_channel_version("v1.x", "v1.0").unwrap_err();
        let VersionError::InvalidComponent {
            component,
            position,
            ..
        } = err;
        assert_eq!(component, "x");
        assert_eq!(position, 1);

        assert!(compare_channel_version("v1.0", "v1.").is_err());
        assert!(compare_channel_version("v", "v1.0").is_err());
    }

    #[test]
    fn display_normalised() {
        let version: ChannelVersion = "channel-v3".parse().unwrap();
        assert_eq!(version.to_string(), "v3.0");
    }
}

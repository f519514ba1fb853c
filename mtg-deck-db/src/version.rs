//! Semantic schema versions and their single-integer encoding.
//!
//! SQLite only offers a single integer (`PRAGMA user_version`) to tag a
//! database, so `MAJOR.MINOR.PATCH` is packed as
//! `patch + 1000 * minor + 1_000_000 * major`. Minor and patch are limited to
//! three digits, major to four.

use std::str::FromStr;

use thiserror::Error;

pub const MAX_MAJOR: u32 = 9999;
pub const MAX_MINOR: u32 = 999;
pub const MAX_PATCH: u32 = 999;

const BASE: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version string: '{0}', expected MAJOR.MINOR.PATCH")]
    InvalidFormat(String),
    #[error("Version {major}.{minor}.{patch} is out of the encodable range")]
    OutOfRange { major: u32, minor: u32, patch: u32 },
    #[error("Version number {0} is out of the encodable range")]
    IntegerOutOfRange(u64),
}

/// A three-part semantic version, ordered by major, minor, patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Encode as a single comparable integer.
    pub fn to_integer(self) -> Result<u64, VersionError> {
        version_to_integer(self.major, self.minor, self.patch)
    }

    /// Encode a version that is known to be in range, e.g. a constant.
    pub(crate) const fn encode_in_range(self) -> u64 {
        self.patch as u64 + BASE * self.minor as u64 + BASE * BASE * self.major as u64
    }

    /// Decode an integer produced by [`SchemaVersion::to_integer`].
    pub fn from_integer(n: u64) -> Result<Self, VersionError> {
        let version = Self {
            major: u32::try_from(n / (BASE * BASE)).map_err(|_| VersionError::IntegerOutOfRange(n))?,
            minor: ((n / BASE) % BASE) as u32,
            patch: (n % BASE) as u32,
        };
        if version.major > MAX_MAJOR {
            return Err(VersionError::IntegerOutOfRange(n));
        }
        Ok(version)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SchemaVersion {
    type Err = VersionError;

    /// Parse `MAJOR.MINOR.PATCH`. Each component is "0" or a digit sequence
    /// without leading zeros; nothing else is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidFormat(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 || !parts.iter().all(|part| is_version_component(part)) {
            return Err(invalid());
        }
        let mut numbers = [0u32; 3];
        for (number, part) in numbers.iter_mut().zip(&parts) {
            *number = part.parse().map_err(|_| invalid())?;
        }
        let [major, minor, patch] = numbers;
        check_range(major, minor, patch)?;
        Ok(Self { major, minor, patch })
    }
}

fn is_version_component(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'))
}

fn check_range(major: u32, minor: u32, patch: u32) -> Result<(), VersionError> {
    if major > MAX_MAJOR || minor > MAX_MINOR || patch > MAX_PATCH {
        return Err(VersionError::OutOfRange { major, minor, patch });
    }
    Ok(())
}

/// Encode a version triple. Components outside the supported range are an
/// error instead of silently overlapping with another version.
pub fn version_to_integer(major: u32, minor: u32, patch: u32) -> Result<u64, VersionError> {
    check_range(major, minor, patch)?;
    Ok(SchemaVersion::new(major, minor, patch).encode_in_range())
}

/// Render an encoded version as a dotted string. `0` becomes "0.0.0".
pub fn integer_to_version(n: u64) -> String {
    format!("{}.{}.{}", n / (BASE * BASE), (n / BASE) % BASE, n % BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_examples() {
        assert_eq!(version_to_integer(0, 0, 0), Ok(0));
        assert_eq!(version_to_integer(0, 0, 2), Ok(2));
        assert_eq!(version_to_integer(0, 2, 0), Ok(2000));
        assert_eq!(version_to_integer(1, 2, 3), Ok(1_002_003));
        assert_eq!(version_to_integer(9999, 999, 999), Ok(9_999_999_999));
    }

    #[test]
    fn decode_examples() {
        assert_eq!(integer_to_version(0), "0.0.0");
        assert_eq!(integer_to_version(5), "0.0.5");
        assert_eq!(integer_to_version(2000), "0.2.0");
        assert_eq!(integer_to_version(1_002_003), "1.2.3");
    }

    #[test]
    fn round_trip_over_a_grid() {
        for major in [0, 1, 2, 10, 999, 1000, 9999] {
            for minor in [0, 1, 99, 500, 999] {
                for patch in [0, 7, 100, 999] {
                    let n = version_to_integer(major, minor, patch).unwrap();
                    assert_eq!(integer_to_version(n), format!("{major}.{minor}.{patch}"));
                    assert_eq!(
                        SchemaVersion::from_integer(n),
                        Ok(SchemaVersion::new(major, minor, patch))
                    );
                }
            }
        }
    }

    #[test]
    fn encoding_is_strictly_monotonic() {
        let mut versions = Vec::new();
        for major in [0, 1, 3] {
            for minor in [0, 1, 998, 999] {
                for patch in [0, 1, 999] {
                    versions.push(SchemaVersion::new(major, minor, patch));
                }
            }
        }
        versions.sort();
        let encoded: Vec<u64> = versions.iter().map(|v| v.to_integer().unwrap()).collect();
        assert!(encoded.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn out_of_range_fails() {
        assert!(matches!(
            version_to_integer(0, 1000, 0),
            Err(VersionError::OutOfRange { .. })
        ));
        assert!(version_to_integer(0, 0, 1000).is_err());
        assert!(version_to_integer(10_000, 0, 0).is_err());
        assert_eq!(
            SchemaVersion::from_integer(10_000_000_000),
            Err(VersionError::IntegerOutOfRange(10_000_000_000))
        );
    }

    #[test]
    fn parse_accepts_strict_grammar() {
        assert_eq!("0.0.0".parse::<SchemaVersion>(), Ok(SchemaVersion::new(0, 0, 0)));
        assert_eq!("0.2.0".parse::<SchemaVersion>(), Ok(SchemaVersion::new(0, 2, 0)));
        assert_eq!("10.20.300".parse::<SchemaVersion>(), Ok(SchemaVersion::new(10, 20, 300)));
    }

    #[test]
    fn parse_rejects_malformed_names() {
        for name in [
            "", "1", "1.2", "1.2.3.4", "01.2.3", "1.02.3", "1.2.03", "1..3", "a.b.c", "1.2.3.sql",
            "-1.2.3", "+1.2.3", " 1.2.3", "1.2.x",
        ] {
            assert!(
                matches!(name.parse::<SchemaVersion>(), Err(VersionError::InvalidFormat(_))),
                "'{name}' should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(matches!(
            "0.1000.0".parse::<SchemaVersion>(),
            Err(VersionError::OutOfRange { .. })
        ));
        assert!(matches!(
            "99999999999.0.0".parse::<SchemaVersion>(),
            Err(VersionError::InvalidFormat(_))
        ));
    }

    #[test]
    fn ordering_is_numeric() {
        let a: SchemaVersion = "0.10.0".parse().unwrap();
        let b: SchemaVersion = "0.9.0".parse().unwrap();
        assert!(a > b);
    }
}

//! Client platform detection from the User-Agent header.
//!
//! Only the operating systems relevant to the SameSite workaround are
//! recognised. Everything else, including malformed input, becomes
//! [`OsFamily::Unknown`].

use std::fmt;

/// Dotted version triple, ordered component-wise from major to patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses the leading `10_12_6` / `10.12.6` style version of `input`.
    ///
    /// Missing minor or patch components default to zero; text after the
    /// version is ignored. Returns `None` when no major number is present or
    /// when any present component does not fit in a `u32`.
    fn parse_prefix(input: &str) -> Option<Self> {
        let end = input
            .find(|c: char| !(c.is_ascii_digit() || c == '_' || c == '.'))
            .unwrap_or(input.len());

        let mut parts = input[..end]
            .split(['_', '.'])
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u32>().ok());

        let major = parts.next()??;
        let minor = parts.next().unwrap_or(Some(0))?;
        let patch = parts.next().unwrap_or(Some(0))?;
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    /// Desktop macOS (Mac OS X)
    MacOs,
    /// iOS and iPadOS on iPhone, iPad and iPod
    Ios,
    Unknown,
}

/// Platform derived from a single User-Agent value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSignature {
    pub family: OsFamily,
    pub version: Version,
}

impl PlatformSignature {
    pub const fn new(family: OsFamily, version: Version) -> Self {
        Self { family, version }
    }

    pub const fn unknown() -> Self {
        Self::new(OsFamily::Unknown, Version::new(0, 0, 0))
    }
}

/// Turns a User-Agent string into a [`PlatformSignature`].
///
/// Implementations must be total: unrecognised input maps to
/// [`PlatformSignature::unknown`] instead of failing.
pub trait PlatformParser: Send + Sync {
    fn parse_platform(&self, user_agent: &str) -> PlatformSignature;
}

impl<F> PlatformParser for F
where
    F: Fn(&str) -> PlatformSignature + Send + Sync,
{
    fn parse_platform(&self, user_agent: &str) -> PlatformSignature {
        self(user_agent)
    }
}

/// Token based parser for Apple platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentPlatformParser;

const IOS_DEVICES: [&str; 3] = ["iPhone", "iPad", "iPod"];
const IOS_VERSION_MARKERS: [&str; 2] = ["iPhone OS ", "CPU OS "];
const MACOS_VERSION_MARKER: &str = "Mac OS X ";

fn version_after(user_agent: &str, marker: &str) -> Option<Version> {
    let start = user_agent.find(marker)? + marker.len();
    Version::parse_prefix(&user_agent[start..])
}

impl PlatformParser for UserAgentPlatformParser {
    fn parse_platform(&self, user_agent: &str) -> PlatformSignature {
        // Windows Phone advertises itself "like iPhone OS"
        if user_agent.contains("Windows Phone") {
            return PlatformSignature::unknown();
        }

        // iOS agents also say "like Mac OS X", so they are checked first
        if IOS_DEVICES.iter().any(|device| user_agent.contains(device)) {
            return IOS_VERSION_MARKERS
                .iter()
                .find_map(|marker| version_after(user_agent, marker))
                .map(|version| PlatformSignature::new(OsFamily::Ios, version))
                .unwrap_or_else(PlatformSignature::unknown);
        }

        if user_agent.contains("Macintosh") {
            if let Some(version) = version_after(user_agent, MACOS_VERSION_MARKER) {
                return PlatformSignature::new(OsFamily::MacOs, version);
            }
        }

        PlatformSignature::unknown()
    }
}

use crate::platform::{OsFamily, PlatformParser, Version};

use super::policy::SameSite;

/// First macOS release whose Safari accepts `SameSite=None`
const MACOS_FIXED_VERSION: Version = Version::new(10, 13, 0);

/// First iOS release whose WebKit accepts `SameSite=None`
const IOS_FIXED_VERSION: Version = Version::new(14, 0, 0);

/// Downgrades `SameSite=None` to `Lax` for Apple clients that mishandle it.
///
/// Older Safari/WebKit builds treat `SameSite=None` as `Strict`, which drops
/// the session cookie on the cross-site redirect back from the identity
/// provider. `Lax` keeps top-level navigations working for them. Any policy
/// other than `None`, and any client whose platform cannot be identified, is
/// returned unchanged.
pub fn adapt_same_site(
    same_site: SameSite,
    user_agent: &str,
    platform: &dyn PlatformParser,
) -> SameSite {
    if same_site != SameSite::None {
        return same_site;
    }

    let signature = platform.parse_platform(user_agent);
    let affected = match signature.family {
        OsFamily::MacOs => signature.version < MACOS_FIXED_VERSION,
        OsFamily::Ios => signature.version < IOS_FIXED_VERSION,
        OsFamily::Unknown => false,
    };

    if affected {
        tracing::debug!(
            "Using SameSite=Lax instead of None for {:?} {}",
            signature.family,
            signature.version
        );
        SameSite::Lax
    } else {
        same_site
    }
}

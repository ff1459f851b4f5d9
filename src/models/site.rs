//! Site classification.

use url::Url;

/// The closed set of supported booking sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteVariant {
    Deville,
    PoolVillaCity,
    PattayaParty,
    Unknown,
}

impl SiteVariant {
    /// Classify a URL by its domain. Unmatched input yields `Unknown`
    /// rather than failing; the caller logs and skips those.
    pub fn classify(url: &str) -> Self {
        let Some(host) = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        else {
            return Self::Unknown;
        };

        if host.contains("devillegroups.com") {
            Self::Deville
        } else if host.contains("poolvillacity.co.th") {
            Self::PoolVillaCity
        } else if host.contains("pattayapartypoolvilla.com") {
            Self::PattayaParty
        } else {
            Self::Unknown
        }
    }

    /// Human-readable site label used in exported records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Deville => "Deville Groups",
            Self::PoolVillaCity => "Pool Villa City",
            Self::PattayaParty => "Pattaya Party Pool Villa",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_sites() {
        assert_eq!(
            SiteVariant::classify("https://www.devillegroups.com/allcalendar/?s=1758"),
            SiteVariant::Deville
        );
        assert_eq!(
            SiteVariant::classify("https://poolvillacity.co.th/CITY-743"),
            SiteVariant::PoolVillaCity
        );
        assert_eq!(
            SiteVariant::classify("https://www.pattayapartypoolvilla.com/v/2246"),
            SiteVariant::PattayaParty
        );
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(
            SiteVariant::classify("https://example.com/villa/1"),
            SiteVariant::Unknown
        );
        assert_eq!(SiteVariant::classify("not a url"), SiteVariant::Unknown);
    }
}

//! A bookable unit discovered on a site.

/// One bookable house/villa within a site. Immutable after discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    /// Site-specific identifier (e.g. the `hId` calendar parameter).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Listing code shown to customers (e.g. `DV-1758`, `CITY-743`).
    pub code: String,
}

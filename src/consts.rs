/// Achievement category holding per-expansion dungeon statistics
pub(crate) const TARGET_CATEGORY: &str = "Dungeons & Raids";

/// Placeholder replaced with the report body when rendering a template
pub(crate) const DEFAULT_PLACEHOLDER: &str = "{{wow}}";

/// Freshness line format: "Tue Nov 14, 2023 at 10:13 PM UTC"
pub(crate) const FRESHNESS_FORMAT: &str = "%a %b %-d, %Y at %-I:%M %p %Z";

/// Fallback value when no statistic carried an update timestamp
pub(crate) const UNKNOWN: &str = "unknown";

/// Default budget alert threshold (percent of the ceiling)
pub const DEFAULT_ALERT_THRESHOLD: i32 = 80;

/// Maximum number of categories returned in a summary's top-categories list
pub const TOP_CATEGORIES_LIMIT: usize = 10;

/// Decimal precision for display values (percentages, rates)
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default household currency
pub const DEFAULT_CURRENCY: &str = "CLP";

/// Label used when a spend bucket cannot be resolved to a category name
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// Invite code alphabet, 32 entries, without the ambiguous 0/O and 1/I
pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Invite code length
pub const INVITE_CODE_LENGTH: usize = 8;

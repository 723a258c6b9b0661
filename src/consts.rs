/// Date pattern used when a rule does not configure one
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Buckets per year for month partitioning (one per calendar month)
pub const MONTHS_PER_YEAR: u8 = 12;
/// Buckets per year for half-month partitioning (two per calendar month)
pub const HALF_MONTHS_PER_YEAR: u8 = 24;

/// Last day of a month that still falls into its first half
pub const FIRST_HALF_LAST_DAY: u32 = 15;

/// Zero-based month number for January
pub const JANUARY: u32 = 0;
/// Zero-based month number for December
pub const DECEMBER: u32 = 11;
/// First day of any month
pub const MIN_DAY: u32 = 1;
/// Last day of December
pub const DECEMBER_DAYS: u32 = 31;

/// Property names the routing rule schema uses for the anchor dates
pub(crate) const BEGIN_DATE_FIELD: &str = "sBeginDate";
pub(crate) const END_DATE_FIELD: &str = "sEndDate";

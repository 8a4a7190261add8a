//! Application constants for the POI cleaner
//!
//! Built-in classification tables, hours synthesis ranges and output
//! column names. Every table here is only the default: the configuration
//! layer can override each of them from a TOML file.

// =============================================================================
// Classification Tables
// =============================================================================

/// Amenity tags considered business-relevant
///
/// Values are compared exactly and case-sensitively, so the odd entries
/// (free text that ended up in the amenity tag) are kept verbatim.
pub const BUSINESS_AMENITIES: &[&str] = &[
    "fuel",
    "car_wash",
    "bureau_de_change",
    "restaurant",
    "bank",
    "food_court",
    "pub",
    "clinic",
    "pharmacy",
    "doctors",
    "money_transfer",
    "nightclub",
    "bar",
    "marketplace",
    "driving_school",
    "ice_cream",
    "atm",
    "internet_cafe",
    "cafe",
    "fast_food",
    "motorcycle_repair",
    "garage auto",
    "veterinary",
    "car_rental",
    "bicycle_repair_station",
    "stripclub",
    "studio",
    "boat_rental",
    "coworking_space",
    "cinema",
    "dentist",
    "brothel",
    "casino",
    "mobile_money_agent",
    "shipping",
    "car_sharing",
    "microfinance_bank",
    "theatre",
    "music_school",
    "conference_centre",
    "O'TOPAZ, Pâtisserie",
    "charging_station",
    "cars",
    "tattoos",
    "Pressing",
    "animal_breeding",
    "taxi",
    "parking",
    "parking_space",
    "motorcycle_parking",
];

/// Shop values that mark "some shop" rather than a real category
pub const SHOP_PLACEHOLDERS: &[&str] = &["yes", "no"];

/// Tourism values accepted as businesses
pub const BUSINESS_TOURISM: &[&str] = &["hotel"];

/// Tourism value accepted only when attractions are enabled
pub const TOURISM_ATTRACTION: &str = "attraction";

/// Synonym collapse table (raw category -> canonical category)
pub const CATEGORY_SYNONYMS: &[(&str, &str)] = &[
    // Food service
    ("bakery", "restaurant"),
    ("pastry", "restaurant"),
    ("Maquis kaplin", "restaurant"),
    ("O'TOPAZ, Pâtisserie", "restaurant"),
    ("seafood", "restaurant"),
    ("coffee", "cafe"),
    ("Kiosque café", "cafe"),
    ("Buvette traditionnelle", "cafe"),
    ("alcohol", "bar"),
    ("beverages", "bar"),
    // Health
    ("chemist", "pharmacy"),
    ("optician", "pharmacy"),
    ("beauty", "clinic"),
    ("animal_breeding", "veterinary"),
    // Services
    ("copyshop", "internet_cafe"),
    ("computer", "internet_cafe"),
    ("microfinance_bank", "bank"),
    ("orange money", "mobile_money_agent"),
    ("tattoo", "studio"),
    ("music_school", "studio"),
    // Retail
    ("hardware", "marketplace"),
    ("jewelry", "marketplace"),
    ("supermarket", "marketplace"),
    // Leisure and transport
    ("theatre", "cinema"),
    ("car_sharing", "car_rental"),
    ("motorcycle_parking", "parking"),
    ("parking_space", "parking"),
];

/// Canonical categories removed from the dataset
pub const EXCLUDED_CATEGORIES: &[&str] = &[
    "casino",
    "brothel",
    "stripclub",
    "religion",
    "car",
    "music",
    "shipping",
    "dry_cleaning",
    "funeral_directors",
    "coworking_space",
    "conference_centre",
    "charging_station",
    "boat_rental",
];

/// Name given to records without one
pub const UNKNOWN_NAME: &str = "Unknown";

// =============================================================================
// Opening Hours
// =============================================================================

/// Hours window constants
pub mod hours {
    /// Window used for "always open" sources and 24/7 categories
    pub const FULL_DAY_WINDOW: &str = "00:00-23:59";

    /// Window synthesized for categories absent from the synthesis table
    pub const DEFAULT_WINDOW: &str = "09:00-18:00";

    /// Separator between open and close endpoints
    pub const WINDOW_SEPARATOR: char = '-';

    /// Textual end-of-day marker, rewritten to midnight before parsing
    pub const END_OF_DAY: &str = "24:00";

    /// Midnight
    pub const MIDNIGHT: &str = "00:00";

    /// Time format of window endpoints
    pub const TIME_FORMAT: &str = "%H:%M";

    /// Time format used in output artifacts
    pub const OUTPUT_TIME_FORMAT: &str = "%H:%M:%S";

    /// Extension drawn when a synthesized close hour is not after the open hour
    pub const OVERNIGHT_EXTENSION_HOURS: (u32, u32) = (3, 6);
}

/// Synthesis ranges per category: ((open_start, open_end), (close_start, close_end))
///
/// Ranges with `start > end` wrap past midnight. `((0, 0), (23, 23))`
/// marks a category as open around the clock.
pub const HOURS_SYNTHESIS_RANGES: &[(&str, ((u32, u32), (u32, u32)))] = &[
    ("restaurant", ((10, 12), (21, 23))),
    ("pub", ((16, 20), (0, 2))),
    ("money_transfer", ((8, 10), (16, 18))),
    ("cafe", ((6, 8), (20, 23))),
    ("pharmacy", ((8, 10), (20, 23))),
    ("bank", ((8, 9), (14, 16))),
    ("fuel", ((0, 0), (23, 23))),
    ("doctors", ((9, 11), (16, 19))),
    ("bar", ((17, 21), (1, 3))),
    ("car_wash", ((8, 9), (17, 19))),
    ("internet_cafe", ((9, 11), (22, 0))),
    ("marketplace", ((7, 9), (16, 18))),
    ("clinic", ((9, 11), (17, 19))),
    ("fast_food", ((11, 13), (22, 0))),
    ("driving_school", ((9, 11), (15, 17))),
    ("nightclub", ((21, 23), (3, 6))),
    ("food_court", ((10, 12), (22, 0))),
    ("ice_cream", ((11, 13), (20, 22))),
    ("parking", ((0, 0), (23, 23))),
    ("atm", ((0, 0), (23, 23))),
    ("bicycle_repair_station", ((9, 11), (17, 19))),
    ("dentist", ((9, 11), (17, 19))),
    ("car_rental", ((8, 10), (18, 20))),
    ("bureau_de_change", ((9, 11), (17, 19))),
    ("veterinary", ((9, 11), (17, 19))),
    ("mobile_money_agent", ((8, 10), (17, 19))),
    ("studio", ((10, 12), (20, 22))),
    ("motorcycle_repair", ((8, 10), (17, 19))),
    ("cinema", ((14, 16), (23, 1))),
];

// =============================================================================
// Synthetic Reviews
// =============================================================================

/// Review/rating fill bounds
pub mod reviews {
    pub const MIN_REVIEWS: u32 = 0;
    pub const MAX_REVIEWS: u32 = 500;
    pub const MIN_RATING: f64 = 1.0;
    pub const MAX_RATING: f64 = 5.0;
}

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

// =============================================================================
// Output Columns
// =============================================================================

/// Output column names, in output order
pub mod columns {
    pub const OSM_ID: &str = "osm_id";
    pub const OSM_TYPE: &str = "osm_type";
    pub const NAME: &str = "name";
    pub const AMENITY: &str = "amenity";
    pub const SHOP: &str = "shop";
    pub const TOURISM: &str = "tourism";
    pub const OPENING_HOURS: &str = "opening_hours";
    pub const REVIEWS: &str = "reviews";
    pub const RATING: &str = "rating";
    pub const BUSINESS_TYPE: &str = "business_type";
    pub const OPEN_TIME: &str = "open_time";
    pub const CLOSE_TIME: &str = "close_time";
    pub const DURATION_HOURS: &str = "duration_hours";

    pub const ALL: &[&str] = &[
        OSM_ID,
        OSM_TYPE,
        NAME,
        AMENITY,
        SHOP,
        TOURISM,
        OPENING_HOURS,
        REVIEWS,
        RATING,
        BUSINESS_TYPE,
        OPEN_TIME,
        CLOSE_TIME,
        DURATION_HOURS,
    ];
}

/// Default output file stem
pub const DEFAULT_OUTPUT_STEM: &str = "pois_cleaned";

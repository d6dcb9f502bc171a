//! Table and field names of the remote base.
//!
//! Location reference table names live on
//! [`crate::model::location::LocationKind`]; everything here belongs to the
//! company table.

/// The business-record table.
pub const COMPANIES_TABLE: &str = "Companies";

pub const COMPANY_NAME: &str = "Name";
pub const COMPANY_LOGO: &str = "Logo";
pub const COMPANY_WEBSITE: &str = "Website";
pub const HQ_COUNTRY: &str = "HQ Country";
pub const HQ_STATE: &str = "HQ State";
pub const HQ_CITY: &str = "HQ City";
pub const INTRO: &str = "Intro";
pub const BLOG: &str = "Blog";
pub const ONE_LINER: &str = "One Liner";
pub const FACEBOOK: &str = "Facebook";
pub const LINKEDIN: &str = "LinkedIn";
pub const TWITTER: &str = "X Link";
pub const EMPLOYEES: &str = "Employees";
pub const YEAR_FOUNDED: &str = "Year Founded";
pub const LISTING_URL: &str = "Listing URL";
pub const PROPERTY_COUNT: &str = "Listings";
pub const REVIEW_COUNT: &str = "Reviews";
pub const RATING: &str = "Rating";
pub const OTHER_STATES: &str = "Other States";
pub const OTHER_CITIES: &str = "Other Cities";
pub const VERIFIED: &str = "Verified";
pub const TAGS: &str = "Type";
pub const KEY_FEATURES: &str = "Key Features";

/// Image attachment columns, in display order.
pub const IMAGE_FIELDS: [&str; 5] = ["Image 1", "Image 2", "Image 3", "Image 4", "Image 5"];

/// Projection used by scoped listing pages, which render cards rather than
/// full profiles.
pub const LISTING_FIELDS: &[&str] = &[
    COMPANY_NAME,
    COMPANY_LOGO,
    COMPANY_WEBSITE,
    HQ_COUNTRY,
    HQ_STATE,
    HQ_CITY,
    INTRO,
    ONE_LINER,
    PROPERTY_COUNT,
    RATING,
    VERIFIED,
    REVIEW_COUNT,
];

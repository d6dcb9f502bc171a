pub const TEST_API_KEY: &str = "patTESTKEY";
pub const TEST_BASE_ID: &str = "appTESTBASE";

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-gateway/0.1.0";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Media type requested from the weather API
pub const GEO_JSON: &str = "application/geo+json";

/// Port used when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Static asset root used when `PUBLIC_DIR` is not set
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Document served for `/`
pub const INDEX_DOCUMENT: &str = "index.html";

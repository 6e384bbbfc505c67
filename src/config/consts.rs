// src/config/consts.rs

// Upstream API
pub const API_BASE: &str = "http://openapi.seoul.go.kr:8088";
pub const API_BASE_ENV: &str = "SEOUL_API_BASE";
pub const RESPONSE_FORMAT: &str = "json";
pub const FACT_SERVICE: &str = "VwsmTrdarStorQq";
pub const DISTRICT_SERVICE: &str = "TbgisTrdarRelm";
pub const PAGE_SIZE: usize = 1000;

// Credential
pub const API_KEY_ENV: &str = "SEOUL_API_KEY";
pub const PLACEHOLDER_KEYS: &[&str] = &["여기에_인증키를_입력하세요", "YOUR_API_KEY"];

// Collection
pub const DEFAULT_FACT_LIMIT: usize = 20_000;
pub const PROGRESS_MILESTONE: usize = 10_000;

// Artifacts
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATA_DIR_ENV: &str = "SEOUL_DATA_DIR";
pub const FACT_FILE: &str = "seoul_market_data.csv";
pub const FINAL_FILE: &str = "seoul_market_final.csv";
pub const STORE_SEP: char = ',';

// View
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const PREFERRED_INDUSTRY: &str = "커피";

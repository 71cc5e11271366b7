use serde::Deserialize;

/// Main configuration structure for docshelf
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Where the index page comes from and where its cached copy lives
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the page that references the documents to harvest
    #[serde(rename = "index-url", default = "default_index_url")]
    pub index_url: String,

    /// Local cache of the index page; reused on later runs if present
    #[serde(rename = "page-cache-path", default = "default_page_cache_path")]
    pub page_cache_path: String,
}

/// Store directory layout and document type
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Root directory holding all stored documents
    #[serde(rename = "root-dir", default = "default_root_dir")]
    pub root_dir: String,

    /// Filename suffix that marks a document, including the leading dot.
    /// Must be lowercase: canonical names are lowercased, and the store
    /// scanner matches this suffix case-sensitively.
    #[serde(rename = "target-extension", default = "default_target_extension")]
    pub target_extension: String,
}

/// Download behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of documents downloaded concurrently
    #[serde(rename = "max-concurrent-downloads", default = "default_max_concurrent")]
    pub max_concurrent_downloads: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

// Defaults mirror the deployment this pipeline was first built for.
fn default_index_url() -> String {
    "https://www.cleancontrol.com/brands/ingredients-sds/".to_string()
}

fn default_page_cache_path() -> String {
    "cleancontrol-com.html".to_string()
}

fn default_root_dir() -> String {
    "PDFs".to_string()
}

fn default_target_extension() -> String {
    ".pdf".to_string()
}

fn default_max_concurrent() -> u32 {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("docshelf/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            page_cache_path: default_page_cache_path(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            target_extension: default_target_extension(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: default_max_concurrent(),
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            store: StoreConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

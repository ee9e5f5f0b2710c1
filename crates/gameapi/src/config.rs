/// Upstream game API configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GameApiConfig {
    /// Base URL of the character detail endpoints (`/character/info`, ...).
    pub api_base_url: String,
    /// Base URL of the search endpoint (`/search/v2/character`).
    pub search_base_url: String,
    /// Host prepended to relative profile image paths.
    pub image_host: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Browser-like User-Agent; upstream rejects library defaults.
    pub user_agent: String,
    /// Referer matching the official site.
    pub referer: String,
}

impl Default for GameApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://aion2.plaync.com/api".into(),
            search_base_url: "https://aion2.plaync.com/ko-kr/api/search/aion2".into(),
            image_host: "https://profileimg.plaync.com".into(),
            timeout_secs: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into(),
            referer: "https://aion2.plaync.com/".into(),
        }
    }
}

impl GameApiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                            |
    /// |-------------------------|----------------------------------------------------|
    /// | `GAME_API_BASE_URL`     | `https://aion2.plaync.com/api`                     |
    /// | `GAME_SEARCH_BASE_URL`  | `https://aion2.plaync.com/ko-kr/api/search/aion2`  |
    /// | `GAME_IMAGE_HOST`       | `https://profileimg.plaync.com`                    |
    /// | `UPSTREAM_TIMEOUT_SECS` | `15`                                               |
    /// | `UPSTREAM_USER_AGENT`   | desktop Chrome UA                                  |
    /// | `UPSTREAM_REFERER`      | `https://aion2.plaync.com/`                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let var = |key: &str, default: String| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.timeout_secs.to_string())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_base_url: var("GAME_API_BASE_URL", defaults.api_base_url),
            search_base_url: var("GAME_SEARCH_BASE_URL", defaults.search_base_url),
            image_host: var("GAME_IMAGE_HOST", defaults.image_host),
            timeout_secs,
            user_agent: var("UPSTREAM_USER_AGENT", defaults.user_agent),
            referer: var("UPSTREAM_REFERER", defaults.referer),
        }
    }
}

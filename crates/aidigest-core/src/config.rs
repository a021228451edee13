use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location of the feed list, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "feeds.yaml";

/// AI/ML terms matched case-insensitively against titles and feed summaries
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // English
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural network",
    "reinforcement learning",
    "large language model",
    "llm",
    "gpt",
    "chatgpt",
    "openai",
    "anthropic",
    "claude",
    "gemini",
    "deepmind",
    "llama",
    "mistral",
    "transformer",
    "diffusion",
    "generative",
    "genai",
    "chatbot",
    "copilot",
    "ai",
    "a.i.",
    // Chinese
    "人工智能",
    "机器学习",
    "深度学习",
    "神经网络",
    "强化学习",
    "大模型",
    "大语言模型",
    "生成式",
    "智能体",
    "算力",
    "通义",
    "文心",
    "豆包",
    "智谱",
];

/// A named feed to aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Display name used as the digest source; falls back to the feed title
    #[serde(default)]
    pub name: String,
    /// RSS/Atom URL; feeds without one are skipped
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Feed request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL for feed fetching (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Trailing window in hours; entries published before now - window are dropped
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
    /// Relevance keywords, replacing the built-in list when set
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            keywords: default_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Fetch article pages for summaries; when off the feed summary is used
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Article page request timeout in seconds
    #[serde(default = "default_summary_timeout")]
    pub request_timeout_secs: u64,
    /// Minimum paragraph length (chars) accepted as a summary
    #[serde(default = "default_min_paragraph_chars")]
    pub min_paragraph_chars: usize,
    /// Maximum summary length (chars)
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            request_timeout_secs: default_summary_timeout(),
            min_paragraph_chars: default_min_paragraph_chars(),
            max_chars: default_max_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding digest-YYYYMMDD.md files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Digest and email title
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            title: default_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP host, reached over implicit TLS
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_window_hours() -> u32 {
    24
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_summary_timeout() -> u64 {
    8
}

fn default_min_paragraph_chars() -> usize {
    40
}

fn default_max_chars() -> usize {
    300
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_title() -> String {
    "AI 每日快讯".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465 // SMTPS
}

impl AppConfig {
    /// Load configuration from a YAML file, or TOML when the path ends in `.toml`
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Feeds that have a URL to fetch
    pub fn active_feeds(&self) -> impl Iterator<Item = &FeedConfig> {
        self.feeds.iter().filter(|f| !f.url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_yaml_feed_list() {
        let yaml = r#"
feeds:
  - name: OpenAI Blog
    url: https://openai.com/blog/rss.xml
  - name: 机器之心
    url: https://www.jiqizhixin.com/rss
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[1].name, "机器之心");
        assert_eq!(config.filter.window_hours, 24);
        assert_eq!(config.summary.max_chars, 300);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.mail.smtp_port, 465);
        assert!(config.filter.keywords.iter().any(|k| k == "人工智能"));
    }

    #[test]
    fn test_overrides_and_missing_fields() {
        let yaml = r#"
feeds:
  - url: https://example.com/feed.xml
  - name: No URL
filter:
  window_hours: 48
  keywords: [robot]
output:
  dir: digests
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.feeds[0].name, "");
        assert_eq!(config.active_feeds().count(), 1);
        assert_eq!(config.filter.window_hours, 48);
        assert_eq!(config.filter.keywords, vec!["robot".to_string()]);
        assert_eq!(config.output.dir, PathBuf::from("digests"));
        assert_eq!(config.output.title, "AI 每日快讯");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml_str("   \n").unwrap();
        assert!(config.feeds.is_empty());
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_toml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feeds.toml");
        std::fs::write(
            &path,
            r#"
[[feeds]]
name = "HN"
url = "https://hnrss.org/frontpage"

[mail]
smtp_host = "smtp.example.com"
"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.feeds[0].name, "HN");
        assert_eq!(config.mail.smtp_host, "smtp.example.com");
        assert_eq!(config.mail.smtp_port, 465);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppConfig::load(Path::new("/nonexistent/feeds.yaml")).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}

// 服务配置
//
// 从环境变量（含 .env）读取，非法数值回退到默认值

use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BASE_URL: &str = "https://hianime.to";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// CORS 允许的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// `*` 或逗号分隔的来源列表
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return CorsOrigins::Any;
        }

        CorsOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// 上游站点地址
    pub base_url: String,
    pub upstream_timeout: Duration,
    pub user_agent: String,
    pub cors_origins: CorsOrigins,
    /// 是否输出 HTTP 请求日志
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cors_origins: CorsOrigins::Any,
            enable_logging: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .unwrap_or_else(|_| {
                    tracing::warn!(
                        "Invalid UPSTREAM_TIMEOUT_SECS '{}', using {}",
                        raw,
                        DEFAULT_TIMEOUT_SECS
                    );
                    defaults.upstream_timeout
                }),
            None => defaults.upstream_timeout,
        };

        let enable_logging = get("ENABLE_LOGGING")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(defaults.enable_logging);

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            base_url: get("BASE_URL").unwrap_or(defaults.base_url),
            upstream_timeout,
            user_agent: get("USER_AGENT").unwrap_or(defaults.user_agent),
            cors_origins: get("ORIGIN")
                .map(|o| CorsOrigins::parse(&o))
                .unwrap_or(defaults.cors_origins),
            enable_logging,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.base_url, "https://hianime.to");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert!(config.enable_logging);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("BASE_URL", "https://mirror.example"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
            ("ORIGIN", "https://a.example, https://b.example"),
            ("ENABLE_LOGGING", "false"),
        ]));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.base_url, "https://mirror.example");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "eighty"),
            ("UPSTREAM_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_cors_origin_parsing() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("https://only.example"),
            CorsOrigins::List(vec!["https://only.example".to_string()])
        );
    }
}

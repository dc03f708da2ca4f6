const DEFAULT_HN_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
const DEFAULT_NUM_STORIES_TO_REQUEST: usize = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_DIRECTORY: &str = "./log";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) hn_api_base_url: String,
    pub(crate) num_stories_to_request: usize,
    pub(crate) request_timeout: std::time::Duration,
    pub(crate) tech_news_feed_url: Option<String>,
    pub(crate) log_to_console: bool,
    pub(crate) log_directory: String,
}

pub(crate) static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    check_dotenv(dotenvy::dotenv()).expect("Failed to load .env file");

    Config::from_lookup(|key| std::env::var(key).ok()).expect("Invalid configuration")
});

pub(crate) fn config() -> &'static Config {
    &CONFIG
}

/// A missing .env file is fine, everything has a default. One that exists but
/// can't be read or parsed is not.
fn check_dotenv(result: Result<std::path::PathBuf, dotenvy::Error>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)),
    }
}

impl Config {
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let num_stories_to_request: usize = match lookup("NUM_STORIES_TO_REQUEST") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("NUM_STORIES_TO_REQUEST is not a number: {value}"))?,
            None => DEFAULT_NUM_STORIES_TO_REQUEST,
        };

        let request_timeout_secs: u64 = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {value}"))?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let log_to_console: bool = match lookup("LOG_TO_CONSOLE") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("LOG_TO_CONSOLE is not true or false: {value}"))?,
            None => false,
        };

        Ok(Self {
            hn_api_base_url: lookup("HN_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_HN_API_BASE_URL.to_string()),
            num_stories_to_request,
            request_timeout: std::time::Duration::from_secs(request_timeout_secs),
            tech_news_feed_url: lookup("TECH_NEWS_FEED_URL").filter(|url| !url.trim().is_empty()),
            log_to_console,
            log_directory: lookup("LOG_DIRECTORY")
                .unwrap_or_else(|| DEFAULT_LOG_DIRECTORY.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.hn_api_base_url, "https://hacker-news.firebaseio.com/v0");
        assert_eq!(config.num_stories_to_request, 10);
        assert_eq!(config.request_timeout, std::time::Duration::from_secs(10));
        assert_eq!(config.tech_news_feed_url, None);
        assert!(!config.log_to_console);
        assert_eq!(config.log_directory, "./log");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HN_API_BASE_URL", "http://localhost:8080/v0/"),
            ("NUM_STORIES_TO_REQUEST", "25"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("TECH_NEWS_FEED_URL", "http://localhost:9090/items"),
            ("LOG_TO_CONSOLE", "true"),
            ("LOG_DIRECTORY", "/tmp/hn"),
        ]))
        .unwrap();

        assert_eq!(config.hn_api_base_url, "http://localhost:8080/v0");
        assert_eq!(config.num_stories_to_request, 25);
        assert_eq!(config.request_timeout, std::time::Duration::from_secs(3));
        assert_eq!(
            config.tech_news_feed_url.as_deref(),
            Some("http://localhost:9090/items")
        );
        assert!(config.log_to_console);
        assert_eq!(config.log_directory, "/tmp/hn");
    }

    #[test]
    fn test_blank_feed_url_is_unset() {
        let config = Config::from_lookup(lookup_from(&[("TECH_NEWS_FEED_URL", "  ")])).unwrap();
        assert_eq!(config.tech_news_feed_url, None);
    }

    #[test]
    fn test_missing_dotenv_is_ignored() {
        let not_found = dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound));

        assert!(check_dotenv(Err(not_found)).is_ok());
        assert!(check_dotenv(Ok(std::path::PathBuf::from(".env"))).is_ok());
    }

    #[test]
    fn test_broken_dotenv_is_an_error() {
        let broken = dotenvy::Error::LineParse("NUM_STORIES_TO_REQUEST 5".to_string(), 23);
        assert!(check_dotenv(Err(broken)).is_err());

        let unreadable =
            dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(check_dotenv(Err(unreadable)).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("NUM_STORIES_TO_REQUEST", "ten")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("LOG_TO_CONSOLE", "yes")])).is_err());
    }
}

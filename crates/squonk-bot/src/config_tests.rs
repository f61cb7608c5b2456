#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    struct InMemoryEnv(HashMap<&'static str, &'static str>);

    impl InMemoryEnv {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            Self(pairs.iter().cloned().collect())
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_limit_config() {
        let config = LimitConfig::default();
        assert_eq!(config.media_max_mb, 20);
    }

    #[test]
    fn test_default_polling_config() {
        let config = PollingConfig::default();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.limit, 100);
    }

    #[test]
    fn test_default_storage_config() {
        assert_eq!(StorageConfig::default().data_file, PathBuf::from("songs.json"));
    }

    // ── from_file ─────────────────────────────────────────────────────────────

    #[test]
    fn test_from_file_minimal() {
        let f = write_toml(
            r#"
[telegram]
bot_token = "123:ABC"
"#,
        );
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.telegram.bot_token, "123:ABC");
        assert!(cfg.telegram.drop_pending_updates);
        assert_eq!(cfg.storage.data_file, PathBuf::from("songs.json"));
        assert_eq!(cfg.limits.media_max_mb, 20);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.port, 3000);
    }

    #[test]
    fn test_from_file_full() {
        let f = write_toml(
            r#"
[telegram]
bot_token = "123:ABC"
drop_pending_updates = false

[telegram.polling]
timeout = 10
limit = 50

[storage]
data_file = "/var/lib/squonk/songs.json"

[limits]
media_max_mb = 5

[health]
enabled = false
port = 8081
"#,
        );
        let cfg = Config::from_file(f.path().to_str().unwrap()).unwrap();
        assert!(!cfg.telegram.drop_pending_updates);
        assert_eq!(cfg.telegram.polling.timeout, 10);
        assert_eq!(cfg.telegram.polling.limit, 50);
        assert_eq!(
            cfg.storage.data_file,
            PathBuf::from("/var/lib/squonk/songs.json")
        );
        assert_eq!(cfg.limits.media_max_mb, 5);
        assert_eq!(cfg.limits.max_bytes(), 5 * 1024 * 1024);
        assert!(!cfg.health.enabled);
        assert_eq!(cfg.health.port, 8081);
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/squonk-bot.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let f = write_toml("[telegram\nbot_token = ");
        let err = Config::from_file(f.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    // ── from_env ──────────────────────────────────────────────────────────────

    #[test]
    fn test_from_env_requires_token() {
        let env = InMemoryEnv::new(&[]);
        let err = Config::from_env_with(&env).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_from_env_defaults() {
        let env = InMemoryEnv::new(&[("BOT_TOKEN", "123:ABC")]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert_eq!(cfg.telegram.bot_token, "123:ABC");
        assert_eq!(cfg.storage.data_file, PathBuf::from("songs.json"));
        assert_eq!(cfg.limits.media_max_mb, 20);
        assert_eq!(cfg.health.port, 3000);
    }

    #[test]
    fn test_from_env_builds_telegram_section_from_injected_env() {
        let env = InMemoryEnv::new(&[("BOT_TOKEN", "injected:TOKEN")]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert_eq!(cfg.telegram.bot_token, "injected:TOKEN");
        assert!(cfg.telegram.drop_pending_updates);
        assert_eq!(cfg.telegram.polling.timeout, 30);
        assert_eq!(cfg.telegram.polling.limit, 100);
    }

    #[test]
    fn test_from_env_overrides() {
        let env = InMemoryEnv::new(&[
            ("BOT_TOKEN", "123:ABC"),
            ("SQUONK_DATA_FILE", "data/songs.json"),
            ("SQUONK_MEDIA_MAX_MB", "8"),
            ("HEALTH_CHECK_PORT", "9000"),
        ]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert_eq!(cfg.storage.data_file, PathBuf::from("data/songs.json"));
        assert_eq!(cfg.limits.media_max_mb, 8);
        assert_eq!(cfg.health.port, 9000);
    }

    #[test]
    fn test_from_env_ignores_unparseable_numbers() {
        let env = InMemoryEnv::new(&[
            ("BOT_TOKEN", "123:ABC"),
            ("SQUONK_MEDIA_MAX_MB", "lots"),
            ("HEALTH_CHECK_PORT", "-1"),
        ]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert_eq!(cfg.limits.media_max_mb, 20);
        assert_eq!(cfg.health.port, 3000);
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_rejects_blank_token() {
        let env = InMemoryEnv::new(&[("BOT_TOKEN", "   ")]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_env_config() {
        let env = InMemoryEnv::new(&[("BOT_TOKEN", "123:ABC")]);
        let cfg = Config::from_env_with(&env).unwrap();
        assert!(cfg.validate().is_ok());
    }
}

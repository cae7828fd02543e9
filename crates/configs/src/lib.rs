use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

/// Where the course collection and its two projection files live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_courses_file")]
    pub courses_file: String,
    #[serde(default = "default_modules_file")]
    pub modules_file: String,
    #[serde(default = "default_lessons_file")]
    pub lessons_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            courses_file: default_courses_file(),
            modules_file: default_modules_file(),
            lessons_file: default_lessons_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_courses_file() -> String { "courses.json".into() }
fn default_modules_file() -> String { "modules.json".into() }
fn default_lessons_file() -> String { "lessons.json".into() }
fn default_log_format() -> String { "compact".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file first; only when no file exists, build from env vars.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => Self::from_env(),
            Err(e) => return Err(e.context("failed to load config file")),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `SERVER_HOST`, `PORT`/`SERVER_PORT`, `DATA_DIR` and `LOG_FORMAT`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok());
        if let Some(port) = port {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = PathBuf::from(dir);
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            cfg.log.format = format;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.log.normalize();
        Ok(())
    }
}

fn is_missing_file(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        let names = [&self.courses_file, &self.modules_file, &self.lessons_file];
        for name in names {
            if name.trim().is_empty() {
                return Err(anyhow!("storage file names must not be empty"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(anyhow!("storage file name {name:?} must be a bare file name"));
            }
        }
        if self.courses_file == self.modules_file
            || self.courses_file == self.lessons_file
            || self.modules_file == self.lessons_file
        {
            return Err(anyhow!("storage file names must be distinct"));
        }
        Ok(())
    }

    pub fn courses_path(&self) -> PathBuf { self.data_dir.join(&self.courses_file) }
    pub fn modules_path(&self) -> PathBuf { self.data_dir.join(&self.modules_file) }
    pub fn lessons_path(&self) -> PathBuf { self.data_dir.join(&self.lessons_file) }

    /// Storage rooted at `dir` with the default file names.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self { data_dir: dir.into(), ..Self::default() }
    }
}

impl LogConfig {
    fn normalize(&mut self) {
        let lower = self.format.trim().to_ascii_lowercase();
        self.format = if lower == "json" { lower } else { default_log_format() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            data_dir = "/var/lib/courses"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.courses_file, "courses.json");
        assert_eq!(cfg.storage.courses_path(), PathBuf::from("/var/lib/courses/courses.json"));
        assert_eq!(cfg.log.format, "compact");
    }

    #[test]
    fn normalize_fills_worker_threads_and_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.log.format = "JSON".into();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.log.format, "json");
    }

    #[test]
    fn rejects_zero_port() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_colliding_or_nested_file_names() {
        let mut storage = StorageConfig::default();
        storage.modules_file = storage.courses_file.clone();
        assert!(storage.validate().is_err());

        let mut storage = StorageConfig::default();
        storage.lessons_file = "sub/lessons.json".into();
        assert!(storage.validate().is_err());
    }

    #[test]
    fn load_from_missing_file_fails() {
        let path = std::env::temp_dir().join(format!("missing_{}.toml", uuid::Uuid::new_v4()));
        assert!(load_from_file(path.to_str().unwrap()).is_err());
    }

    // env vars are process-wide; tests that touch them take this lock
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    const ENV_KEYS: [&str; 7] =
        ["CONFIG_PATH", "SERVER_HOST", "PORT", "SERVER_PORT", "TOKIO_WORKER_THREADS", "DATA_DIR", "LOG_FORMAT"];

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        for (k, v) in vars {
            std::env::set_var(k, v);
        }
        let out = f();
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
        out
    }

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("course_api_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let missing = std::env::temp_dir().join(format!("missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = with_env(
            &[
                ("CONFIG_PATH", missing.to_str().unwrap()),
                ("SERVER_HOST", "0.0.0.0"),
                ("PORT", "8081"),
                ("DATA_DIR", "/srv/courses"),
                ("LOG_FORMAT", "json"),
            ],
            AppConfig::load_or_env,
        )
        .unwrap();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8081");
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/srv/courses"));
        assert_eq!(cfg.log.format, "json");
    }

    #[test]
    fn server_port_is_used_when_port_is_unset() {
        let missing = std::env::temp_dir().join(format!("missing_{}.toml", uuid::Uuid::new_v4()));
        let cfg = with_env(
            &[("CONFIG_PATH", missing.to_str().unwrap()), ("SERVER_PORT", "7070")],
            AppConfig::load_or_env,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 7070);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        let path = temp_config("[storage]\ndata_dir = \"/srv/courses\"\nport = = 9\n");
        let res = with_env(&[("CONFIG_PATH", path.to_str().unwrap()), ("PORT", "8081")], AppConfig::load_or_env);
        assert!(res.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn wrongly_typed_field_is_an_error() {
        let path = temp_config("[server]\nhost = \"127.0.0.1\"\nport = \"not a number\"\n");
        let res = with_env(&[("CONFIG_PATH", path.to_str().unwrap())], AppConfig::load_or_env);
        assert!(res.is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn existing_file_wins_over_env() {
        let path = temp_config("[server]\nhost = \"127.0.0.1\"\nport = 9090\n\n[storage]\ndata_dir = \"/var/lib/courses\"\n");
        let cfg = with_env(
            &[("CONFIG_PATH", path.to_str().unwrap()), ("PORT", "8081"), ("DATA_DIR", "/srv/courses")],
            AppConfig::load_or_env,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/var/lib/courses"));
        let _ = std::fs::remove_file(&path);
    }
}

use serde::{Deserialize, Serialize};

/// Local fallback origin for share URLs.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// 平台注入的部署域名环境变量（不含协议）
pub const DEPLOYMENT_HOST_ENV: &str = "VERCEL_URL";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - database: 数据库连接与重试配置
/// - app: 分享链接使用的公开地址
/// - links: 链接签发参数
/// - cors: 跨域配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：MUKA，分隔符：__
    /// 示例：MUKA__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("MUKA")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            );

        let mut loaded = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        if loaded.app.deployment_host.is_none() {
            loaded.app.deployment_host = std::env::var(DEPLOYMENT_HOST_ENV).ok();
        }

        loaded
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// Connect/acquire timeout in seconds.
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    /// 0 keeps every operation to a single round-trip.
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

/// 分享链接地址配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Public origin of the web app, e.g. `https://muka.app`.
    #[serde(default)]
    pub public_url: Option<String>,
    /// Bare deployment host supplied by the hosting platform.
    #[serde(default)]
    pub deployment_host: Option<String>,
}

impl AppConfig {
    /// Origin used to build share URLs.
    ///
    /// `public_url` wins, then `https://{deployment_host}`, then the local
    /// default. Trailing slashes are removed.
    pub fn base_url(&self) -> String {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let base = if let Some(url) = non_empty(&self.public_url) {
            url
        } else if let Some(host) = non_empty(&self.deployment_host) {
            format!("https://{}", host)
        } else {
            DEFAULT_BASE_URL.to_string()
        };

        base.trim_end_matches('/').to_string()
    }
}

/// 链接签发配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// How many fresh hashes to try when the unique index rejects one.
    #[serde(default = "default_max_hash_attempts")]
    pub max_hash_attempts: u32,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://muka.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_seed_on_startup() -> bool {
    true
}

fn default_max_hash_attempts() -> u32 {
    3
}

fn default_cors_max_age() -> usize {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: 0,
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            max_hash_attempts: default_max_hash_attempts(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

use std::env;
use std::path::PathBuf;

/// Default upload limit: 5 MiB
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Runtime configuration for the blog API
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: "0.0.0.0")
    pub host: String,

    /// Bind port (default: 3000)
    pub port: u16,

    /// Public prefix for uploaded file URLs (default: "http://localhost:<port>")
    pub base_url: String,

    /// Directory uploaded images are written to (default: "./uploads")
    pub upload_dir: PathBuf,

    /// Maximum upload size in bytes (default: 5 MiB)
    pub max_file_size: usize,

    /// Allowed CORS origins, "*" allows any (comma separated)
    pub allowed_origins: Vec<String>,

    /// Insert sample articles into an empty database on startup
    pub seed_sample_data: bool,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_url: default_base_url(3000),
            upload_dir: PathBuf::from("./uploads"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_origins: vec!["*".to_string()],
            seed_sample_data: false,
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://root@localhost:3306/myblog".to_string(),
            max_connections: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::load(None)
    }

    /// Load configuration from environment variables, letting a CLI port win over `PORT`.
    /// `BASE_URL` falls back to the effective port when unset.
    pub fn load(port_override: Option<u16>) -> Self {
        let default = Self::default();

        let port = port_override
            .or_else(|| env::var("PORT").ok().and_then(|v| v.parse().ok()))
            .unwrap_or(default.port);

        Self {
            host: env::var("HOST").unwrap_or(default.host),

            port,

            base_url: env::var("BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| default_base_url(port)),

            upload_dir: env::var("UPLOAD_PATH")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),

            seed_sample_data: env::var("SEED_SAMPLE_DATA")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            database: DatabaseConfig::from_env(),
        }
    }

    /// Config for local development and tests: in-memory SQLite, permissive CORS
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            ..Self::default()
        }
    }

    /// Fully-qualified URL under which an uploaded file is served
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url.trim_end_matches('/'), filename)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
    pub fn from_env() -> Self {
        let default = Self::default();

        let url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let dialect = env::var("DB_DIALECT").unwrap_or_else(|_| "mysql".to_string());
            let name = env::var("DB_NAME").unwrap_or_else(|_| "myblog".to_string());

            if dialect == "sqlite" {
                return format!("sqlite://{}?mode=rwc", name);
            }

            let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("DB_PORT").unwrap_or_else(|_| match dialect.as_str() {
                "postgres" => "5432".to_string(),
                _ => "3306".to_string(),
            });
            let user = env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
            let credentials = match env::var("DB_PASSWORD") {
                Ok(password) if !password.is_empty() => format!("{}:{}", user, password),
                _ => user,
            };

            format!("{}://{}@{}:{}/{}", dialect, credentials, host, port, name)
        });

        Self {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_connections),
        }
    }

    /// Connection URL with the password masked, for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, location)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{}://{}:****@{}", scheme, user, location),
            None => self.url.clone(),
        }
    }
}

fn default_base_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

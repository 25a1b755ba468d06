use clap::Parser;

/// サーバ起動設定。CLI引数のみ（環境変数は読まない）。
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "books-api", version, about = "Minimal in-memory books CRUD REST API")]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

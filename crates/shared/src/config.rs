//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// 积分业务配置
///
/// 只包含演示环境可调的参数；积分计算规则（每 100 货币单位 1 分）和等级阈值
/// 属于业务规则，不开放配置。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoyaltyConfig {
    /// 演示账户共享密码
    pub demo_password: String,
    /// 启动时是否写入演示客户
    pub seed_demo_customers: bool,
    /// 仪表盘展示的最近交易条数
    pub recent_activity_limit: usize,
    /// 交易历史默认分页大小
    pub default_page_size: usize,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            demo_password: "demo123".to_string(),
            seed_demo_customers: true,
            recent_activity_limit: 5,
            default_page_size: 20,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub loyalty: LoyaltyConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（LOYALTY_ 前缀，层级用双下划线，如 LOYALTY_SERVER__PORT -> server.port）
    /// 5. 服务特定端口环境变量（如 LOYALTY_SERVICE_PORT）
    ///
    /// 启动前会尝试读取当前目录下的 `.env` 文件。
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let env = std::env::var("LOYALTY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut config = Self::load_from(Path::new(&config_dir), service_name, &env)?;

        if let Some(port) = Self::get_service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 从指定目录加载配置（不读取端口覆盖变量）
    pub fn load_from(config_dir: &Path, service_name: &str, env: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("LOYALTY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 从环境变量获取服务特定端口
    ///
    /// 将 "loyalty-service" 转换为 "LOYALTY_SERVICE_PORT"
    fn get_service_port_from_env(service_name: &str) -> Option<u16> {
        std::env::var(Self::service_port_var(service_name))
            .ok()
            .and_then(|v| v.parse().ok())
    }

    fn service_port_var(service_name: &str) -> String {
        format!("{}_PORT", service_name.to_uppercase().replace('-', "_"))
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.loyalty.demo_password, "demo123");
        assert_eq!(config.loyalty.recent_activity_limit, 5);
        assert!(config.loyalty.seed_demo_customers);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_service_port_var_name() {
        assert_eq!(
            AppConfig::service_port_var("loyalty-service"),
            "LOYALTY_SERVICE_PORT"
        );
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("loyalty-cfg-{}", uuid::Uuid::new_v4()));
        let config = AppConfig::load_from(&dir, "loyalty-service", "test").unwrap();

        assert_eq!(config.service_name, "loyalty-service");
        assert_eq!(config.environment, "test");
        assert_eq!(config.loyalty.default_page_size, 20);
    }

    #[test]
    fn test_load_from_layered_files() {
        let dir = std::env::temp_dir().join(format!("loyalty-cfg-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            "[server]\nport = 7000\n\n[loyalty]\ndemo_password = \"base\"\n",
        )
        .unwrap();
        fs::write(
            dir.join("loyalty-service.toml"),
            "[loyalty]\ndemo_password = \"override\"\nrecent_activity_limit = 10\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&dir, "loyalty-service", "test").unwrap();

        // 服务配置覆盖默认配置，未出现的字段保持默认值
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.loyalty.demo_password, "override");
        assert_eq!(config.loyalty.recent_activity_limit, 10);
        assert_eq!(config.loyalty.default_page_size, 20);

        let _ = fs::remove_dir_all(&dir);
    }
}

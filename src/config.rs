//! MongoDB 连接配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::path::Path;
use std::time::Duration;

use crate::env::{EnvError, EnvResult, EnvVar};

/// 按优先级尝试加载的 .env 文件
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// MongoDB 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB 连接字符串
    pub connection_string: String,
    /// 数据库名称
    pub database_name: String,
    /// 集合名称
    pub collection_name: String,
    /// 单次操作超时，`None` 表示不设时限
    pub operation_timeout: Option<Duration>,
}

impl MongoConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::mongodb;

        Ok(Self {
            connection_string: mongodb::ConnectionString::get()?,
            database_name: mongodb::DatabaseName::get()?,
            collection_name: mongodb::CollectionName::get()?,
            operation_timeout: mongodb::OperationTimeout::get()?,
        })
    }

    /// 先加载 .env 文件，再从环境变量创建并验证配置
    pub fn load() -> EnvResult<Self> {
        load_dotenv();
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.connection_string.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_URL".to_string(),
                message: "Connection string cannot be empty".to_string(),
            });
        }

        if self.database_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_DATABASE".to_string(),
                message: "Database name cannot be empty".to_string(),
            });
        }

        if self.collection_name.is_empty() {
            return Err(EnvError {
                variable: "MONGODB_COLLECTION".to_string(),
                message: "Collection name cannot be empty".to_string(),
            });
        }

        if self.operation_timeout == Some(Duration::ZERO) {
            return Err(EnvError {
                variable: "MONGODB_OPERATION_TIMEOUT".to_string(),
                message: "Timeout must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        use crate::env::mongodb;

        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load MongoDB config from environment: {}. Using defaults.",
                e
            );
            Self {
                connection_string: mongodb::ConnectionString::fallback().unwrap_or_default(),
                database_name: mongodb::DatabaseName::fallback().unwrap_or_default(),
                collection_name: mongodb::CollectionName::fallback().unwrap_or_default(),
                operation_timeout: None,
            }
        })
    }
}

/// 加载第一个存在的 .env 文件
fn load_dotenv() {
    for env_file in ENV_FILES {
        if Path::new(env_file).exists() {
            match dotenv::from_filename(env_file) {
                Ok(_) => {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    return;
                }
                Err(e) => {
                    tracing::warn!("无法加载环境变量文件 {}: {}", env_file, e);
                }
            }
        }
    }

    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("未找到 .env 文件或加载失败: {}", e);
    }
}

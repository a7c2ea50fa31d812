//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    /// 未设置时使用的值，`None` 表示必须设置
    fn fallback() -> Option<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::fallback().ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "TRANSLATION_STORE_LOG_LEVEL";
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn fallback() -> Option<String> {
            Some("info".to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// MongoDB相关环境变量
pub mod mongodb {
    use super::*;

    /// MongoDB连接字符串
    pub struct ConnectionString;
    impl EnvVar<String> for ConnectionString {
        const NAME: &'static str = "MONGODB_URL";
        const DESCRIPTION: &'static str = "MongoDB connection string";

        fn fallback() -> Option<String> {
            Some("mongodb://localhost:27017".to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "MongoDB URL must start with mongodb:// or mongodb+srv://"
                        .to_string(),
                })
            }
        }
    }

    /// 数据库名称
    pub struct DatabaseName;
    impl EnvVar<String> for DatabaseName {
        const NAME: &'static str = "MONGODB_DATABASE";
        const DESCRIPTION: &'static str = "MongoDB database name";

        fn fallback() -> Option<String> {
            Some("translations".to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Database")
        }
    }

    /// 集合名称
    pub struct CollectionName;
    impl EnvVar<String> for CollectionName {
        const NAME: &'static str = "MONGODB_COLLECTION";
        const DESCRIPTION: &'static str = "MongoDB collection name";

        fn fallback() -> Option<String> {
            Some("translations".to_string())
        }

        fn parse(value: &str) -> EnvResult<String> {
            parse_name(value, Self::NAME, "Collection")
        }
    }

    /// 单次操作超时
    pub struct OperationTimeout;
    impl EnvVar<Option<Duration>> for OperationTimeout {
        const NAME: &'static str = "MONGODB_OPERATION_TIMEOUT";
        const DESCRIPTION: &'static str =
            "Per-operation deadline in seconds (unset: no deadline)";

        fn fallback() -> Option<Option<Duration>> {
            Some(None)
        }

        fn parse(value: &str) -> EnvResult<Option<Duration>> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }

            let seconds: u64 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout must be greater than 0".to_string(),
                });
            }

            if seconds > 300 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Timeout too long (max 300 seconds)".to_string(),
                });
            }

            Ok(Some(Duration::from_secs(seconds)))
        }
    }

    fn parse_name(value: &str, var_name: &str, what: &str) -> EnvResult<String> {
        let name = value.trim();
        if name.is_empty() {
            return Err(EnvError {
                variable: var_name.to_string(),
                message: format!("{} name cannot be empty", what),
            });
        }
        Ok(name.to_string())
    }
}

/// 渲染一行变量说明
fn describe<T: fmt::Debug, V: EnvVar<T>>() -> String {
    let default = match V::fallback() {
        Some(value) => format!("default: {:?}", value),
        None => "required".to_string(),
    };
    format!("- `{}`: {} ({})\n", V::NAME, V::DESCRIPTION, default)
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&describe::<String, core::LogLevel>());

    docs.push_str("\n## MongoDB Configuration\n\n");
    docs.push_str(&describe::<String, mongodb::ConnectionString>());
    docs.push_str(&describe::<String, mongodb::DatabaseName>());
    docs.push_str(&describe::<String, mongodb::CollectionName>());
    docs.push_str(&describe::<Option<Duration>, mongodb::OperationTimeout>());

    docs
}

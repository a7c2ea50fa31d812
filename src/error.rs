//! 翻译存储统一错误处理
//!
//! 数据库驱动返回的错误原样向上传递，只有 “记录不存在” 会被单独识别。

use thiserror::Error;

use crate::env::EnvError;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// 记录或指定语言不存在
    #[error("翻译不存在")]
    NotFound,

    /// 数据库驱动错误（连接、解码、服务端错误）
    #[error("数据库错误: {0}")]
    Database(#[from] mongodb::error::Error),

    /// 值无法转换为 BSON
    #[error("序列化错误: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// 非法的语言代码
    #[error("无效的语言代码: {0:?}")]
    InvalidLanguage(String),

    /// 超过配置的操作时限
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] EnvError),
}

impl StoreError {
    /// 是否为 “不存在” 错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// 检查错误是否可重试
    ///
    /// 仅用于分类，本库自身从不重试。
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Database(e) => {
                e.contains_label(mongodb::error::RETRYABLE_WRITE_ERROR)
                    || e.contains_label(mongodb::error::TRANSIENT_TRANSACTION_ERROR)
                    || matches!(
                        *e.kind,
                        mongodb::error::ErrorKind::Io(_)
                            | mongodb::error::ErrorKind::ConnectionPoolCleared { .. }
                            | mongodb::error::ErrorKind::ServerSelection { .. }
                    )
            }
            StoreError::Timeout(_) => true,
            StoreError::NotFound
            | StoreError::Serialization(_)
            | StoreError::InvalidLanguage(_)
            | StoreError::Config(_) => false,
        }
    }
}

impl From<tokio::time::error::Elapsed> for StoreError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        StoreError::Timeout(error.to_string())
    }
}

/// 错误结果类型别名
pub type StoreResult<T> = Result<T, StoreError>;

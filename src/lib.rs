//! # Translation Store
//!
//! 基于 MongoDB 的通用键值翻译存储：按实体标识保存 “语言代码 → 翻译值” 映射
//! 以及一份附加字段。
//!
//! ## 模块组织
//!
//! - `record` - 语言代码、翻译记录与只读视图
//! - `store` - 存储契约及其 MongoDB / 内存实现
//! - `error` - 统一错误类型
//! - `env` - 类型安全的环境变量
//! - `config` - MongoDB 连接配置
//! - `telemetry` - 日志初始化

pub mod config;
pub mod env;
pub mod error;
pub mod record;
pub mod store;
pub mod telemetry;

pub use config::MongoConfig;
pub use error::{StoreError, StoreResult};
pub use record::{Language, TranslationRecord, TranslationResponse};
pub use store::memory::{MemoryTranslationStore, RecordFilter};
pub use store::mongo::MongoTranslationStore;
pub use store::{Storable, TranslationStore};

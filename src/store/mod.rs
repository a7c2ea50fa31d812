//! # 翻译存储契约
//!
//! 所有操作都是单文档读取或基于 `$set` 的局部更新，不做重试、不使用事务。
//! 取消操作只需丢弃返回的 future；需要时限时可在调用方包一层
//! `tokio::time::timeout`，或使用存储自带的操作超时。

pub mod memory;
pub mod mongo;
pub mod query;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use crate::record::{Language, TranslationRecord};

/// 可存入翻译记录的类型（标识、翻译值、附加字段）
pub trait Storable: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {}

impl<T> Storable for T where T: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {}

/// 通用翻译存储
#[async_trait]
pub trait TranslationStore<Id, V, A>: Send + Sync
where
    Id: Send + Sync + 'static,
    V: Send + Sync + 'static,
    A: Send + Sync + 'static,
{
    /// `get_all_translations` 使用的查询条件类型
    type Filter: Send + 'static;

    /// 返回所有匹配记录，无匹配时返回空列表
    async fn get_all_translations(
        &self,
        filter: Self::Filter,
    ) -> StoreResult<Vec<TranslationRecord<Id, V, A>>>;

    /// 读取完整记录，不存在时返回 `NotFound`
    async fn get_translation(&self, id: &Id) -> StoreResult<TranslationRecord<Id, V, A>>;

    /// 读取单个语言的值
    ///
    /// 记录不存在或该语言不存在时都返回 `NotFound`。
    async fn get_language(&self, id: &Id, language: &Language) -> StoreResult<V>;

    /// 覆盖附加字段，不会创建记录；记录不存在时返回 `NotFound`
    async fn set_additional(&self, id: &Id, additional: &A) -> StoreResult<()>;

    /// 写入单个语言，记录不存在时创建
    async fn upsert(&self, id: &Id, language: &Language, value: &V) -> StoreResult<()>;

    /// 覆盖附加字段并合并给定语言，记录不存在时创建
    ///
    /// 映射中未出现的语言保持不变。
    async fn upsert_all(
        &self,
        id: &Id,
        translations: &HashMap<Language, V>,
        additional: &A,
    ) -> StoreResult<()>;

    /// 删除记录，记录不存在时同样成功
    async fn delete(&self, id: &Id) -> StoreResult<()>;
}

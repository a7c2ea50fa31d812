//! # MongoDB 翻译存储
//!
//! 把存储契约的每个方法直接翻译为一次 MongoDB 单文档操作

use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection, Database};

use super::query;
use super::{Storable, TranslationStore};
use crate::config::MongoConfig;
use crate::error::{StoreError, StoreResult};
use crate::record::{Language, TranslationRecord};

/// 基于 MongoDB 集合的翻译存储
///
/// 无内部可变状态，并发完全交给驱动的连接池。
pub struct MongoTranslationStore<Id, V, A>
where
    Id: Storable,
    V: Storable,
    A: Storable,
{
    /// 翻译记录集合
    collection: Collection<TranslationRecord<Id, V, A>>,
    /// 单次操作时限
    operation_timeout: Option<Duration>,
    _marker: PhantomData<fn() -> (Id, V, A)>,
}

impl<Id, V, A> Clone for MongoTranslationStore<Id, V, A>
where
    Id: Storable,
    V: Storable,
    A: Storable,
{
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            operation_timeout: self.operation_timeout,
            _marker: PhantomData,
        }
    }
}

impl<Id, V, A> MongoTranslationStore<Id, V, A>
where
    Id: Storable,
    V: Storable,
    A: Storable,
{
    /// 使用调用方提供的集合
    pub fn new(collection: Collection<TranslationRecord<Id, V, A>>) -> Self {
        Self {
            collection,
            operation_timeout: None,
            _marker: PhantomData,
        }
    }

    /// 使用数据库中指定名称的集合
    pub fn from_database(db: &Database, collection_name: &str) -> Self {
        Self::new(db.collection(collection_name))
    }

    /// 按配置建立连接
    ///
    /// 驱动连接是惰性的，这里不会访问服务器；需要确认连通性时调用 [`ping`](Self::ping)。
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        config.validate()?;

        let client = Client::with_uri_str(&config.connection_string).await?;
        let db = client.database(&config.database_name);
        tracing::info!(
            "翻译存储已连接: {}.{}",
            config.database_name,
            config.collection_name
        );

        let store = Self::from_database(&db, &config.collection_name);
        Ok(match config.operation_timeout {
            Some(timeout) => store.with_timeout(timeout),
            None => store,
        })
    }

    /// 为每次操作设置时限，超时返回 `StoreError::Timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    pub fn collection(&self) -> &Collection<TranslationRecord<Id, V, A>> {
        &self.collection
    }

    /// 检查数据库连通性
    pub async fn ping(&self) -> StoreResult<()> {
        let db = self
            .collection
            .client()
            .database(self.collection.namespace().db.as_str());
        self.run("ping", async {
            db.run_command(doc! { "ping": 1 }).await?;
            Ok(())
        })
        .await
    }

    /// 执行一次数据库调用，按需套上时限
    async fn run<T, F>(&self, operation: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        tracing::debug!(
            collection = self.collection.name(),
            operation,
            "执行翻译存储操作"
        );

        let result = match self.operation_timeout {
            Some(timeout) => tokio::time::timeout(timeout, fut).await?,
            None => fut.await,
        };

        if let Err(ref e) = result {
            if !e.is_not_found() {
                tracing::debug!(operation, "翻译存储操作失败: {}", e);
            }
        }

        result
    }
}

/// 从投影结果中取出单个语言，记录或语言缺失都视为 `NotFound`
fn projected_language<Id, V, A>(
    record: Option<TranslationRecord<Id, V, A>>,
    language: &Language,
) -> StoreResult<V> {
    record
        .and_then(|record| record.take_language(language))
        .ok_or(StoreError::NotFound)
}

/// 不带 upsert 的更新没有命中任何文档时返回 `NotFound`
fn ensure_matched(matched_count: u64) -> StoreResult<()> {
    if matched_count == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl<Id, V, A> TranslationStore<Id, V, A> for MongoTranslationStore<Id, V, A>
where
    Id: Storable,
    V: Storable,
    A: Storable,
{
    type Filter = Document;

    async fn get_all_translations(
        &self,
        filter: Document,
    ) -> StoreResult<Vec<TranslationRecord<Id, V, A>>> {
        self.run("get_all_translations", async {
            let cursor = self.collection.find(filter).await?;
            let records: Vec<_> = cursor.try_collect().await?;
            Ok(records)
        })
        .await
    }

    async fn get_translation(&self, id: &Id) -> StoreResult<TranslationRecord<Id, V, A>> {
        let filter = query::id_filter(id)?;

        self.run("get_translation", async {
            self.collection
                .find_one(filter)
                .await?
                .ok_or(StoreError::NotFound)
        })
        .await
    }

    async fn get_language(&self, id: &Id, language: &Language) -> StoreResult<V> {
        let filter = query::language_filter(id, language)?;
        let projection = query::language_projection(language);

        self.run("get_language", async {
            let record = self
                .collection
                .find_one(filter)
                .projection(projection)
                .await?;

            projected_language(record, language)
        })
        .await
    }

    async fn set_additional(&self, id: &Id, additional: &A) -> StoreResult<()> {
        let filter = query::id_filter(id)?;
        let update = query::set_additional_update(additional)?;

        self.run("set_additional", async {
            let result = self.collection.update_one(filter, update).await?;
            ensure_matched(result.matched_count)
        })
        .await
    }

    async fn upsert(&self, id: &Id, language: &Language, value: &V) -> StoreResult<()> {
        let filter = query::id_filter(id)?;
        let update = query::set_language_update(language, value)?;

        self.run("upsert", async {
            self.collection
                .update_one(filter, update)
                .upsert(true)
                .await?;
            Ok(())
        })
        .await
    }

    async fn upsert_all(
        &self,
        id: &Id,
        translations: &HashMap<Language, V>,
        additional: &A,
    ) -> StoreResult<()> {
        let filter = query::id_filter(id)?;
        let update = query::set_all_update(translations, additional)?;

        self.run("upsert_all", async {
            self.collection
                .update_one(filter, update)
                .upsert(true)
                .await?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &Id) -> StoreResult<()> {
        let filter = query::id_filter(id)?;

        self.run("delete", async {
            let result = self.collection.delete_one(filter).await?;
            tracing::debug!(deleted = result.deleted_count, "删除翻译记录");
            Ok(())
        })
        .await
    }
}

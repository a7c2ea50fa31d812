//! 内存翻译存储
//!
//! 与 MongoDB 实现遵循相同契约，便于在没有数据库的环境中使用和测试。

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TranslationStore;
use crate::error::{StoreError, StoreResult};
use crate::record::{Language, TranslationRecord, TranslationResponse};

type Predicate<Id, V, A> = dyn Fn(&TranslationRecord<Id, V, A>) -> bool + Send + Sync;

/// 内存存储的查询条件
pub struct RecordFilter<Id, V, A> {
    predicate: Box<Predicate<Id, V, A>>,
}

impl<Id, V, A> RecordFilter<Id, V, A>
where
    Id: Eq + Send + Sync + 'static,
    V: 'static,
    A: 'static,
{
    /// 匹配所有记录
    pub fn all() -> Self {
        Self::matching(|_| true)
    }

    /// 匹配给定标识之一
    pub fn ids(ids: impl IntoIterator<Item = Id>) -> Self {
        let ids: Vec<Id> = ids.into_iter().collect();
        Self::matching(move |record| ids.contains(record.id()))
    }

    /// 匹配包含指定语言的记录
    pub fn has_language(language: Language) -> Self {
        Self::matching(move |record| record.translations().contains_key(&language))
    }

    /// 自定义条件
    pub fn matching<F>(predicate: F) -> Self
    where
        F: Fn(&TranslationRecord<Id, V, A>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    fn matches(&self, record: &TranslationRecord<Id, V, A>) -> bool {
        (self.predicate)(record)
    }
}

impl<Id, V, A> fmt::Debug for RecordFilter<Id, V, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFilter").finish_non_exhaustive()
    }
}

/// 基于 `HashMap` 的翻译存储，克隆后共享同一份数据
pub struct MemoryTranslationStore<Id, V, A> {
    records: Arc<RwLock<HashMap<Id, TranslationRecord<Id, V, A>>>>,
}

impl<Id, V, A> Clone for MemoryTranslationStore<Id, V, A> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<Id, V, A> Default for MemoryTranslationStore<Id, V, A> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<Id, V, A> MemoryTranslationStore<Id, V, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前记录数
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<Id, V, A> TranslationStore<Id, V, A> for MemoryTranslationStore<Id, V, A>
where
    Id: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    A: Clone + Send + Sync + 'static,
{
    type Filter = RecordFilter<Id, V, A>;

    async fn get_all_translations(
        &self,
        filter: RecordFilter<Id, V, A>,
    ) -> StoreResult<Vec<TranslationRecord<Id, V, A>>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn get_translation(&self, id: &Id) -> StoreResult<TranslationRecord<Id, V, A>> {
        let records = self.records.read().await;
        records.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn get_language(&self, id: &Id, language: &Language) -> StoreResult<V> {
        let records = self.records.read().await;
        records
            .get(id)
            .and_then(|record| record.language(language))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn set_additional(&self, id: &Id, additional: &A) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or(StoreError::NotFound)?;
        record.set_additional(additional.clone());
        Ok(())
    }

    async fn upsert(&self, id: &Id, language: &Language, value: &V) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records
            .entry(id.clone())
            .or_insert_with(|| TranslationRecord::new(id.clone(), HashMap::new(), None))
            .translations_mut()
            .insert(language.clone(), value.clone());
        Ok(())
    }

    async fn upsert_all(
        &self,
        id: &Id,
        translations: &HashMap<Language, V>,
        additional: &A,
    ) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .entry(id.clone())
            .or_insert_with(|| TranslationRecord::new(id.clone(), HashMap::new(), None));

        record.set_additional(additional.clone());
        record.translations_mut().extend(
            translations
                .iter()
                .map(|(language, value)| (language.clone(), value.clone())),
        );
        Ok(())
    }

    async fn delete(&self, id: &Id) -> StoreResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> Language {
        Language::new(code).unwrap()
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store: MemoryTranslationStore<String, String, ()> = MemoryTranslationStore::new();
        let other = store.clone();

        store
            .upsert(&"p1".to_string(), &lang("en"), &"Hello".to_string())
            .await
            .unwrap();

        assert_eq!(other.len().await, 1);
        assert_eq!(
            other.get_language(&"p1".to_string(), &lang("en")).await.unwrap(),
            "Hello"
        );
    }

    #[tokio::test]
    async fn test_filters() {
        let store: MemoryTranslationStore<u32, String, ()> = MemoryTranslationStore::new();
        store.upsert(&1, &lang("en"), &"one".to_string()).await.unwrap();
        store.upsert(&2, &lang("fr"), &"deux".to_string()).await.unwrap();
        store.upsert(&3, &lang("en"), &"three".to_string()).await.unwrap();

        let all = store.get_all_translations(RecordFilter::all()).await.unwrap();
        assert_eq!(all.len(), 3);

        let mut english: Vec<u32> = store
            .get_all_translations(RecordFilter::has_language(lang("en")))
            .await
            .unwrap()
            .iter()
            .map(|record| *record.id())
            .collect();
        english.sort_unstable();
        assert_eq!(english, vec![1, 3]);

        let picked = store
            .get_all_translations(RecordFilter::ids([2, 9]))
            .await
            .unwrap();
        assert_eq!(picked.len(), 1);

        let custom = store
            .get_all_translations(RecordFilter::matching(|record| *record.id() > 1))
            .await
            .unwrap();
        assert_eq!(custom.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_empties_store() {
        let store: MemoryTranslationStore<u32, String, ()> = MemoryTranslationStore::new();
        store.upsert(&1, &lang("en"), &"one".to_string()).await.unwrap();
        store.delete(&1).await.unwrap();
        assert!(store.is_empty().await);
    }
}

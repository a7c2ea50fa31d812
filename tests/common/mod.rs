// 集成测试公共模块
//
// 存储契约的检查函数只依赖 `TranslationStore`，内存实现和 MongoDB 实现共用。

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use translation_store::{
    Language, StoreError, TranslationResponse, TranslationStore,
};

/// 测试用附加字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub source: String,
    pub reviewed: bool,
}

impl Meta {
    pub fn new(source: &str, reviewed: bool) -> Self {
        Self {
            source: source.to_string(),
            reviewed,
        }
    }
}

pub fn lang(code: &str) -> Language {
    Language::new(code).unwrap()
}

/// 生成本次测试进程内唯一的标识
pub fn unique_id(prefix: &str) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!(
        "{}-{}-{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

pub fn translations(pairs: &[(&str, &str)]) -> HashMap<Language, String> {
    pairs
        .iter()
        .map(|(code, value)| (lang(code), value.to_string()))
        .collect()
}

fn assert_not_found<T: std::fmt::Debug>(result: Result<T, StoreError>) {
    match result {
        Err(StoreError::NotFound) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

/// 不存在的标识读取失败
pub async fn check_missing_record<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("missing");
    assert_not_found(store.get_translation(&id).await);
    assert_not_found(store.get_language(&id, &lang("en")).await);
}

/// 依次 upsert 两种语言再删除
pub async fn check_upsert_lifecycle<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("p1");

    store
        .upsert(&id, &lang("en"), &"Hello".to_string())
        .await
        .unwrap();
    let record = store.get_translation(&id).await.unwrap();
    assert_eq!(record.id(), &id);
    assert_eq!(record.translations(), &translations(&[("en", "Hello")]));
    assert!(record.additional().is_none());

    store
        .upsert(&id, &lang("fr"), &"Bonjour".to_string())
        .await
        .unwrap();
    let record = store.get_translation(&id).await.unwrap();
    assert_eq!(
        record.translations(),
        &translations(&[("en", "Hello"), ("fr", "Bonjour")])
    );

    store.delete(&id).await.unwrap();
    assert_not_found(store.get_translation(&id).await);
}

/// 对同一语言重复 upsert 以最后一次为准
pub async fn check_upsert_overwrites_language<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("overwrite");

    store.upsert(&id, &lang("en"), &"Helo".to_string()).await.unwrap();
    store.upsert(&id, &lang("en"), &"Hello".to_string()).await.unwrap();

    assert_eq!(store.get_language(&id, &lang("en")).await.unwrap(), "Hello");
    store.delete(&id).await.unwrap();
}

/// upsert_all 覆盖附加字段并合并语言
pub async fn check_upsert_all_merges<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("merge");

    store
        .upsert_all(
            &id,
            &translations(&[("en", "Save"), ("de", "Speichern")]),
            &Meta::new("import", false),
        )
        .await
        .unwrap();

    store
        .upsert_all(
            &id,
            &translations(&[("en", "Save changes"), ("fr", "Enregistrer")]),
            &Meta::new("editor", true),
        )
        .await
        .unwrap();

    let record = store.get_translation(&id).await.unwrap();
    assert_eq!(record.additional(), Some(&Meta::new("editor", true)));
    assert_eq!(
        record.translations(),
        &translations(&[("en", "Save changes"), ("de", "Speichern"), ("fr", "Enregistrer")])
    );

    store.delete(&id).await.unwrap();
}

/// 空映射的 upsert_all 仍会创建记录并写入附加字段
pub async fn check_upsert_all_without_languages<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("bare");

    store
        .upsert_all(&id, &HashMap::new(), &Meta::new("seed", false))
        .await
        .unwrap();

    let record = store.get_translation(&id).await.unwrap();
    assert!(record.translations().is_empty());
    assert_eq!(record.additional(), Some(&Meta::new("seed", false)));

    store.delete(&id).await.unwrap();
}

/// set_additional 只改附加字段，不创建记录
pub async fn check_set_additional<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("adt");

    assert_not_found(store.set_additional(&id, &Meta::new("x", false)).await);
    assert_not_found(store.get_translation(&id).await);

    store.upsert(&id, &lang("en"), &"Title".to_string()).await.unwrap();
    store
        .set_additional(&id, &Meta::new("review", true))
        .await
        .unwrap();

    let record = store.get_translation(&id).await.unwrap();
    assert_eq!(record.additional(), Some(&Meta::new("review", true)));
    assert_eq!(record.translations(), &translations(&[("en", "Title")]));

    store.delete(&id).await.unwrap();
}

/// get_language 在记录存在但语言缺失时同样返回 NotFound
pub async fn check_get_language<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("lang");

    store
        .upsert_all(
            &id,
            &translations(&[("en", "Cancel"), ("ja", "キャンセル")]),
            &Meta::new("import", true),
        )
        .await
        .unwrap();

    assert_eq!(
        store.get_language(&id, &lang("ja")).await.unwrap(),
        "キャンセル"
    );
    assert_not_found(store.get_language(&id, &lang("fr")).await);

    store.delete(&id).await.unwrap();
}

/// 删除不存在的标识同样成功
pub async fn check_delete_is_idempotent<S>(store: &S)
where
    S: TranslationStore<String, String, Meta>,
{
    let id = unique_id("gone");

    store.delete(&id).await.unwrap();
    assert_not_found(store.get_translation(&id).await);

    store.upsert(&id, &lang("en"), &"Bye".to_string()).await.unwrap();
    store.delete(&id).await.unwrap();
    store.delete(&id).await.unwrap();
    assert_not_found(store.get_translation(&id).await);
}

/// 无匹配时返回空列表
pub async fn check_get_all_empty<S>(store: &S, nothing: S::Filter)
where
    S: TranslationStore<String, String, Meta>,
{
    let records = store.get_all_translations(nothing).await.unwrap();
    assert!(records.is_empty());
}

/// 运行全部契约检查
pub async fn check_contract<S>(store: &S, nothing: S::Filter)
where
    S: TranslationStore<String, String, Meta>,
{
    check_missing_record(store).await;
    check_upsert_lifecycle(store).await;
    check_upsert_overwrites_language(store).await;
    check_upsert_all_merges(store).await;
    check_upsert_all_without_languages(store).await;
    check_set_additional(store).await;
    check_get_language(store).await;
    check_delete_is_idempotent(store).await;
    check_get_all_empty(store, nothing).await;
}

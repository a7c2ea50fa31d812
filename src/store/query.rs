//! 过滤条件与更新文档构建
//!
//! 纯函数，不访问数据库。

use std::collections::HashMap;

use bson::{doc, Document};
use serde::Serialize;

use crate::error::StoreResult;
use crate::record::Language;

/// 主键字段
pub const ID_FIELD: &str = "_id";
/// 翻译映射字段
pub const TRANSLATIONS_FIELD: &str = "trs";
/// 附加字段
pub const ADDITIONAL_FIELD: &str = "adt";

/// 单个语言的字段路径：`trs.<lang>`
pub fn translation_path(language: &Language) -> String {
    format!("{}.{}", TRANSLATIONS_FIELD, language)
}

/// `{_id: <id>}`
pub fn id_filter<Id: Serialize>(id: &Id) -> StoreResult<Document> {
    Ok(doc! { ID_FIELD: bson::to_bson(id)? })
}

/// `{_id: <id>, "trs.<lang>": {$exists: true}}`
pub fn language_filter<Id: Serialize>(id: &Id, language: &Language) -> StoreResult<Document> {
    let mut filter = id_filter(id)?;
    filter.insert(translation_path(language), doc! { "$exists": true });
    Ok(filter)
}

/// 只取回 `trs.<lang>`
pub fn language_projection(language: &Language) -> Document {
    doc! { translation_path(language): 1 }
}

/// `{$set: {"trs.<lang>": <value>}}`
pub fn set_language_update<V: Serialize>(language: &Language, value: &V) -> StoreResult<Document> {
    Ok(doc! { "$set": { translation_path(language): bson::to_bson(value)? } })
}

/// `{$set: {adt: <additional>, "trs.<l1>": <v1>, ...}}`
pub fn set_all_update<V: Serialize, A: Serialize>(
    translations: &HashMap<Language, V>,
    additional: &A,
) -> StoreResult<Document> {
    let mut set = doc! { ADDITIONAL_FIELD: bson::to_bson(additional)? };
    for (language, value) in translations {
        set.insert(translation_path(language), bson::to_bson(value)?);
    }
    Ok(doc! { "$set": set })
}

/// `{$set: {adt: <additional>}}`
pub fn set_additional_update<A: Serialize>(additional: &A) -> StoreResult<Document> {
    Ok(doc! { "$set": { ADDITIONAL_FIELD: bson::to_bson(additional)? } })
}

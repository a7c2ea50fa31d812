//! 翻译记录数据模型
//!
//! 存储形态：`{ _id: <id>, trs: { <lang>: <value>, ... }, adt: <additional> }`

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{StoreError, StoreResult};

/// 语言代码
///
/// 作为字段路径 `trs.<lang>` 的一段使用，因此不能为空、不能包含 `.` 或 NUL、
/// 也不能以 `$` 开头。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// 校验并创建语言代码
    pub fn new(code: impl Into<String>) -> StoreResult<Self> {
        let code = code.into();
        if code.is_empty() || code.starts_with('$') || code.contains('.') || code.contains('\0')
        {
            return Err(StoreError::InvalidLanguage(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Language {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Language {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.0
    }
}

/// 翻译记录的只读视图
pub trait TranslationResponse<Id, V, A> {
    fn id(&self) -> &Id;
    fn translations(&self) -> &HashMap<Language, V>;
    /// 从未写入过附加字段时为 `None`
    fn additional(&self) -> Option<&A>;
}

/// 每个实体标识对应一条翻译记录
///
/// `adt` 缺失时为 `None`；只要字段存在（即便是 null）就解码为 `Some`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "Id: Deserialize<'de>, V: Deserialize<'de>, A: Deserialize<'de>"))]
pub struct TranslationRecord<Id, V, A> {
    #[serde(rename = "_id")]
    id: Id,
    #[serde(rename = "trs", default = "HashMap::new")]
    translations: HashMap<Language, V>,
    #[serde(
        rename = "adt",
        default = "Option::default",
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    additional: Option<A>,
}

fn deserialize_present<'de, D, A>(deserializer: D) -> Result<Option<A>, D::Error>
where
    D: Deserializer<'de>,
    A: Deserialize<'de>,
{
    A::deserialize(deserializer).map(Some)
}

impl<Id, V, A> TranslationRecord<Id, V, A> {
    pub fn new(id: Id, translations: HashMap<Language, V>, additional: Option<A>) -> Self {
        Self {
            id,
            translations,
            additional,
        }
    }

    /// 取出单个语言的值
    pub fn language(&self, language: &Language) -> Option<&V> {
        self.translations.get(language)
    }

    pub fn into_parts(self) -> (Id, HashMap<Language, V>, Option<A>) {
        (self.id, self.translations, self.additional)
    }

    pub(crate) fn translations_mut(&mut self) -> &mut HashMap<Language, V> {
        &mut self.translations
    }

    pub(crate) fn set_additional(&mut self, additional: A) {
        self.additional = Some(additional);
    }

    pub(crate) fn take_language(mut self, language: &Language) -> Option<V> {
        self.translations.remove(language)
    }
}

impl<Id, V, A> TranslationResponse<Id, V, A> for TranslationRecord<Id, V, A> {
    fn id(&self) -> &Id {
        &self.id
    }

    fn translations(&self) -> &HashMap<Language, V> {
        &self.translations
    }

    fn additional(&self) -> Option<&A> {
        self.additional.as_ref()
    }
}

use serde::{Deserialize, Serialize};

use super::catalog::FilterField;

/// 筛选请求参数（全部可选，page 缺省为 1）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterRequest {
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub status: Option<String>,
    pub rated: Option<String>,
    pub score: Option<String>,
    pub season: Option<String>,
    pub language: Option<String>,
    pub sort: Option<String>,
    /// 逗号分隔，可混用 id 与别名
    pub genres: Option<String>,

    // 日期分段
    pub sy: Option<String>,
    pub sm: Option<String>,
    pub sd: Option<String>,
    pub ey: Option<String>,
    pub em: Option<String>,
    pub ed: Option<String>,

    /// 仅用于校验，不会发给上游
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    pub page: Option<String>,
}

impl FilterRequest {
    /// 非空的 keyword
    pub fn keyword(&self) -> Option<&str> {
        non_empty(&self.keyword)
    }

    /// 按字段取原始参数
    pub fn field(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::Type => &self.type_,
            FilterField::Status => &self.status,
            FilterField::Rated => &self.rated,
            FilterField::Score => &self.score,
            FilterField::Season => &self.season,
            FilterField::Language => &self.language,
            FilterField::Sort => &self.sort,
            FilterField::Genres => &self.genres,
            FilterField::StartYear => &self.sy,
            FilterField::StartMonth => &self.sm,
            FilterField::StartDay => &self.sd,
            FilterField::EndYear => &self.ey,
            FilterField::EndMonth => &self.em,
            FilterField::EndDay => &self.ed,
        }
    }
}

/// 空字符串视为未提供
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 去空白后仍非空才视为已提供（日期分段使用）
pub fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// 上游端点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Search,
    Filter,
    /// 单日排期（ajax）
    Schedule,
    /// 人物或角色详情，持有 `people:123` 形式的规范 id
    Person(String),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Search => "/search".to_string(),
            Endpoint::Filter => "/filter".to_string(),
            Endpoint::Schedule => "/ajax/schedule/list".to_string(),
            // 只替换第一个冒号
            Endpoint::Person(id) => format!("/{}", id.replacen(':', "/", 1)),
        }
    }
}

/// 规范查询：按固定顺序排列的键值对，末尾总是 page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalQuery {
    pairs: Vec<(String, String)>,
}

impl CanonicalQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// application/x-www-form-urlencoded 编码
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl std::fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// 规范化结果：目标端点 + 查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub endpoint: Endpoint,
    pub query: CanonicalQuery,
}

impl UpstreamRequest {
    /// 例如 `/filter?type=2&page=1`
    pub fn url_path(&self) -> String {
        format!("{}?{}", self.endpoint.path(), self.query.to_query_string())
    }
}

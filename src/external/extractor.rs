use anyhow::Result;
use serde_json::Value;

/// 列表页提取：把上游原始数据转成标准化的列表页结构
pub trait ListPageExtractor: Send + Sync {
    fn extract(&self, data: Value) -> Result<Value>;
}

/// 排期提取：单日排期 HTML 片段 → 节目列表
pub trait ScheduleExtractor: Send + Sync {
    fn extract_schedule(&self, html: &str) -> Result<Vec<Value>>;
}

/// 详情页提取：人物或角色详情 → 条目列表，空列表表示不存在
pub trait DetailPageExtractor: Send + Sync {
    fn extract_detail(&self, data: Value) -> Result<Vec<Value>>;
}

/// 不做 HTML 解析的提取器
///
/// 返回的仍是上游原始内容（通常是 HTML 字符串），并不是标准化的列表页：
/// - 列表页：原样返回上游 data
/// - 排期：非空 HTML 片段作为唯一元素返回
/// - 详情页：非空 data 作为唯一元素返回，空内容视为不存在
#[derive(Debug, Clone, Default)]
pub struct PassthroughExtractor;

impl ListPageExtractor for PassthroughExtractor {
    fn extract(&self, data: Value) -> Result<Value> {
        Ok(data)
    }
}

impl ScheduleExtractor for PassthroughExtractor {
    fn extract_schedule(&self, html: &str) -> Result<Vec<Value>> {
        if html.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Value::String(html.to_string())])
    }
}

impl DetailPageExtractor for PassthroughExtractor {
    fn extract_detail(&self, data: Value) -> Result<Vec<Value>> {
        let empty = match &data {
            Value::Null => true,
            Value::String(body) => body.trim().is_empty(),
            _ => false,
        };
        Ok(if empty { Vec::new() } else { vec![data] })
    }
}

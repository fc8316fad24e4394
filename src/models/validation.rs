use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use super::catalog::{FilterField, OptionCatalog};

lazy_static::lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap();
}

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Invalid '{field}' value. Expected one of: {} or keys: {}",
        join_listed(.values),
        join_listed(.keys)
    )]
    InvalidOption {
        field: FilterField,
        values: Vec<String>,
        keys: Vec<String>,
    },

    #[error("Invalid '{field}' numeric value. Expected 0-{max}")]
    InvalidIndex { field: FilterField, max: usize },

    #[error(
        "Invalid 'sort' value. Expected values: {} or keys: {}{}",
        join_listed(.values),
        join_listed(.keys),
        legacy_suffix(.legacy)
    )]
    InvalidSort {
        values: Vec<String>,
        keys: Vec<String>,
        legacy: Vec<String>,
    },

    #[error("Invalid 'genres' numeric value: {0}")]
    InvalidGenreId(String),

    #[error("Invalid 'genres' value: {0}")]
    InvalidGenre(String),

    #[error("Invalid '{field}' value. Expected one of: {}", join_listed(.values))]
    InvalidDatePart {
        field: FilterField,
        values: Vec<String>,
    },

    #[error("Invalid '{0}'. Use YYYY-MM-DD")]
    InvalidDate(&'static str),

    #[error("start_date must be before or equal to end_date")]
    DateRangeInverted,

    #[error("Invalid 'page' value: {0} (must be a positive integer)")]
    InvalidPage(String),

    #[error("Invalid 'tzOffset'. Expected integer minutes offset (e.g., -360)")]
    InvalidTzOffset(String),

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidScheduleDate(String),

    #[error("id is required")]
    MissingId,
}

/// 占位项（空 value）不出现在提示里
fn join_listed(items: &[String]) -> String {
    items
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

fn legacy_suffix(legacy: &[String]) -> String {
    if legacy.is_empty() {
        String::new()
    } else {
        format!(" or legacy: {}", legacy.join(", "))
    }
}

/// 别名规范化：去首尾空白、小写、连字符和空白替换为下划线
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

pub fn is_all_digits(s: &str) -> bool {
    DIGITS.is_match(s)
}

/// 单值选项解析（type / status / rated / score / season / language）
pub struct FieldResolver;

impl FieldResolver {
    /// 解析为规范值，失败返回 None（格式化阶段使用）
    pub fn lookup(catalog: &OptionCatalog, raw: &str) -> Option<String> {
        let token = raw.trim();
        if catalog.contains_value(token) {
            return Some(token.to_string());
        }

        if let Some(value) = catalog.value_for_key(&normalize_token(token)) {
            return Some(value);
        }

        // Legacy 目录：纯数字按位置序号处理
        if catalog.is_legacy() && is_all_digits(token) {
            return token
                .parse::<usize>()
                .ok()
                .filter(|i| *i < catalog.len())
                .map(|i| i.to_string());
        }

        None
    }

    pub fn resolve(
        field: FilterField,
        catalog: &OptionCatalog,
        raw: &str,
    ) -> Result<String, ValidationError> {
        Self::lookup(catalog, raw).ok_or_else(|| {
            if catalog.is_legacy() && is_all_digits(raw.trim()) {
                ValidationError::InvalidIndex {
                    field,
                    max: catalog.len().saturating_sub(1),
                }
            } else {
                ValidationError::InvalidOption {
                    field,
                    values: catalog.values(),
                    keys: catalog.keys(),
                }
            }
        })
    }
}

/// 排序字段解析，额外支持 Legacy 规范化列表
pub struct SortResolver;

impl SortResolver {
    pub fn lookup(catalog: &OptionCatalog, raw: &str) -> Option<String> {
        let token = raw.trim();
        let normalized = normalize_token(token);

        match catalog {
            OptionCatalog::Keyed(entries) => {
                if entries.iter().any(|e| e.value == token) {
                    return Some(token.to_string());
                }
                entries
                    .iter()
                    .find(|e| e.key == normalized)
                    .map(|e| e.value.clone())
            }
            // Legacy 列表原样返回规范化后的值，不转成序号
            OptionCatalog::Legacy(items) => items.contains(&normalized).then_some(normalized),
        }
    }

    pub fn resolve(catalog: &OptionCatalog, raw: &str) -> Result<String, ValidationError> {
        Self::lookup(catalog, raw).ok_or_else(|| match catalog {
            OptionCatalog::Keyed(_) => ValidationError::InvalidSort {
                values: catalog.values(),
                keys: catalog.keys(),
                legacy: Vec::new(),
            },
            OptionCatalog::Legacy(items) => ValidationError::InvalidSort {
                values: Vec::new(),
                keys: Vec::new(),
                legacy: items.clone(),
            },
        })
    }
}

/// 多值类型（genres）解析
///
/// 校验阶段遇到第一个无法识别的类型即失败；格式化阶段尽力解析，
/// 无法识别的类型直接丢弃，并额外尝试 Legacy 的 `位置 + 1` 兼容规则。
pub struct GenreResolver;

impl GenreResolver {
    /// 逗号拆分、去空白、丢弃空项
    pub fn tokens(raw: &str) -> Vec<&str> {
        raw.split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }

    pub fn validate(catalog: &OptionCatalog, raw: &str) -> Result<(), ValidationError> {
        let keys = catalog.keys();

        for genre in Self::tokens(raw) {
            if is_all_digits(genre) {
                if !catalog.contains_value(genre) {
                    return Err(ValidationError::InvalidGenreId(genre.to_string()));
                }
            } else if !keys.contains(&normalize_token(genre)) {
                return Err(ValidationError::InvalidGenre(genre.to_string()));
            }
        }

        Ok(())
    }

    /// 生成逗号分隔的规范 id 列表，全部无法解析时返回 None
    pub fn format(catalog: &OptionCatalog, raw: &str) -> Option<String> {
        let key_to_id: HashMap<&str, &str> = catalog
            .entries()
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect();

        let ids: Vec<String> = Self::tokens(raw)
            .into_iter()
            .filter_map(|genre| {
                if is_all_digits(genre) {
                    return catalog.contains_value(genre).then(|| genre.to_string());
                }

                let normalized = normalize_token(genre);
                if let Some(id) = key_to_id.get(normalized.as_str()) {
                    return Some(id.to_string());
                }

                catalog
                    .position(&normalized)
                    .map(|idx| (idx + 1).to_string())
                    .filter(|candidate| catalog.contains_value(candidate))
            })
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(ids.join(","))
        }
    }
}

/// 日期分段校验与日期区间拼装
pub struct DatePartValidator;

impl DatePartValidator {
    /// 空白视为未设置；其余必须与目录中的 value 完全一致
    pub fn validate_part(
        field: FilterField,
        catalog: &OptionCatalog,
        raw: Option<&str>,
    ) -> Result<(), ValidationError> {
        let Some(value) = raw else {
            return Ok(());
        };
        if value.trim().is_empty() || catalog.contains_value(value) {
            return Ok(());
        }

        Err(ValidationError::InvalidDatePart {
            field,
            values: catalog.values(),
        })
    }

    /// 显式日期优先；否则由年月日拼出 YYYY-MM-DD，缺省月日补 1
    pub fn compose(
        date: Option<&str>,
        year: Option<&str>,
        month: Option<&str>,
        day: Option<&str>,
    ) -> Option<String> {
        if let Some(date) = date {
            return Some(date.to_string());
        }

        year.map(|y| {
            format!(
                "{}-{:0>2}-{:0>2}",
                y,
                month.unwrap_or("1"),
                day.unwrap_or("1")
            )
        })
    }

    pub fn parse_bound(bound: &'static str, date: &str) -> Result<NaiveDate, ValidationError> {
        if !ISO_DATE.is_match(date) {
            return Err(ValidationError::InvalidDate(bound));
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(bound))
    }

    /// 校验起止日期格式及先后顺序
    pub fn validate_range(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ValidationError> {
        let start = start.map(|s| Self::parse_bound("start_date", s)).transpose()?;
        let end = end.map(|e| Self::parse_bound("end_date", e)).transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ValidationError::DateRangeInverted);
            }
        }

        Ok((start, end))
    }
}

/// 页码：正整数，不设上限，去掉前导零后按字符串透传
pub fn parse_page(raw: Option<&str>) -> Result<String, ValidationError> {
    let Some(page) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok("1".to_string());
    };

    let significant = page.trim_start_matches('0');
    if !is_all_digits(page) || significant.is_empty() {
        return Err(ValidationError::InvalidPage(page.to_string()));
    }

    Ok(significant.to_string())
}

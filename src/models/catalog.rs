// 筛选选项目录
//
// 每个筛选维度一张只读选项表，进程启动时构建一次：
// - type / status / rated / score / season / language：带 "all" 占位项的 keyed 表
// - sort / genres：无序号语义的 keyed 表
// - sy / sm / sd / ey / em / ed：日期分段表（年份表依赖当前年份）

use chrono::{Datelike, Local};
use serde::Serialize;

/// 年份表的最早年份
pub const MIN_YEAR: i32 = 1917;

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    /// 上游站点使用的规范值
    pub value: String,
    /// 规范化的别名（小写、下划线）
    pub key: String,
    /// 仅用于展示
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            key: key.into(),
            label: label.into(),
            index: None,
        }
    }

    pub fn indexed(
        value: impl Into<String>,
        key: impl Into<String>,
        label: impl Into<String>,
        index: usize,
    ) -> Self {
        Self {
            index: Some(index),
            ..Self::new(value, key, label)
        }
    }
}

/// 选项目录
///
/// - `Keyed`：OptionEntry 列表，按 value / key 查找
/// - `Legacy`：纯字符串列表，条目的规范值是它的位置序号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionCatalog {
    Keyed(Vec<OptionEntry>),
    Legacy(Vec<String>),
}

impl OptionCatalog {
    pub fn legacy<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionCatalog::Legacy(items.into_iter().map(Into::into).collect())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            OptionCatalog::Keyed(entries) => entries.len(),
            OptionCatalog::Legacy(items) => items.len(),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, OptionCatalog::Legacy(_))
    }

    /// keyed 条目；Legacy 目录返回空切片
    pub fn entries(&self) -> &[OptionEntry] {
        match self {
            OptionCatalog::Keyed(entries) => entries,
            OptionCatalog::Legacy(_) => &[],
        }
    }

    /// 所有规范值（Legacy 为位置序号）
    pub fn values(&self) -> Vec<String> {
        match self {
            OptionCatalog::Keyed(entries) => entries.iter().map(|e| e.value.clone()).collect(),
            OptionCatalog::Legacy(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        }
    }

    /// 所有别名（Legacy 为字符串本身）
    pub fn keys(&self) -> Vec<String> {
        match self {
            OptionCatalog::Keyed(entries) => entries.iter().map(|e| e.key.clone()).collect(),
            OptionCatalog::Legacy(items) => items.clone(),
        }
    }

    pub fn contains_value(&self, value: &str) -> bool {
        match self {
            OptionCatalog::Keyed(entries) => entries.iter().any(|e| e.value == value),
            OptionCatalog::Legacy(items) => value
                .parse::<usize>()
                .map(|i| i < items.len() && i.to_string() == value)
                .unwrap_or(false),
        }
    }

    /// 按别名查找规范值
    pub fn value_for_key(&self, key: &str) -> Option<String> {
        match self {
            OptionCatalog::Keyed(entries) => entries
                .iter()
                .find(|e| e.key == key)
                .map(|e| e.value.clone()),
            OptionCatalog::Legacy(_) => self.position(key).map(|i| i.to_string()),
        }
    }

    /// Legacy 列表中字符串的位置
    pub fn position(&self, item: &str) -> Option<usize> {
        match self {
            OptionCatalog::Keyed(_) => None,
            OptionCatalog::Legacy(items) => items.iter().position(|s| s == item),
        }
    }
}

/// 对外展示的选项（introspection 用）
#[derive(Debug, Clone, Serialize)]
pub struct PresentedOption {
    pub value: String,
    pub key: String,
    pub label: String,
}

/// 日期分段范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatePartBounds {
    pub min: i32,
    pub max: i32,
}

/// 全部筛选目录
#[derive(Debug, Clone)]
pub struct FilterCatalogs {
    pub current_year: i32,
    pub type_: OptionCatalog,
    pub status: OptionCatalog,
    pub rated: OptionCatalog,
    pub score: OptionCatalog,
    pub season: OptionCatalog,
    pub language: OptionCatalog,
    pub sort: OptionCatalog,
    pub genres: OptionCatalog,
    pub year: OptionCatalog,
    pub month: OptionCatalog,
    pub day: OptionCatalog,
}

lazy_static::lazy_static! {
    /// 进程级只读目录，年份表以首次访问时的当前年份为准
    pub static ref FILTER_CATALOGS: FilterCatalogs = FilterCatalogs::new(Local::now().year());
}

impl FilterCatalogs {
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            type_: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "movie", "Movie"),
                ("2", "tv", "TV"),
                ("3", "ova", "OVA"),
                ("4", "ona", "ONA"),
                ("5", "special", "Special"),
                ("6", "music", "Music"),
            ]),
            status: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "finished_airing", "Finished Airing"),
                ("2", "currently_airing", "Currently Airing"),
                ("3", "not_yet_aired", "Not yet aired"),
            ]),
            rated: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "g", "G"),
                ("2", "pg", "PG"),
                ("3", "pg_13", "PG-13"),
                ("4", "r", "R"),
                ("5", "r+", "R+"),
                ("6", "rx", "Rx"),
            ]),
            score: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "appalling", "(1) Appalling"),
                ("2", "horrible", "(2) Horrible"),
                ("3", "very_bad", "(3) Very Bad"),
                ("4", "bad", "(4) Bad"),
                ("5", "average", "(5) Average"),
                ("6", "fine", "(6) Fine"),
                ("7", "good", "(7) Good"),
                ("8", "very_good", "(8) Very Good"),
                ("9", "great", "(9) Great"),
                ("10", "masterpiece", "(10) Masterpiece"),
            ]),
            season: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "spring", "Spring"),
                ("2", "summer", "Summer"),
                ("3", "fall", "Fall"),
                ("4", "winter", "Winter"),
            ]),
            language: keyed_with_index(&[
                ("", "all", "All"),
                ("1", "sub", "SUB"),
                ("2", "dub", "DUB"),
                ("3", "sub_dub", "SUB & DUB"),
            ]),
            // 同时接受 released_date（value）和 release_date（key）
            sort: keyed(&[
                ("default", "default", "Default"),
                ("recently_added", "recently_added", "Recently Added"),
                ("recently_updated", "recently_updated", "Recently Updated"),
                ("score", "score", "Score"),
                ("name_az", "name_az", "Name A-Z"),
                ("released_date", "release_date", "Released Date"),
                ("most_watched", "most_watched", "Most Watched"),
            ]),
            // value 为站点 data-id，不连续
            genres: keyed(&[
                ("1", "action", "Action"),
                ("2", "adventure", "Adventure"),
                ("3", "cars", "Cars"),
                ("4", "comedy", "Comedy"),
                ("5", "dementia", "Dementia"),
                ("6", "demons", "Demons"),
                ("8", "drama", "Drama"),
                ("9", "ecchi", "Ecchi"),
                ("10", "fantasy", "Fantasy"),
                ("11", "game", "Game"),
                ("35", "harem", "Harem"),
                ("13", "historical", "Historical"),
                ("14", "horror", "Horror"),
                ("44", "isekai", "Isekai"),
                ("43", "josei", "Josei"),
                ("15", "kids", "Kids"),
                ("16", "magic", "Magic"),
                ("17", "martial_arts", "Martial Arts"),
                ("18", "mecha", "Mecha"),
                ("38", "military", "Military"),
                ("19", "music", "Music"),
                ("7", "mystery", "Mystery"),
                ("20", "parody", "Parody"),
                ("39", "police", "Police"),
                ("40", "psychological", "Psychological"),
                ("22", "romance", "Romance"),
                ("21", "samurai", "Samurai"),
                ("23", "school", "School"),
                ("24", "sci_fi", "Sci-Fi"),
                ("42", "seinen", "Seinen"),
                ("25", "shoujo", "Shoujo"),
                ("26", "shoujo_ai", "Shoujo Ai"),
                ("27", "shounen", "Shounen"),
                ("28", "shounen_ai", "Shounen Ai"),
                ("36", "slice_of_life", "Slice of Life"),
                ("29", "space", "Space"),
                ("30", "sports", "Sports"),
                ("31", "super_power", "Super Power"),
                ("37", "supernatural", "Supernatural"),
                ("41", "thriller", "Thriller"),
                ("32", "vampire", "Vampire"),
            ]),
            year: year_catalog(current_year),
            month: numbered_catalog("month", "Month", 12),
            day: numbered_catalog("day", "Day", 31),
        }
    }

    /// 按字段取目录
    pub fn catalog_for(&self, field: FilterField) -> &OptionCatalog {
        match field {
            FilterField::Type => &self.type_,
            FilterField::Status => &self.status,
            FilterField::Rated => &self.rated,
            FilterField::Score => &self.score,
            FilterField::Season => &self.season,
            FilterField::Language => &self.language,
            FilterField::Sort => &self.sort,
            FilterField::Genres => &self.genres,
            FilterField::StartYear | FilterField::EndYear => &self.year,
            FilterField::StartMonth | FilterField::EndMonth => &self.month,
            FilterField::StartDay | FilterField::EndDay => &self.day,
        }
    }

    pub fn year_bounds(&self) -> DatePartBounds {
        DatePartBounds {
            min: MIN_YEAR,
            max: self.current_year,
        }
    }

    /// 供 /filter/options 使用的完整目录快照
    pub fn present(&self) -> serde_json::Value {
        let present = |catalog: &OptionCatalog| -> Vec<PresentedOption> {
            catalog
                .entries()
                .iter()
                .map(|e| PresentedOption {
                    value: e.value.clone(),
                    key: e.key.clone(),
                    label: e.label.clone(),
                })
                .collect()
        };

        serde_json::json!({
            "type": present(&self.type_),
            "status": present(&self.status),
            "rated": present(&self.rated),
            "score": present(&self.score),
            "season": present(&self.season),
            "language": present(&self.language),
            "sort": present(&self.sort),
            "genres": present(&self.genres),
            "dateParts": {
                "sy": self.year_bounds(),
                "sm": DatePartBounds { min: 1, max: 12 },
                "sd": DatePartBounds { min: 1, max: 31 },
                "ey": self.year_bounds(),
                "em": DatePartBounds { min: 1, max: 12 },
                "ed": DatePartBounds { min: 1, max: 31 },
            }
        })
    }
}

/// 所有带目录的筛选字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Type,
    Status,
    Rated,
    Score,
    Season,
    Language,
    Sort,
    Genres,
    StartYear,
    StartMonth,
    StartDay,
    EndYear,
    EndMonth,
    EndDay,
}

impl FilterField {
    /// 单值选项字段，按校验顺序排列
    pub const OPTION_FIELDS: [FilterField; 6] = [
        FilterField::Type,
        FilterField::Status,
        FilterField::Rated,
        FilterField::Score,
        FilterField::Season,
        FilterField::Language,
    ];

    pub const DATE_PART_FIELDS: [FilterField; 6] = [
        FilterField::StartYear,
        FilterField::StartMonth,
        FilterField::StartDay,
        FilterField::EndYear,
        FilterField::EndMonth,
        FilterField::EndDay,
    ];

    /// 查询参数名
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Type => "type",
            FilterField::Status => "status",
            FilterField::Rated => "rated",
            FilterField::Score => "score",
            FilterField::Season => "season",
            FilterField::Language => "language",
            FilterField::Sort => "sort",
            FilterField::Genres => "genres",
            FilterField::StartYear => "sy",
            FilterField::StartMonth => "sm",
            FilterField::StartDay => "sd",
            FilterField::EndYear => "ey",
            FilterField::EndMonth => "em",
            FilterField::EndDay => "ed",
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn keyed(rows: &[(&str, &str, &str)]) -> OptionCatalog {
    OptionCatalog::Keyed(
        rows.iter()
            .map(|(value, key, label)| OptionEntry::new(*value, *key, *label))
            .collect(),
    )
}

fn keyed_with_index(rows: &[(&str, &str, &str)]) -> OptionCatalog {
    OptionCatalog::Keyed(
        rows.iter()
            .enumerate()
            .map(|(i, (value, key, label))| OptionEntry::indexed(*value, *key, *label, i))
            .collect(),
    )
}

/// 年份表：占位项 + 当前年份倒序到 MIN_YEAR
fn year_catalog(current_year: i32) -> OptionCatalog {
    let mut entries = vec![OptionEntry::indexed("", "year", "Year", 0)];
    for (i, year) in (MIN_YEAR..=current_year).rev().enumerate() {
        let y = year.to_string();
        entries.push(OptionEntry::indexed(y.clone(), y.clone(), y, i + 1));
    }
    OptionCatalog::Keyed(entries)
}

/// 月 / 日表：占位项 + 1..=max，标签补零
fn numbered_catalog(sentinel_key: &str, sentinel_label: &str, max: usize) -> OptionCatalog {
    let mut entries = vec![OptionEntry::indexed("", sentinel_key, sentinel_label, 0)];
    for n in 1..=max {
        let v = n.to_string();
        entries.push(OptionEntry::indexed(v.clone(), v, format!("{:02}", n), n));
    }
    OptionCatalog::Keyed(entries)
}

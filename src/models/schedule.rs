// 排期请求
//
// tzOffset 以分钟为单位，缺省 -360；date 缺省为今天。
// 两者同时给出时只查询这一天，否则从起始日期起连续查询 7 天。

use chrono::NaiveDate;
use serde::Deserialize;

use super::filter::CanonicalQuery;
use super::validation::ValidationError;

pub const DEFAULT_TZ_OFFSET: i32 = -360;
pub const SCHEDULE_DAYS: usize = 7;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// YYYY-MM-DD
    pub date: Option<String>,
    pub tz_offset: Option<String>,
}

/// 校验后的排期查询计划
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    pub tz_offset: i32,
    /// 按时间先后排列，YYYY-MM-DD
    pub dates: Vec<String>,
}

impl ScheduleRequest {
    fn tz_offset_param(&self) -> Option<&str> {
        self.tz_offset
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn date_param(&self) -> Option<&str> {
        self.date.as_deref().filter(|v| !v.is_empty())
    }

    pub fn tz_offset(&self) -> Result<i32, ValidationError> {
        match self.tz_offset_param() {
            Some(raw) => raw
                .parse()
                .map_err(|_| ValidationError::InvalidTzOffset(raw.to_string())),
            None => Ok(DEFAULT_TZ_OFFSET),
        }
    }

    pub fn start_date(&self, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
        match self.date_param() {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidScheduleDate(raw.to_string())),
            None => Ok(today),
        }
    }

    /// 先校验 tzOffset，再校验 date
    pub fn plan(&self, today: NaiveDate) -> Result<SchedulePlan, ValidationError> {
        let tz_offset = self.tz_offset()?;
        let start = self.start_date(today)?;

        let days = if self.date_param().is_some() && self.tz_offset_param().is_some() {
            1
        } else {
            SCHEDULE_DAYS
        };

        let dates = start
            .iter_days()
            .take(days)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        Ok(SchedulePlan { tz_offset, dates })
    }
}

impl SchedulePlan {
    pub fn query_for(&self, date: &str) -> CanonicalQuery {
        let mut query = CanonicalQuery::new();
        query.push("tzOffset", self.tz_offset.to_string());
        query.push("date", date);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn request(date: Option<&str>, tz_offset: Option<&str>) -> ScheduleRequest {
        ScheduleRequest {
            date: date.map(str::to_string),
            tz_offset: tz_offset.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_to_a_week_from_today() {
        let plan = request(None, None).plan(today()).unwrap();
        assert_eq!(plan.tz_offset, -360);
        assert_eq!(plan.dates.len(), 7);
        assert_eq!(plan.dates.first().map(String::as_str), Some("2025-03-14"));
        assert_eq!(plan.dates.last().map(String::as_str), Some("2025-03-20"));
    }

    #[test]
    fn test_week_crosses_month_boundary() {
        let plan = request(Some("2024-02-26"), None).plan(today()).unwrap();
        assert_eq!(
            plan.dates,
            vec![
                "2024-02-26", "2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01",
                "2024-03-02", "2024-03-03"
            ]
        );
    }

    #[test]
    fn test_date_and_offset_select_single_day() {
        let plan = request(Some("2024-05-01"), Some("60")).plan(today()).unwrap();
        assert_eq!(plan.tz_offset, 60);
        assert_eq!(plan.dates, vec!["2024-05-01"]);
    }

    #[test]
    fn test_offset_alone_keeps_full_week() {
        let plan = request(None, Some(" -300 ")).plan(today()).unwrap();
        assert_eq!(plan.tz_offset, -300);
        assert_eq!(plan.dates.len(), 7);
    }

    #[test]
    fn test_blank_offset_is_unset() {
        let plan = request(Some("2024-05-01"), Some("  ")).plan(today()).unwrap();
        assert_eq!(plan.tz_offset, DEFAULT_TZ_OFFSET);
        assert_eq!(plan.dates.len(), 7);
    }

    #[test]
    fn test_non_integer_offset_is_rejected() {
        for raw in ["abc", "1.5", "60m"] {
            let err = request(None, Some(raw)).plan(today()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidTzOffset(raw.to_string()));
            assert_eq!(
                err.to_string(),
                "Invalid 'tzOffset'. Expected integer minutes offset (e.g., -360)"
            );
        }
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        for raw in ["tomorrow", "2024-13-01", "2024-02-30", " "] {
            let err = request(Some(raw), None).plan(today()).unwrap_err();
            assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD");
        }
    }

    #[test]
    fn test_offset_is_checked_before_date() {
        let err = request(Some("bad"), Some("bad")).plan(today()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTzOffset(_)));
    }

    #[test]
    fn test_query_for_day() {
        let plan = request(Some("2024-05-01"), Some("-360")).plan(today()).unwrap();
        assert_eq!(
            plan.query_for(&plan.dates[0]).to_query_string(),
            "tzOffset=-360&date=2024-05-01"
        );
    }
}

use crate::models::catalog::{FilterCatalogs, FilterField};
use crate::models::filter::{
    filled, non_empty, CanonicalQuery, Endpoint, FilterRequest, UpstreamRequest,
};
use crate::models::validation::{
    parse_page, DatePartValidator, FieldResolver, GenreResolver, SortResolver, ValidationError,
};

/// 规范查询构建器
///
/// 先按固定顺序完成全部校验（遇到第一个错误立即返回），
/// 再按固定字段顺序输出规范查询并选择上游端点。
pub struct FilterQueryBuilder<'a> {
    catalogs: &'a FilterCatalogs,
}

impl<'a> FilterQueryBuilder<'a> {
    pub fn new(catalogs: &'a FilterCatalogs) -> Self {
        Self { catalogs }
    }

    /// 校验全部参数，返回规范页码
    pub fn validate(&self, request: &FilterRequest) -> Result<String, ValidationError> {
        // 单值选项
        for field in FilterField::OPTION_FIELDS {
            if let Some(raw) = non_empty(request.field(field)) {
                FieldResolver::resolve(field, self.catalogs.catalog_for(field), raw)?;
            }
        }

        if let Some(raw) = non_empty(&request.sort) {
            SortResolver::resolve(&self.catalogs.sort, raw)?;
        }

        if let Some(raw) = non_empty(&request.genres) {
            GenreResolver::validate(&self.catalogs.genres, raw)?;
        }

        // 日期分段
        for field in FilterField::DATE_PART_FIELDS {
            DatePartValidator::validate_part(
                field,
                self.catalogs.catalog_for(field),
                request.field(field).as_deref(),
            )?;
        }

        // 起止日期只用于校验
        let start = DatePartValidator::compose(
            non_empty(&request.start_date),
            filled(&request.sy),
            filled(&request.sm),
            filled(&request.sd),
        );
        let end = DatePartValidator::compose(
            non_empty(&request.end_date),
            filled(&request.ey),
            filled(&request.em),
            filled(&request.ed),
        );
        DatePartValidator::validate_range(start.as_deref(), end.as_deref())?;

        parse_page(request.page.as_deref())
    }

    pub fn build(&self, request: &FilterRequest) -> Result<UpstreamRequest, ValidationError> {
        let page = self.validate(request)?;
        let mut query = CanonicalQuery::new();

        if let Some(keyword) = request.keyword() {
            query.push("keyword", keyword.to_lowercase());
        }

        for field in FilterField::OPTION_FIELDS {
            let resolved = non_empty(request.field(field))
                .and_then(|raw| FieldResolver::lookup(self.catalogs.catalog_for(field), raw))
                .filter(|value| !value.is_empty());
            if let Some(value) = resolved {
                query.push(field.as_str(), value);
            }
        }

        // 日期分段原样透传
        for field in FilterField::DATE_PART_FIELDS {
            if let Some(raw) = filled(request.field(field)) {
                query.push(field.as_str(), raw);
            }
        }

        if let Some(sort) =
            non_empty(&request.sort).and_then(|raw| SortResolver::lookup(&self.catalogs.sort, raw))
        {
            query.push("sort", sort);
        }

        if let Some(genres) = non_empty(&request.genres)
            .and_then(|raw| GenreResolver::format(&self.catalogs.genres, raw))
        {
            query.push("genres", genres);
        }

        query.push("page", page);

        let endpoint = if request.keyword().is_some() {
            Endpoint::Search
        } else {
            Endpoint::Filter
        };

        Ok(UpstreamRequest { endpoint, query })
    }
}

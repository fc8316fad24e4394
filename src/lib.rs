// 动画筛选后端库
//
// 本库提供筛选查询的规范化与校验，包括：
// - 选项目录
// - 参数校验与查询组装
// - 上游请求
// - API 路由

pub mod api;
pub mod config;
pub mod external;
pub mod models;
pub mod services;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::team::{Team, TeamLocation, TeamStatus};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 并发写入冲突（乐观锁版本不匹配）
    #[error("Concurrent update conflict")]
    Conflict,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// 团队列表排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSortField {
    StartTime,
    EndTime,
    MaxMemberCount,
    CreatedAt,
}

/// 分页请求
///
/// offset为页号，limit为每页条数，排序键携带字段与方向。
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
    pub sort_field: TeamSortField,
    pub sort_direction: SortDirection,
}

/// 团队ID集合过滤
///
/// 成员关系过滤先把昵称解析成团队ID集合，再限定或排除该集合。
#[derive(Debug, Clone)]
pub enum TeamIdFilter {
    /// 仅包含给定ID集合
    Include(Vec<Uuid>),
    /// 排除给定ID集合
    Exclude(Vec<Uuid>),
}

/// 团队查询参数
///
/// 每个过滤字段都是可选值，由持久化层编译成查询谓词。
#[derive(Debug, Default, Clone)]
pub struct TeamQueryParams {
    pub status: Option<TeamStatus>,
    pub location: Option<TeamLocation>,
    /// 仅保留开始时间晚于该时刻的团队
    pub start_time_after: Option<DateTime<FixedOffset>>,
    /// 仅保留结束时间晚于该时刻的团队
    pub end_time_after: Option<DateTime<FixedOffset>>,
    pub id_filter: Option<TeamIdFilter>,
}

/// 团队仓库特质
///
/// 定义团队数据访问接口
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// 创建新团队
    async fn create(&self, team: &Team) -> Result<Team, RepositoryError>;
    /// 根据ID查找团队
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, RepositoryError>;
    /// 带版本检查的更新
    ///
    /// 仅当数据库中的版本与 `team.version` 一致时写入并递增版本，
    /// 否则返回 `RepositoryError::Conflict`。用于串行化并发加入。
    async fn update(&self, team: &Team) -> Result<Team, RepositoryError>;
    /// 删除团队
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 查找可过期团队（状态非End且结束时间不晚于给定时刻）
    async fn find_expirable(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Team>, RepositoryError>;
    /// 分页条件查询，返回当页团队与总条数
    async fn query_teams(
        &self,
        params: TeamQueryParams,
        page: PageRequest,
    ) -> Result<(Vec<Team>, u64), RepositoryError>;
}

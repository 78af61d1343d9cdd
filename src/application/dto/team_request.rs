// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::member::MemberRole;
use crate::domain::models::team::{TeamLocation, TeamStatus};
use crate::domain::services::team_service::{
    ClaimTeamCommand, CreateTeamCommand, TeamListCriteria,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 创建团队请求DTO
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TeamCreateRequestDto {
    /// 所属项目ID
    pub project_id: Uuid,

    /// 活动开始时间
    pub start_time: DateTime<FixedOffset>,

    /// 活动结束时间
    pub end_time: DateTime<FixedOffset>,

    /// 人数上限
    #[validate(range(min = 1, max = 100))]
    pub max_member_count: i32,

    /// 活动地点
    pub location: TeamLocation,

    /// 创建者角色（导师创建直接进入招募，学员创建等待认领）
    pub role: MemberRole,
}

impl From<TeamCreateRequestDto> for CreateTeamCommand {
    fn from(dto: TeamCreateRequestDto) -> Self {
        Self {
            project_id: dto.project_id,
            start_time: dto.start_time,
            end_time: dto.end_time,
            max_member_count: dto.max_member_count,
            location: dto.location,
            role: dto.role,
        }
    }
}

/// 导师认领团队请求DTO
///
/// 认领时允许在原公布窗口内调整时间段，并修改人数上限、
/// 地点与项目。
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct TeamClaimRequestDto {
    pub project_id: Uuid,

    pub start_time: DateTime<FixedOffset>,

    pub end_time: DateTime<FixedOffset>,

    #[validate(range(min = 1, max = 100))]
    pub max_member_count: i32,

    pub location: TeamLocation,
}

impl From<TeamClaimRequestDto> for ClaimTeamCommand {
    fn from(dto: TeamClaimRequestDto) -> Self {
        Self {
            project_id: dto.project_id,
            start_time: dto.start_time,
            end_time: dto.end_time,
            max_member_count: dto.max_member_count,
            location: dto.location,
        }
    }
}

/// 团队列表查询请求DTO（查询串参数）
#[derive(Debug, Deserialize, Serialize, Validate, Default)]
pub struct TeamListRequestDto {
    /// 分页偏移（页号）
    pub offset: Option<u32>,

    /// 每页条数
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,

    /// 排序键，形如 "start_time" 或 "start_time,asc"
    pub sort: Option<String>,

    /// 限定为该昵称用户参与的团队
    pub nickname: Option<String>,

    /// 排除该昵称用户参与的团队
    pub exclude_nickname: Option<String>,

    /// 按成员角色过滤昵称对应的成员关系
    pub role: Option<MemberRole>,

    /// 仅统计创建者身份的成员关系
    pub creator: Option<bool>,

    /// 团队状态过滤
    pub status: Option<TeamStatus>,

    /// 活动地点过滤
    pub location: Option<TeamLocation>,

    /// 仅保留开始时间晚于该时刻的团队
    pub start_time_after: Option<DateTime<FixedOffset>>,

    /// 仅保留结束时间晚于该时刻的团队
    pub end_time_after: Option<DateTime<FixedOffset>>,
}

impl From<TeamListRequestDto> for TeamListCriteria {
    fn from(dto: TeamListRequestDto) -> Self {
        Self {
            offset: dto.offset.unwrap_or(0),
            limit: dto.limit.unwrap_or(10),
            sort: dto.sort,
            nickname: dto.nickname,
            exclude_nickname: dto.exclude_nickname,
            member_role: dto.role,
            creator: dto.creator.unwrap_or(false),
            status: dto.status,
            location: dto.location,
            start_time_after: dto.start_time_after,
            end_time_after: dto.end_time_after,
        }
    }
}

#[cfg(test)]
#[path = "team_request_test.rs"]
mod tests;

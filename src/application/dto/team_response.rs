// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::team::{Team, TeamLocation, TeamStatus};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use uuid::Uuid;

/// 团队响应DTO
#[derive(Debug, Serialize)]
pub struct TeamResponseDto {
    pub id: Uuid,
    pub status: TeamStatus,
    pub location: TeamLocation,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub max_member_count: i32,
    pub current_member_count: i32,
    pub project_id: Uuid,
}

impl From<Team> for TeamResponseDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            status: team.status,
            location: team.location,
            start_time: team.period.start_time,
            end_time: team.period.end_time,
            max_member_count: team.max_member_count,
            current_member_count: team.current_member_count,
            project_id: team.project_id,
        }
    }
}

/// 团队列表分页响应DTO
#[derive(Debug, Serialize)]
pub struct TeamPageResponseDto {
    pub teams: Vec<TeamResponseDto>,
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
}

/// 活动地点响应DTO
#[derive(Debug, Serialize)]
pub struct LocationResponseDto {
    pub id: i32,
    /// 线上传输值（查询参数使用）
    pub value: String,
    /// 展示名称
    pub name: String,
}

impl From<TeamLocation> for LocationResponseDto {
    fn from(location: TeamLocation) -> Self {
        Self {
            id: location.id(),
            value: location.to_string(),
            name: location.display_name().to_string(),
        }
    }
}

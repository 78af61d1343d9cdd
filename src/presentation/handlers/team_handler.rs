// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::team_request::{
    TeamClaimRequestDto, TeamCreateRequestDto, TeamListRequestDto,
};
use crate::application::dto::team_response::{
    LocationResponseDto, TeamPageResponseDto, TeamResponseDto,
};
use crate::domain::models::user::SessionUser;
use crate::domain::services::team_service::{self, TeamListCriteria, TeamService};
use crate::presentation::errors::AppError;
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 创建团队
pub async fn create_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Json(payload): Json<TeamCreateRequestDto>,
) -> Result<(StatusCode, Json<TeamResponseDto>), AppError> {
    payload.validate()?;

    let team = service.create_team(session.as_ref(), payload.into()).await?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

/// 导师认领团队
pub async fn claim_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Path(team_id): Path<Uuid>,
    Json(payload): Json<TeamClaimRequestDto>,
) -> Result<Json<TeamResponseDto>, AppError> {
    payload.validate()?;

    let team = service
        .claim_team(session.as_ref(), team_id, payload.into())
        .await?;
    Ok(Json(team.into()))
}

/// 学员加入团队
pub async fn join_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponseDto>, AppError> {
    let team = service.join_team(session.as_ref(), team_id).await?;
    Ok(Json(team.into()))
}

/// 成员退出团队
pub async fn leave_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.leave_team(session.as_ref(), team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 导师结束团队
pub async fn end_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamResponseDto>, AppError> {
    let team = service.end_team(session.as_ref(), team_id).await?;
    Ok(Json(team.into()))
}

/// 删除等待中的团队
pub async fn delete_team(
    Extension(service): Extension<Arc<TeamService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.delete_team(session.as_ref(), team_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 条件查询团队列表
pub async fn list_teams(
    Extension(service): Extension<Arc<TeamService>>,
    Query(params): Query<TeamListRequestDto>,
) -> Result<Json<TeamPageResponseDto>, AppError> {
    params.validate()?;

    let criteria: TeamListCriteria = params.into();
    let offset = criteria.offset;
    let limit = criteria.limit;
    let (teams, total) = service.find_teams(criteria).await?;

    Ok(Json(TeamPageResponseDto {
        teams: teams.into_iter().map(Into::into).collect(),
        total,
        offset,
        limit,
    }))
}

/// 枚举活动地点
pub async fn list_locations() -> Json<Vec<LocationResponseDto>> {
    let locations = team_service::find_all_locations()
        .iter()
        .copied()
        .map(Into::into)
        .collect();
    Json(locations)
}

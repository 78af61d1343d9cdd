// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::user_request::{UserResponseDto, UserUpdateRequestDto};
use crate::domain::models::user::SessionUser;
use crate::domain::services::user_service::UserService;
use crate::presentation::errors::AppError;
use axum::{extract::Extension, Json};
use std::sync::Arc;
use validator::Validate;

/// 更新当前登录用户的资料
pub async fn update_me(
    Extension(service): Extension<Arc<UserService>>,
    Extension(session): Extension<Option<SessionUser>>,
    Json(payload): Json<UserUpdateRequestDto>,
) -> Result<Json<UserResponseDto>, AppError> {
    payload.validate()?;

    let user = service.update_user(session.as_ref(), payload.into()).await?;
    Ok(Json(user.into()))
}

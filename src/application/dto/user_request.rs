// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{User, UserRole};
use crate::domain::services::user_service::UpdateUserCommand;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 用户资料更新请求DTO
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UserUpdateRequestDto {
    #[validate(length(min = 1, max = 32))]
    pub nickname: String,

    #[validate(length(min = 1, max = 64))]
    pub fullname: String,

    #[validate(url)]
    pub picture: Option<String>,
}

impl From<UserUpdateRequestDto> for UpdateUserCommand {
    fn from(dto: UserUpdateRequestDto) -> Self {
        Self {
            nickname: dto.nickname,
            fullname: dto.fullname,
            picture: dto.picture,
        }
    }
}

/// 用户响应DTO
#[derive(Debug, Serialize)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub nickname: String,
    pub fullname: String,
    pub email: String,
    pub picture: Option<String>,
    pub role: UserRole,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            fullname: user.fullname,
            email: user.email,
            picture: user.picture,
            role: user.role,
        }
    }
}

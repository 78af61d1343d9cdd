// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::{SessionUser, User};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::team_service::ServiceError;
use std::sync::Arc;
use tracing::info;

/// 用户资料更新命令
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub nickname: String,
    pub fullname: String,
    pub picture: Option<String>,
}

/// 用户服务
///
/// 注册与登录由外部系统负责，本服务只提供资料更新：
/// 昵称、姓名与头像三个可变字段。
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 更新当前登录用户的资料
    ///
    /// # 返回值
    ///
    /// * `Ok(User)` - 更新后的用户
    /// * `Err(ServiceError)` - 未登录、用户不存在或持久化失败
    pub async fn update_user(
        &self,
        session: Option<&SessionUser>,
        cmd: UpdateUserCommand,
    ) -> Result<User, ServiceError> {
        let session = session.ok_or(ServiceError::NotLoggedIn)?;
        let mut user = self
            .user_repo
            .find_by_nickname(&session.nickname)
            .await?
            .ok_or_else(|| ServiceError::NotFound("invalid user".to_string()))?;

        user.update(cmd.nickname, cmd.fullname, cmd.picture);
        let user = self.user_repo.update(&user).await?;

        info!(user_id = %user.id, "user profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "user_service_test.rs"]
mod tests;

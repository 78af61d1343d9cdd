// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::User;
use crate::domain::repositories::team_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 用户仓库特质
///
/// 用户由外部注册流程创建，本服务只做查询与有限字段更新。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据昵称查找用户
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, RepositoryError>;
    /// 根据ID查找用户
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    /// 更新用户可变字段
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;
}

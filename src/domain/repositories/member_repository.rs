// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::member::{Member, MemberRole};
use crate::domain::repositories::team_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 成员仓库特质
///
/// 定义成员关联记录的数据访问接口。成员关系以 (team_id, user_id)
/// 为键存储，团队的成员视图通过查询重建。
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// 创建新成员记录
    async fn create(&self, member: &Member) -> Result<Member, RepositoryError>;
    /// 查找某用户在某团队中的成员记录
    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, RepositoryError>;
    /// 查找某用户在某团队中特定角色的成员记录
    async fn find_by_team_and_user_and_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Option<Member>, RepositoryError>;
    /// 列出团队的全部成员
    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<Member>, RepositoryError>;
    /// 列出某用户的全部成员记录，角色过滤可选
    async fn find_by_user_and_role(
        &self,
        user_id: Uuid,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError>;
    /// 列出某用户以创建者身份的全部成员记录，角色过滤可选
    async fn find_by_user_and_creator_and_role(
        &self,
        user_id: Uuid,
        creator: bool,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError>;
    /// 删除成员记录
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 删除团队的全部成员记录（随团队一起删除时使用）
    async fn delete_by_team(&self, team_id: Uuid) -> Result<u64, RepositoryError>;
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::member::{Member, MemberRole};
use crate::domain::repositories::member_repository::MemberRepository;
use crate::domain::repositories::team_repository::RepositoryError;
use crate::infrastructure::database::entities::member as member_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 成员仓库实现
#[derive(Clone)]
pub struct MemberRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl MemberRepositoryImpl {
    /// 创建新的成员仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<member_entity::Model> for Member {
    fn from(model: member_entity::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            user_id: model.user_id,
            role: model.role.parse().unwrap_or_default(),
            creator: model.creator,
        }
    }
}

impl From<Member> for member_entity::ActiveModel {
    fn from(member: Member) -> Self {
        Self {
            id: Set(member.id),
            team_id: Set(member.team_id),
            user_id: Set(member.user_id),
            role: Set(member.role.to_string()),
            creator: Set(member.creator),
            created_at: Set(Utc::now().into()),
        }
    }
}

#[async_trait]
impl MemberRepository for MemberRepositoryImpl {
    async fn create(&self, member: &Member) -> Result<Member, RepositoryError> {
        let model: member_entity::ActiveModel = member.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(member.clone())
    }

    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, RepositoryError> {
        let model = member_entity::Entity::find()
            .filter(member_entity::Column::TeamId.eq(team_id))
            .filter(member_entity::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_team_and_user_and_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Option<Member>, RepositoryError> {
        let model = member_entity::Entity::find()
            .filter(member_entity::Column::TeamId.eq(team_id))
            .filter(member_entity::Column::UserId.eq(user_id))
            .filter(member_entity::Column::Role.eq(role.to_string()))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<Member>, RepositoryError> {
        let models = member_entity::Entity::find()
            .filter(member_entity::Column::TeamId.eq(team_id))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_and_role(
        &self,
        user_id: Uuid,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError> {
        let mut query = member_entity::Entity::find()
            .filter(member_entity::Column::UserId.eq(user_id));
        if let Some(role) = role {
            query = query.filter(member_entity::Column::Role.eq(role.to_string()));
        }
        let models = query.all(self.db.as_ref()).await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_and_creator_and_role(
        &self,
        user_id: Uuid,
        creator: bool,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError> {
        let mut query = member_entity::Entity::find()
            .filter(member_entity::Column::UserId.eq(user_id))
            .filter(member_entity::Column::Creator.eq(creator));
        if let Some(role) = role {
            query = query.filter(member_entity::Column::Role.eq(role.to_string()));
        }
        let models = query.all(self.db.as_ref()).await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = member_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_team(&self, team_id: Uuid) -> Result<u64, RepositoryError> {
        let result = member_entity::Entity::delete_many()
            .filter(member_entity::Column::TeamId.eq(team_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::User;
use crate::domain::repositories::team_repository::RepositoryError;
use crate::domain::repositories::user_repository::UserRepository;
use crate::infrastructure::database::entities::user as user_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 用户仓库实现
///
/// 用户的注册由外部系统写入，本仓库只负责查询与资料更新。
#[derive(Clone)]
pub struct UserRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    /// 创建新的用户仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user_entity::Model> for User {
    fn from(model: user_entity::Model) -> Self {
        Self {
            id: model.id,
            nickname: model.nickname,
            fullname: model.fullname,
            email: model.email,
            picture: model.picture,
            role: model.role.parse().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find()
            .filter(user_entity::Column::Nickname.eq(nickname))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let model = user_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let model = user_entity::ActiveModel {
            id: Set(user.id),
            nickname: Set(user.nickname.clone()),
            fullname: Set(user.fullname.clone()),
            picture: Set(user.picture.clone()),
            updated_at: Set(Utc::now().into()),
            email: NotSet,
            role: NotSet,
            created_at: NotSet,
        };

        let updated = model.update(self.db.as_ref()).await?;
        Ok(updated.into())
    }
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::Project;
use crate::domain::repositories::team_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 项目仓库特质
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// 根据ID查找项目
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;
}

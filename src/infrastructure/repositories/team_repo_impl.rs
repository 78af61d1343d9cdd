// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::period::Period;
use crate::domain::models::team::{Team, TeamStatus};
use crate::domain::repositories::team_repository::{
    PageRequest, RepositoryError, SortDirection, TeamIdFilter, TeamQueryParams, TeamRepository,
    TeamSortField,
};
use crate::infrastructure::database::entities::team as team_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 团队仓库实现
///
/// 基于SeaORM实现的团队数据访问层。写入走条件更新，
/// 以版本号串行化并发修改。
#[derive(Clone)]
pub struct TeamRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TeamRepositoryImpl {
    /// 创建新的团队仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<team_entity::Model> for Team {
    fn from(model: team_entity::Model) -> Self {
        Self {
            id: model.id,
            status: model.status.parse().unwrap_or_default(),
            location: model.location.parse().unwrap_or_default(),
            period: Period::new(model.start_time, model.end_time),
            max_member_count: model.max_member_count,
            current_member_count: model.current_member_count,
            project_id: model.project_id,
            version: model.version,
        }
    }
}

impl From<Team> for team_entity::ActiveModel {
    fn from(team: Team) -> Self {
        let now = Utc::now().into();
        Self {
            id: Set(team.id),
            status: Set(team.status.to_string()),
            location: Set(team.location.to_string()),
            start_time: Set(team.period.start_time),
            end_time: Set(team.period.end_time),
            max_member_count: Set(team.max_member_count),
            current_member_count: Set(team.current_member_count),
            project_id: Set(team.project_id),
            version: Set(team.version),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

fn sort_column(field: TeamSortField) -> team_entity::Column {
    match field {
        TeamSortField::StartTime => team_entity::Column::StartTime,
        TeamSortField::EndTime => team_entity::Column::EndTime,
        TeamSortField::MaxMemberCount => team_entity::Column::MaxMemberCount,
        TeamSortField::CreatedAt => team_entity::Column::CreatedAt,
    }
}

#[async_trait]
impl TeamRepository for TeamRepositoryImpl {
    async fn create(&self, team: &Team) -> Result<Team, RepositoryError> {
        let model: team_entity::ActiveModel = team.clone().into();

        model.insert(self.db.as_ref()).await?;
        Ok(team.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, RepositoryError> {
        let model = team_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, team: &Team) -> Result<Team, RepositoryError> {
        // Conditional update filtered on (id, version): zero affected rows
        // means someone else committed first.
        let result = team_entity::Entity::update_many()
            .col_expr(
                team_entity::Column::Status,
                Expr::value(team.status.to_string()),
            )
            .col_expr(
                team_entity::Column::Location,
                Expr::value(team.location.to_string()),
            )
            .col_expr(
                team_entity::Column::StartTime,
                Expr::value(team.period.start_time),
            )
            .col_expr(
                team_entity::Column::EndTime,
                Expr::value(team.period.end_time),
            )
            .col_expr(
                team_entity::Column::MaxMemberCount,
                Expr::value(team.max_member_count),
            )
            .col_expr(
                team_entity::Column::CurrentMemberCount,
                Expr::value(team.current_member_count),
            )
            .col_expr(
                team_entity::Column::ProjectId,
                Expr::value(team.project_id),
            )
            .col_expr(
                team_entity::Column::Version,
                Expr::value(team.version + 1),
            )
            .col_expr(
                team_entity::Column::UpdatedAt,
                Expr::value(DateTime::<FixedOffset>::from(Utc::now())),
            )
            .filter(team_entity::Column::Id.eq(team.id))
            .filter(team_entity::Column::Version.eq(team.version))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::Conflict);
        }

        let mut updated = team.clone();
        updated.version += 1;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = team_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn find_expirable(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Team>, RepositoryError> {
        let models = team_entity::Entity::find()
            .filter(team_entity::Column::Status.ne(TeamStatus::End.to_string()))
            .filter(team_entity::Column::EndTime.lte(now))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn query_teams(
        &self,
        params: TeamQueryParams,
        page: PageRequest,
    ) -> Result<(Vec<Team>, u64), RepositoryError> {
        let mut condition = Condition::all();
        if let Some(status) = params.status {
            condition = condition.add(team_entity::Column::Status.eq(status.to_string()));
        }
        if let Some(location) = params.location {
            condition = condition.add(team_entity::Column::Location.eq(location.to_string()));
        }
        if let Some(after) = params.start_time_after {
            condition = condition.add(team_entity::Column::StartTime.gt(after));
        }
        if let Some(after) = params.end_time_after {
            condition = condition.add(team_entity::Column::EndTime.gt(after));
        }
        match params.id_filter {
            Some(TeamIdFilter::Include(ids)) => {
                condition = condition.add(team_entity::Column::Id.is_in(ids));
            }
            Some(TeamIdFilter::Exclude(ids)) => {
                condition = condition.add(team_entity::Column::Id.is_not_in(ids));
            }
            None => {}
        }

        let column = sort_column(page.sort_field);
        let query = match page.sort_direction {
            SortDirection::Asc => team_entity::Entity::find()
                .filter(condition)
                .order_by_asc(column),
            SortDirection::Desc => team_entity::Entity::find()
                .filter(condition)
                .order_by_desc(column),
        };

        let paginator = query.paginate(self.db.as_ref(), page.limit.max(1) as u64);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.offset as u64).await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }
}

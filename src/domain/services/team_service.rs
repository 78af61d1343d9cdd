// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::member::{Member, MemberRole};
use crate::domain::models::period::Period;
use crate::domain::models::project::Project;
use crate::domain::models::team::{DomainError, Team, TeamLocation, TeamStatus};
use crate::domain::models::user::{SessionUser, User};
use crate::domain::repositories::member_repository::MemberRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::team_repository::{
    PageRequest, RepositoryError, SortDirection, TeamIdFilter, TeamQueryParams, TeamRepository,
    TeamSortField,
};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::mail_service::MailService;
use chrono::{DateTime, FixedOffset};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 服务层错误类型
///
/// 每条守卫规则对应一个可区分的失败，由表示层映射为
/// 面向用户的拒绝响应，核心不做任何自动重试。
#[derive(Error, Debug)]
pub enum ServiceError {
    /// 资源不存在（用户、团队、项目、成员记录）
    #[error("Not found: {0}")]
    NotFound(String),

    /// 状态冲突（已加入、人数已满、状态不允许该转换）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 权限不足（创建者或导师试图执行被禁止的转换）
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 参数校验失败（无效或越界的时间段、非法排序键）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 缺少登录身份
    #[error("Not logged in")]
    NotLoggedIn,

    /// 仓库错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 创建团队命令
#[derive(Debug, Clone)]
pub struct CreateTeamCommand {
    pub project_id: Uuid,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub max_member_count: i32,
    pub location: TeamLocation,
    pub role: MemberRole,
}

/// 导师认领团队命令
///
/// 认领时导师可以在原公布窗口内调整时间段，并修改
/// 人数上限、地点与项目。
#[derive(Debug, Clone)]
pub struct ClaimTeamCommand {
    pub project_id: Uuid,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub max_member_count: i32,
    pub location: TeamLocation,
}

/// 团队列表查询条件
///
/// 每个过滤字段都是可选值；nickname 与 exclude_nickname
/// 互斥，分别限定或排除该用户参与的团队。
#[derive(Debug, Clone, Default)]
pub struct TeamListCriteria {
    pub offset: u32,
    pub limit: u32,
    /// 排序键，形如 "start_time" 或 "start_time,asc"
    pub sort: Option<String>,
    pub nickname: Option<String>,
    pub exclude_nickname: Option<String>,
    pub member_role: Option<MemberRole>,
    pub creator: bool,
    pub status: Option<TeamStatus>,
    pub location: Option<TeamLocation>,
    pub start_time_after: Option<DateTime<FixedOffset>>,
    pub end_time_after: Option<DateTime<FixedOffset>>,
}

/// 团队服务
///
/// 编排团队生命周期状态机，跨 Team/Member 维护不变量，
/// 并在匹配成功与活动结束时触发通知协作方。
///
/// 每个操作都是一次 读取-应用转换-持久化 的流程；
/// 团队写入带乐观锁版本检查，并发加入在持久化层被串行化。
pub struct TeamService {
    user_repo: Arc<dyn UserRepository>,
    team_repo: Arc<dyn TeamRepository>,
    member_repo: Arc<dyn MemberRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    mail_service: Arc<dyn MailService>,
}

impl TeamService {
    /// 创建新的团队服务实例
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        team_repo: Arc<dyn TeamRepository>,
        member_repo: Arc<dyn MemberRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        mail_service: Arc<dyn MailService>,
    ) -> Self {
        Self {
            user_repo,
            team_repo,
            member_repo,
            project_repo,
            mail_service,
        }
    }

    /// 创建新团队
    ///
    /// 学员创建的团队进入Waiting等待导师认领，导师创建的团队
    /// 直接进入Ready开始招募；创建者作为首个成员写入。
    ///
    /// # 参数
    ///
    /// * `session` - 当前登录用户
    /// * `cmd` - 创建命令
    ///
    /// # 返回值
    ///
    /// * `Ok(Team)` - 创建完成的团队
    /// * `Err(ServiceError)` - 校验或持久化失败
    pub async fn create_team(
        &self,
        session: Option<&SessionUser>,
        cmd: CreateTeamCommand,
    ) -> Result<Team, ServiceError> {
        let user = self.find_user(session).await?;
        let project = self.find_project(cmd.project_id).await?;

        let period = Period::new(cmd.start_time, cmd.end_time);
        if !period.is_valid() {
            return Err(ServiceError::Validation("invalid time range".to_string()));
        }
        if cmd.max_member_count < 1 {
            return Err(ServiceError::Validation(
                "invalid max member count".to_string(),
            ));
        }

        let status = match cmd.role {
            MemberRole::Mentor => TeamStatus::Ready,
            MemberRole::Mentee => TeamStatus::Waiting,
        };
        let team = Team::new(
            project.id,
            period,
            cmd.max_member_count,
            cmd.location,
            status,
        );
        let team = self.team_repo.create(&team).await?;

        let member = Member::new(team.id, user.id, cmd.role, true);
        self.member_repo.create(&member).await?;

        counter!("teamup_teams_created_total", "role" => cmd.role.to_string()).increment(1);
        info!(team_id = %team.id, status = %team.status, "team created");
        Ok(team)
    }

    /// 导师认领等待中的团队
    ///
    /// 仅对Waiting团队有效；认领者不能已是成员；新时间段必须
    /// 有效且落在团队最初公布的窗口内。认领使团队进入Ready，
    /// 导师以非创建者成员身份加入，并向所有创建者成员发送
    /// 匹配通知（尽力而为）。
    pub async fn claim_team(
        &self,
        session: Option<&SessionUser>,
        team_id: Uuid,
        cmd: ClaimTeamCommand,
    ) -> Result<Team, ServiceError> {
        let user = self.find_user(session).await?;
        let mut team = self.find_team(team_id).await?;
        let project = self.find_project(cmd.project_id).await?;

        if team.status != TeamStatus::Waiting {
            return Err(ServiceError::Conflict(
                "this team is not waiting status".to_string(),
            ));
        }
        if self
            .member_repo
            .find_by_team_and_user(team.id, user.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict("already joined".to_string()));
        }

        let period = Period::new(cmd.start_time, cmd.end_time);
        if !period.is_valid() || !team.period.is_in_range(&period) {
            return Err(ServiceError::Validation("invalid time range".to_string()));
        }
        // The mentor joins on top of the existing members, so the revised
        // capacity must leave room for one more.
        if cmd.max_member_count <= team.current_member_count {
            return Err(ServiceError::Validation(
                "invalid max member count".to_string(),
            ));
        }

        team.update_info(period, cmd.max_member_count, cmd.location, project.id);
        team.join_team()
            .map_err(|e| ServiceError::Conflict(e.to_string()))?;
        let team = self
            .team_repo
            .update(&team)
            .await
            .map_err(Self::map_write_conflict)?;

        let member = Member::new(team.id, user.id, MemberRole::Mentor, false);
        self.member_repo.create(&member).await?;

        // Match mails go to every creator member; failures must not roll
        // back the committed transition.
        let members = self.member_repo.find_by_team(team.id).await?;
        for member in members.iter().filter(|m| m.is_creator()) {
            self.notify(member.user_id, &team, Notification::Match).await;
        }

        counter!("teamup_teams_claimed_total").increment(1);
        info!(team_id = %team.id, mentor = %user.nickname, "team claimed by mentor");
        Ok(team)
    }

    /// 学员加入招募中的团队
    ///
    /// 仅Ready状态的团队可以加入；重复加入与满员都会被拒绝。
    /// 人数达到上限时，同一次调用把团队推进到Running。
    pub async fn join_team(
        &self,
        session: Option<&SessionUser>,
        team_id: Uuid,
    ) -> Result<Team, ServiceError> {
        let user = self.find_user(session).await?;
        let mut team = self.find_team(team_id).await?;

        if self
            .member_repo
            .find_by_team_and_user(team.id, user.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict("already joined".to_string()));
        }
        if team.status != TeamStatus::Ready {
            return Err(ServiceError::Conflict(
                "this team is not ready".to_string(),
            ));
        }
        if team.is_full() {
            return Err(ServiceError::Conflict("member is full".to_string()));
        }

        team.join_team().map_err(|e| match e {
            DomainError::MemberLimitReached => ServiceError::Conflict("member is full".to_string()),
            other => ServiceError::Conflict(other.to_string()),
        })?;
        let team = self
            .team_repo
            .update(&team)
            .await
            .map_err(Self::map_write_conflict)?;

        let member = Member::new(team.id, user.id, MemberRole::Mentee, false);
        self.member_repo.create(&member).await?;

        counter!("teamup_team_joins_total").increment(1);
        info!(team_id = %team.id, user = %user.nickname, "member joined team");
        Ok(team)
    }

    /// 成员退出团队
    ///
    /// End与Waiting状态不允许退出；创建者与导师不允许退出。
    pub async fn leave_team(
        &self,
        session: Option<&SessionUser>,
        team_id: Uuid,
    ) -> Result<(), ServiceError> {
        let user = self.find_user(session).await?;
        let mut team = self.find_team(team_id).await?;
        let member = self
            .member_repo
            .find_by_team_and_user(team.id, user.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("not this team member".to_string()))?;

        if team.status == TeamStatus::End {
            return Err(ServiceError::Conflict(
                "this team is end status".to_string(),
            ));
        }
        if team.status == TeamStatus::Waiting {
            return Err(ServiceError::Conflict(
                "this team is waiting status".to_string(),
            ));
        }
        if member.is_creator() {
            return Err(ServiceError::Forbidden(
                "creator can not leave the team".to_string(),
            ));
        }
        if member.is_mentor() {
            return Err(ServiceError::Forbidden(
                "mentor can not leave the team".to_string(),
            ));
        }

        team.out_team()
            .map_err(|e| ServiceError::Conflict(e.to_string()))?;
        self.team_repo
            .update(&team)
            .await
            .map_err(Self::map_write_conflict)?;
        self.member_repo.delete(member.id).await?;

        counter!("teamup_team_leaves_total").increment(1);
        info!(team_id = %team.id, user = %user.nickname, "member left team");
        Ok(())
    }

    /// 导师结束团队
    ///
    /// 仅该团队的导师成员可以结束；重复结束被拒绝。
    /// 结束后向全体成员发送结束通知（尽力而为）。
    pub async fn end_team(
        &self,
        session: Option<&SessionUser>,
        team_id: Uuid,
    ) -> Result<Team, ServiceError> {
        let user = self.find_user(session).await?;
        let mut team = self.find_team(team_id).await?;
        self.member_repo
            .find_by_team_and_user_and_role(team.id, user.id, MemberRole::Mentor)
            .await?
            .ok_or_else(|| ServiceError::Forbidden("not this team mentor".to_string()))?;

        if team.status == TeamStatus::End {
            return Err(ServiceError::Conflict("already end status".to_string()));
        }
        team.end_team()
            .map_err(|e| ServiceError::Conflict(e.to_string()))?;
        let team = self
            .team_repo
            .update(&team)
            .await
            .map_err(Self::map_write_conflict)?;

        let members = self.member_repo.find_by_team(team.id).await?;
        for member in &members {
            self.notify(member.user_id, &team, Notification::End).await;
        }

        counter!("teamup_teams_ended_total").increment(1);
        info!(team_id = %team.id, "team ended by mentor");
        Ok(team)
    }

    /// 删除团队
    ///
    /// 仅在Waiting状态（尚未匹配）下允许，成员记录与团队记录
    /// 在同一次操作中一并删除。
    pub async fn delete_team(
        &self,
        session: Option<&SessionUser>,
        team_id: Uuid,
    ) -> Result<(), ServiceError> {
        let user = self.find_user(session).await?;
        let team = self.find_team(team_id).await?;
        self.member_repo
            .find_by_team_and_user(team.id, user.id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("not this team member".to_string()))?;

        if team.status != TeamStatus::Waiting {
            return Err(ServiceError::Conflict(
                "this team is already matched".to_string(),
            ));
        }

        self.member_repo.delete_by_team(team.id).await?;
        self.team_repo.delete(team.id).await?;

        counter!("teamup_teams_deleted_total").increment(1);
        info!(team_id = %team.id, "waiting team deleted");
        Ok(())
    }

    /// 批量过期清理
    ///
    /// 找出所有状态非End且结束时间不晚于 `now` 的团队并推进到
    /// End。候选集合为空时返回独立的"无事可做"失败，调用方
    /// 可以据此区分空扫描。
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<Team>)` - 本次被结束的团队
    /// * `Err(ServiceError::NotFound)` - 没有可过期的团队
    pub async fn expire_teams(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Team>, ServiceError> {
        let teams = self.team_repo.find_expirable(now).await?;
        if teams.is_empty() {
            return Err(ServiceError::NotFound(
                "nothing to change teams".to_string(),
            ));
        }

        let mut expired = Vec::with_capacity(teams.len());
        for mut team in teams {
            if team.end_team().is_err() {
                continue;
            }
            match self.team_repo.update(&team).await {
                Ok(updated) => expired.push(updated),
                // A concurrent sweep or mentor already moved this team on.
                Err(RepositoryError::Conflict) => {
                    warn!(team_id = %team.id, "skipping team updated concurrently during sweep");
                }
                Err(e) => return Err(e.into()),
            }
        }

        counter!("teamup_teams_expired_total").increment(expired.len() as u64);
        info!(count = expired.len(), "expired overdue teams");
        Ok(expired)
    }

    /// 条件查询团队列表
    ///
    /// 三种查询形态：无成员关系过滤；限定为某昵称用户参与的
    /// 团队ID集合；排除该集合（集合为空时退化为无过滤查询）。
    /// 非法排序键作为校验失败上报；意外的持久化错误降级为
    /// 空结果并记录日志。
    ///
    /// # 返回值
    ///
    /// * `Ok((Vec<Team>, u64))` - 当页团队与总条数
    /// * `Err(ServiceError::Validation)` - 排序键解析失败
    pub async fn find_teams(
        &self,
        criteria: TeamListCriteria,
    ) -> Result<(Vec<Team>, u64), ServiceError> {
        let page = Self::to_page_request(&criteria)?;

        let id_filter = if let Some(nickname) = criteria.nickname.as_deref() {
            let team_ids = match self
                .find_team_ids_by_nickname(nickname, criteria.creator, criteria.member_role)
                .await
            {
                Ok(ids) => ids,
                Err(e) => {
                    error!("failed to resolve membership filter: {}", e);
                    return Ok((Vec::new(), 0));
                }
            };
            if team_ids.is_empty() {
                // No memberships means nothing can match the inclusion filter.
                return Ok((Vec::new(), 0));
            }
            Some(TeamIdFilter::Include(team_ids))
        } else if let Some(nickname) = criteria.exclude_nickname.as_deref() {
            match self
                .find_team_ids_by_nickname(nickname, criteria.creator, criteria.member_role)
                .await
            {
                Ok(ids) if ids.is_empty() => None,
                Ok(ids) => Some(TeamIdFilter::Exclude(ids)),
                Err(e) => {
                    error!("failed to resolve membership filter: {}", e);
                    return Ok((Vec::new(), 0));
                }
            }
        } else {
            None
        };

        let params = TeamQueryParams {
            status: criteria.status,
            location: criteria.location,
            start_time_after: criteria.start_time_after,
            end_time_after: criteria.end_time_after,
            id_filter,
        };

        match self.team_repo.query_teams(params, page).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("failed to find teams: {}", e);
                Ok((Vec::new(), 0))
            }
        }
    }

    /// 解析分页与排序参数
    ///
    /// 排序键形如 "字段" 或 "字段,方向"，缺省按创建时间降序。
    fn to_page_request(criteria: &TeamListCriteria) -> Result<PageRequest, ServiceError> {
        let sort = criteria.sort.as_deref().unwrap_or("created_at");
        let (field_str, direction) = match sort.split_once(',') {
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some(_) => {
                return Err(ServiceError::Validation(format!(
                    "failed to parse sort option: {}",
                    sort
                )))
            }
            None => (sort, SortDirection::Desc),
        };
        let sort_field = match field_str {
            "start_time" => TeamSortField::StartTime,
            "end_time" => TeamSortField::EndTime,
            "max_member_count" => TeamSortField::MaxMemberCount,
            "created_at" => TeamSortField::CreatedAt,
            _ => {
                return Err(ServiceError::Validation(format!(
                    "failed to parse sort option: {}",
                    sort
                )))
            }
        };
        Ok(PageRequest {
            offset: criteria.offset,
            limit: criteria.limit,
            sort_field,
            sort_direction: direction,
        })
    }

    /// 把昵称解析为该用户参与的团队ID集合
    ///
    /// 未注册的昵称按空集合处理。
    async fn find_team_ids_by_nickname(
        &self,
        nickname: &str,
        creator: bool,
        role: Option<MemberRole>,
    ) -> Result<Vec<Uuid>, ServiceError> {
        let user = match self.user_repo.find_by_nickname(nickname).await? {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };
        let members = if creator {
            self.member_repo
                .find_by_user_and_creator_and_role(user.id, true, role)
                .await?
        } else {
            self.member_repo
                .find_by_user_and_role(user.id, role)
                .await?
        };
        Ok(members.into_iter().map(|m| m.team_id).collect())
    }

    async fn notify(&self, user_id: Uuid, team: &Team, kind: Notification) {
        let user = match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!(%user_id, "skipping notification for unknown user");
                return;
            }
            Err(e) => {
                warn!(%user_id, "failed to load user for notification: {}", e);
                return;
            }
        };
        let result = match kind {
            Notification::Match => self.mail_service.send_match_mail(&user, team).await,
            Notification::End => self.mail_service.send_end_mail(&user, team).await,
        };
        if let Err(e) = result {
            warn!(team_id = %team.id, user = %user.nickname, "mail delivery failed: {}", e);
        }
    }

    async fn find_user(&self, session: Option<&SessionUser>) -> Result<User, ServiceError> {
        let session = session.ok_or(ServiceError::NotLoggedIn)?;
        self.user_repo
            .find_by_nickname(&session.nickname)
            .await?
            .ok_or_else(|| ServiceError::NotFound("invalid user".to_string()))
    }

    async fn find_team(&self, team_id: Uuid) -> Result<Team, ServiceError> {
        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("team not exist".to_string()))
    }

    async fn find_project(&self, project_id: Uuid) -> Result<Project, ServiceError> {
        self.project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("invalid project".to_string()))
    }

    fn map_write_conflict(e: RepositoryError) -> ServiceError {
        match e {
            RepositoryError::Conflict => {
                ServiceError::Conflict("team was modified concurrently".to_string())
            }
            other => ServiceError::Repository(other),
        }
    }
}

enum Notification {
    Match,
    End,
}

/// 枚举全部活动地点
pub fn find_all_locations() -> &'static [TeamLocation] {
    TeamLocation::all()
}

#[cfg(test)]
#[path = "team_service_test.rs"]
mod tests;

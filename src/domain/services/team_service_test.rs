use super::*;
use crate::domain::models::member::{Member, MemberRole};
use crate::domain::models::period::Period;
use crate::domain::models::project::Project;
use crate::domain::models::team::{Team, TeamLocation, TeamStatus};
use crate::domain::models::user::{SessionUser, User, UserRole};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use std::sync::Mutex;

fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn user(nickname: &str) -> User {
    User {
        id: Uuid::new_v4(),
        nickname: nickname.to_string(),
        fullname: format!("{} fullname", nickname),
        email: format!("{}@example.com", nickname),
        picture: None,
        role: UserRole::User,
    }
}

fn session(nickname: &str) -> SessionUser {
    SessionUser {
        nickname: nickname.to_string(),
    }
}

#[derive(Default)]
struct InMemoryTeamRepo {
    teams: Mutex<HashMap<Uuid, Team>>,
    last_query: Mutex<Option<TeamQueryParams>>,
    fail_update_with_conflict: Mutex<bool>,
}

impl InMemoryTeamRepo {
    fn insert(&self, team: Team) {
        self.teams.lock().unwrap().insert(team.id, team);
    }

    fn get(&self, id: Uuid) -> Team {
        self.teams.lock().unwrap().get(&id).cloned().unwrap()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepo {
    async fn create(&self, team: &Team) -> Result<Team, RepositoryError> {
        self.teams.lock().unwrap().insert(team.id, team.clone());
        Ok(team.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, RepositoryError> {
        Ok(self.teams.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, team: &Team) -> Result<Team, RepositoryError> {
        if *self.fail_update_with_conflict.lock().unwrap() {
            return Err(RepositoryError::Conflict);
        }
        let mut teams = self.teams.lock().unwrap();
        let stored = teams.get(&team.id).ok_or(RepositoryError::NotFound)?;
        if stored.version != team.version {
            return Err(RepositoryError::Conflict);
        }
        let mut updated = team.clone();
        updated.version += 1;
        teams.insert(team.id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.teams
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_expirable(
        &self,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Team>, RepositoryError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .values()
            .filter(|t| t.status != TeamStatus::End && t.period.end_time <= now)
            .cloned()
            .collect())
    }

    async fn query_teams(
        &self,
        params: TeamQueryParams,
        _page: PageRequest,
    ) -> Result<(Vec<Team>, u64), RepositoryError> {
        *self.last_query.lock().unwrap() = Some(params);
        Ok((Vec::new(), 0))
    }
}

#[derive(Default)]
struct InMemoryMemberRepo {
    members: Mutex<Vec<Member>>,
}

impl InMemoryMemberRepo {
    fn insert(&self, member: Member) {
        self.members.lock().unwrap().push(member);
    }

    fn count_for_team(&self, team_id: Uuid) -> usize {
        self.members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.team_id == team_id)
            .count()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepo {
    async fn create(&self, member: &Member) -> Result<Member, RepositoryError> {
        self.members.lock().unwrap().push(member.clone());
        Ok(member.clone())
    }

    async fn find_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Member>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.team_id == team_id && m.user_id == user_id)
            .cloned())
    }

    async fn find_by_team_and_user_and_role(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<Option<Member>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.team_id == team_id && m.user_id == user_id && m.role == role)
            .cloned())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<Member>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_and_role(
        &self,
        user_id: Uuid,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && role.map_or(true, |r| m.role == r))
            .cloned()
            .collect())
    }

    async fn find_by_user_and_creator_and_role(
        &self,
        user_id: Uuid,
        creator: bool,
        role: Option<MemberRole>,
    ) -> Result<Vec<Member>, RepositoryError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| {
                m.user_id == user_id && m.creator == creator && role.map_or(true, |r| m.role == r)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_team(&self, team_id: Uuid) -> Result<u64, RepositoryError> {
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| m.team_id != team_id);
        Ok((before - members.len()) as u64)
    }
}

struct InMemoryUserRepo {
    users: Vec<User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.iter().find(|u| u.nickname == nickname).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        Ok(user.clone())
    }
}

struct InMemoryProjectRepo {
    projects: Vec<Project>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        Ok(self.projects.iter().find(|p| p.id == id).cloned())
    }
}

#[derive(Default)]
struct RecordingMailService {
    match_mails: Mutex<Vec<String>>,
    end_mails: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl MailService for RecordingMailService {
    async fn send_match_mail(&self, user: &User, _team: &Team) -> Result<()> {
        if self.fail {
            anyhow::bail!("mail gateway unavailable");
        }
        self.match_mails.lock().unwrap().push(user.nickname.clone());
        Ok(())
    }

    async fn send_end_mail(&self, user: &User, _team: &Team) -> Result<()> {
        if self.fail {
            anyhow::bail!("mail gateway unavailable");
        }
        self.end_mails.lock().unwrap().push(user.nickname.clone());
        Ok(())
    }
}

struct Fixture {
    service: TeamService,
    team_repo: Arc<InMemoryTeamRepo>,
    member_repo: Arc<InMemoryMemberRepo>,
    mail: Arc<RecordingMailService>,
    users: Vec<User>,
    project: Project,
}

impl Fixture {
    fn new(nicknames: &[&str]) -> Self {
        Self::with_mailer(nicknames, RecordingMailService::default())
    }

    fn with_mailer(nicknames: &[&str], mailer: RecordingMailService) -> Self {
        let users: Vec<User> = nicknames.iter().map(|n| user(n)).collect();
        let project = Project {
            id: Uuid::new_v4(),
            name: "rust-study".to_string(),
        };
        let team_repo = Arc::new(InMemoryTeamRepo::default());
        let member_repo = Arc::new(InMemoryMemberRepo::default());
        let mail = Arc::new(mailer);
        let service = TeamService::new(
            Arc::new(InMemoryUserRepo {
                users: users.clone(),
            }),
            team_repo.clone(),
            member_repo.clone(),
            Arc::new(InMemoryProjectRepo {
                projects: vec![project.clone()],
            }),
            mail.clone(),
        );
        Self {
            service,
            team_repo,
            member_repo,
            mail,
            users,
            project,
        }
    }

    fn user_by_nickname(&self, nickname: &str) -> &User {
        self.users.iter().find(|u| u.nickname == nickname).unwrap()
    }

    /// 直接构造一个处于给定状态的团队，包含一个学员创建者成员。
    fn seed_team(
        &self,
        creator_nickname: &str,
        status: TeamStatus,
        current: i32,
        max: i32,
    ) -> Team {
        let period = Period::new(ts("2024-01-01T10:00:00+09:00"), ts("2024-01-01T12:00:00+09:00"));
        let mut team = Team::new(self.project.id, period, max, TeamLocation::Gangnam, status);
        team.current_member_count = current;
        self.team_repo.insert(team.clone());
        let creator = self.user_by_nickname(creator_nickname);
        self.member_repo
            .insert(Member::new(team.id, creator.id, MemberRole::Mentee, true));
        team
    }

    fn create_command(&self, role: MemberRole) -> CreateTeamCommand {
        CreateTeamCommand {
            project_id: self.project.id,
            start_time: ts("2024-01-01T10:00:00+09:00"),
            end_time: ts("2024-01-01T12:00:00+09:00"),
            max_member_count: 3,
            location: TeamLocation::Gangnam,
            role,
        }
    }

    fn claim_command(&self, start: &str, end: &str) -> ClaimTeamCommand {
        ClaimTeamCommand {
            project_id: self.project.id,
            start_time: ts(start),
            end_time: ts(end),
            max_member_count: 3,
            location: TeamLocation::Gangnam,
        }
    }
}

#[tokio::test]
async fn create_team_as_mentee_starts_waiting() {
    let fx = Fixture::new(&["mentee"]);
    let team = fx
        .service
        .create_team(Some(&session("mentee")), fx.create_command(MemberRole::Mentee))
        .await
        .unwrap();

    assert_eq!(team.status, TeamStatus::Waiting);
    assert_eq!(team.current_member_count, 1);
    let members = fx.member_repo.find_by_team(team.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].creator);
    assert_eq!(members[0].role, MemberRole::Mentee);
}

#[tokio::test]
async fn create_team_as_mentor_starts_ready() {
    let fx = Fixture::new(&["mentor"]);
    let team = fx
        .service
        .create_team(Some(&session("mentor")), fx.create_command(MemberRole::Mentor))
        .await
        .unwrap();

    assert_eq!(team.status, TeamStatus::Ready);
    let members = fx.member_repo.find_by_team(team.id).await.unwrap();
    assert_eq!(members[0].role, MemberRole::Mentor);
    assert!(members[0].creator);
}

#[tokio::test]
async fn create_team_rejects_inverted_period() {
    let fx = Fixture::new(&["mentee"]);
    let mut cmd = fx.create_command(MemberRole::Mentee);
    cmd.start_time = ts("2024-01-01T12:00:00+09:00");
    cmd.end_time = ts("2024-01-01T10:00:00+09:00");

    let err = fx
        .service
        .create_team(Some(&session("mentee")), cmd)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn create_team_rejects_nonpositive_member_limit() {
    let fx = Fixture::new(&["mentee"]);
    let mut cmd = fx.create_command(MemberRole::Mentee);
    cmd.max_member_count = 0;

    let err = fx
        .service
        .create_team(Some(&session("mentee")), cmd)
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(msg) => assert_eq!(msg, "invalid max member count"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_team_requires_login() {
    let fx = Fixture::new(&["mentee"]);
    let err = fx
        .service
        .create_team(None, fx.create_command(MemberRole::Mentee))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotLoggedIn));
}

#[tokio::test]
async fn create_team_rejects_unknown_project() {
    let fx = Fixture::new(&["mentee"]);
    let mut cmd = fx.create_command(MemberRole::Mentee);
    cmd.project_id = Uuid::new_v4();

    let err = fx
        .service
        .create_team(Some(&session("mentee")), cmd)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn mentor_claim_transitions_waiting_team_to_ready() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let claimed = fx
        .service
        .claim_team(
            Some(&session("mentor")),
            team.id,
            fx.claim_command("2024-01-01T10:30:00+09:00", "2024-01-01T11:30:00+09:00"),
        )
        .await
        .unwrap();

    assert_eq!(claimed.status, TeamStatus::Ready);
    assert_eq!(claimed.current_member_count, 2);
    let mentor = fx.user_by_nickname("mentor");
    let member = fx
        .member_repo
        .find_by_team_and_user(team.id, mentor.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.role, MemberRole::Mentor);
    assert!(!member.creator);
    // 匹配邮件只发给创建者
    assert_eq!(*fx.mail.match_mails.lock().unwrap(), vec!["creator"]);
}

#[tokio::test]
async fn mentor_claim_accepts_identical_period() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let claimed = fx
        .service
        .claim_team(
            Some(&session("mentor")),
            team.id,
            fx.claim_command("2024-01-01T10:00:00+09:00", "2024-01-01T12:00:00+09:00"),
        )
        .await
        .unwrap();
    assert_eq!(claimed.status, TeamStatus::Ready);
}

#[tokio::test]
async fn mentor_claim_rejects_period_outside_window() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let err = fx
        .service
        .claim_team(
            Some(&session("mentor")),
            team.id,
            fx.claim_command("2024-01-01T09:00:00+09:00", "2024-01-01T11:00:00+09:00"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(fx.team_repo.get(team.id).status, TeamStatus::Waiting);
}

#[tokio::test]
async fn mentor_claim_rejects_capacity_not_above_current_members() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    // 导师自己也要加入，上限必须大于当前人数
    let mut cmd = fx.claim_command("2024-01-01T10:30:00+09:00", "2024-01-01T11:30:00+09:00");
    cmd.max_member_count = 1;

    let err = fx
        .service
        .claim_team(Some(&session("mentor")), team.id, cmd)
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(msg) => assert_eq!(msg, "invalid max member count"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(fx.team_repo.get(team.id).status, TeamStatus::Waiting);
}

#[tokio::test]
async fn mentor_claim_rejects_existing_member() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let err = fx
        .service
        .claim_team(
            Some(&session("creator")),
            team.id,
            fx.claim_command("2024-01-01T10:30:00+09:00", "2024-01-01T11:30:00+09:00"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn mentor_claim_rejects_non_waiting_team() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 1, 3);

    let err = fx
        .service
        .claim_team(
            Some(&session("mentor")),
            team.id,
            fx.claim_command("2024-01-01T10:30:00+09:00", "2024-01-01T11:30:00+09:00"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn join_rejects_full_team() {
    let fx = Fixture::new(&["creator", "third"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 3, 3);

    let err = fx
        .service
        .join_team(Some(&session("third")), team.id)
        .await
        .unwrap_err();
    match err {
        ServiceError::Conflict(msg) => assert_eq!(msg, "member is full"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn join_transitions_to_running_at_capacity() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 2, 3);

    let joined = fx
        .service
        .join_team(Some(&session("mentee2")), team.id)
        .await
        .unwrap();

    assert_eq!(joined.current_member_count, 3);
    assert_eq!(joined.status, TeamStatus::Running);
    assert_eq!(fx.member_repo.count_for_team(team.id), 2);
}

#[tokio::test]
async fn join_stays_ready_below_capacity() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 2, 4);

    let joined = fx
        .service
        .join_team(Some(&session("mentee2")), team.id)
        .await
        .unwrap();
    assert_eq!(joined.status, TeamStatus::Ready);
    assert_eq!(joined.current_member_count, 3);
}

#[tokio::test]
async fn join_rejects_duplicate_member() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 1, 3);

    let err = fx
        .service
        .join_team(Some(&session("creator")), team.id)
        .await
        .unwrap_err();
    match err {
        ServiceError::Conflict(msg) => assert_eq!(msg, "already joined"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn join_rejects_waiting_team() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let err = fx
        .service
        .join_team(Some(&session("mentee2")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn join_surfaces_concurrent_write_conflict() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 1, 3);
    *fx.team_repo.fail_update_with_conflict.lock().unwrap() = true;

    let err = fx
        .service
        .join_team(Some(&session("mentee2")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    // 冲突时不得遗留成员记录
    assert_eq!(fx.member_repo.count_for_team(team.id), 1);
}

#[tokio::test]
async fn leave_rejects_creator_regardless_of_status() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 2, 3);

    let err = fx
        .service
        .leave_team(Some(&session("creator")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn leave_rejects_mentor() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 2, 3);
    let mentor = fx.user_by_nickname("mentor");
    fx.member_repo
        .insert(Member::new(team.id, mentor.id, MemberRole::Mentor, false));

    let err = fx
        .service
        .leave_team(Some(&session("mentor")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn leave_rejects_waiting_and_end_status() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    for status in [TeamStatus::Waiting, TeamStatus::End] {
        let team = fx.seed_team("creator", status, 2, 3);
        let mentee = fx.user_by_nickname("mentee2");
        fx.member_repo
            .insert(Member::new(team.id, mentee.id, MemberRole::Mentee, false));

        let err = fx
            .service
            .leave_team(Some(&session("mentee2")), team.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}

#[tokio::test]
async fn leave_removes_member_and_decrements_count() {
    let fx = Fixture::new(&["creator", "mentee2"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 2, 3);
    let mentee = fx.user_by_nickname("mentee2");
    fx.member_repo
        .insert(Member::new(team.id, mentee.id, MemberRole::Mentee, false));

    fx.service
        .leave_team(Some(&session("mentee2")), team.id)
        .await
        .unwrap();

    assert_eq!(fx.team_repo.get(team.id).current_member_count, 1);
    assert_eq!(fx.member_repo.count_for_team(team.id), 1);
}

#[tokio::test]
async fn leave_rejects_non_member() {
    let fx = Fixture::new(&["creator", "stranger"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 1, 3);

    let err = fx
        .service
        .leave_team(Some(&session("stranger")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn end_requires_mentor_membership() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 1, 3);

    let err = fx
        .service
        .end_team(Some(&session("creator")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn end_rejects_already_ended_team() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::End, 2, 3);
    let mentor = fx.user_by_nickname("mentor");
    fx.member_repo
        .insert(Member::new(team.id, mentor.id, MemberRole::Mentor, false));

    let err = fx
        .service
        .end_team(Some(&session("mentor")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn end_notifies_every_member() {
    let fx = Fixture::new(&["creator", "mentor"]);
    let team = fx.seed_team("creator", TeamStatus::Running, 2, 3);
    let mentor = fx.user_by_nickname("mentor");
    fx.member_repo
        .insert(Member::new(team.id, mentor.id, MemberRole::Mentor, false));

    let ended = fx
        .service
        .end_team(Some(&session("mentor")), team.id)
        .await
        .unwrap();

    assert_eq!(ended.status, TeamStatus::End);
    let mut mails = fx.mail.end_mails.lock().unwrap().clone();
    mails.sort();
    assert_eq!(mails, vec!["creator", "mentor"]);
}

#[tokio::test]
async fn end_succeeds_even_when_mail_delivery_fails() {
    let fx = Fixture::with_mailer(
        &["creator", "mentor"],
        RecordingMailService {
            fail: true,
            ..Default::default()
        },
    );
    let team = fx.seed_team("creator", TeamStatus::Running, 2, 3);
    let mentor = fx.user_by_nickname("mentor");
    fx.member_repo
        .insert(Member::new(team.id, mentor.id, MemberRole::Mentor, false));

    let ended = fx
        .service
        .end_team(Some(&session("mentor")), team.id)
        .await
        .unwrap();
    assert_eq!(ended.status, TeamStatus::End);
    assert_eq!(fx.team_repo.get(team.id).status, TeamStatus::End);
}

#[tokio::test]
async fn delete_rejects_matched_team() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Ready, 2, 3);

    let err = fx
        .service
        .delete_team(Some(&session("creator")), team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn delete_removes_waiting_team_with_members() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    fx.service
        .delete_team(Some(&session("creator")), team.id)
        .await
        .unwrap();

    assert!(fx.team_repo.teams.lock().unwrap().is_empty());
    assert_eq!(fx.member_repo.count_for_team(team.id), 0);
}

#[tokio::test]
async fn expire_reports_nothing_to_do_on_empty_sweep() {
    let fx = Fixture::new(&["creator"]);
    // 一个尚未到期的团队存在，但候选集合为空
    let team = fx.seed_team("creator", TeamStatus::Ready, 1, 3);

    let err = fx
        .service
        .expire_teams(ts("2024-01-01T09:00:00+09:00"))
        .await
        .unwrap_err();
    match err {
        ServiceError::NotFound(msg) => assert_eq!(msg, "nothing to change teams"),
        other => panic!("expected not found, got {:?}", other),
    }
    assert_eq!(fx.team_repo.get(team.id).status, TeamStatus::Ready);
}

#[tokio::test]
async fn expire_ends_overdue_teams() {
    let fx = Fixture::new(&["creator"]);
    let overdue = fx.seed_team("creator", TeamStatus::Running, 2, 3);

    let expired = fx
        .service
        .expire_teams(ts("2024-01-01T12:00:00+09:00"))
        .await
        .unwrap();

    assert_eq!(expired.len(), 1);
    assert_eq!(fx.team_repo.get(overdue.id).status, TeamStatus::End);
}

#[tokio::test]
async fn find_teams_rejects_malformed_sort() {
    let fx = Fixture::new(&["creator"]);
    let criteria = TeamListCriteria {
        limit: 10,
        sort: Some("start_time,sideways".to_string()),
        ..Default::default()
    };

    let err = fx.service.find_teams(criteria).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let criteria = TeamListCriteria {
        limit: 10,
        sort: Some("unknown_field".to_string()),
        ..Default::default()
    };
    let err = fx.service.find_teams(criteria).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn find_teams_with_nickname_restricts_to_membership_ids() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let criteria = TeamListCriteria {
        limit: 10,
        nickname: Some("creator".to_string()),
        ..Default::default()
    };
    fx.service.find_teams(criteria).await.unwrap();

    let query = fx.team_repo.last_query.lock().unwrap().clone().unwrap();
    match query.id_filter {
        Some(TeamIdFilter::Include(ids)) => assert_eq!(ids, vec![team.id]),
        other => panic!("expected include filter, got {:?}", other),
    }
}

#[tokio::test]
async fn find_teams_with_unknown_nickname_returns_empty_page() {
    let fx = Fixture::new(&["creator"]);
    fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let criteria = TeamListCriteria {
        limit: 10,
        nickname: Some("nobody".to_string()),
        ..Default::default()
    };
    let (teams, total) = fx.service.find_teams(criteria).await.unwrap();
    assert!(teams.is_empty());
    assert_eq!(total, 0);
    // 空的包含集合不应下推到仓库查询
    assert!(fx.team_repo.last_query.lock().unwrap().is_none());
}

#[tokio::test]
async fn find_teams_exclude_with_empty_set_falls_back_to_unfiltered() {
    let fx = Fixture::new(&["creator"]);
    fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let criteria = TeamListCriteria {
        limit: 10,
        exclude_nickname: Some("nobody".to_string()),
        ..Default::default()
    };
    fx.service.find_teams(criteria).await.unwrap();

    let query = fx.team_repo.last_query.lock().unwrap().clone().unwrap();
    assert!(query.id_filter.is_none());
}

#[tokio::test]
async fn find_teams_exclude_projects_membership_ids() {
    let fx = Fixture::new(&["creator"]);
    let team = fx.seed_team("creator", TeamStatus::Waiting, 1, 3);

    let criteria = TeamListCriteria {
        limit: 10,
        exclude_nickname: Some("creator".to_string()),
        member_role: Some(MemberRole::Mentee),
        ..Default::default()
    };
    fx.service.find_teams(criteria).await.unwrap();

    let query = fx.team_repo.last_query.lock().unwrap().clone().unwrap();
    match query.id_filter {
        Some(TeamIdFilter::Exclude(ids)) => assert_eq!(ids, vec![team.id]),
        other => panic!("expected exclude filter, got {:?}", other),
    }
}

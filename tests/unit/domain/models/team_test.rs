// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::DateTime;
use teamup::domain::models::period::Period;
use teamup::domain::models::team::{DomainError, Team, TeamLocation, TeamStatus};
use uuid::Uuid;

fn sample_period() -> Period {
    Period::new(
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00+09:00").unwrap(),
        DateTime::parse_from_rfc3339("2024-01-01T12:00:00+09:00").unwrap(),
    )
}

fn team_with(status: TeamStatus, current: i32, max: i32) -> Team {
    let mut team = Team::new(
        Uuid::new_v4(),
        sample_period(),
        max,
        TeamLocation::Gangnam,
        status,
    );
    team.current_member_count = current;
    team
}

#[test]
fn test_new_team_starts_with_one_member() {
    let team = Team::new(
        Uuid::new_v4(),
        sample_period(),
        3,
        TeamLocation::Online,
        TeamStatus::Waiting,
    );
    assert_eq!(team.current_member_count, 1);
    assert_eq!(team.version, 0);
    assert_eq!(team.status, TeamStatus::Waiting);
}

#[test]
fn test_join_on_waiting_is_a_claim() {
    // Given: 等待认领的团队
    let mut team = team_with(TeamStatus::Waiting, 1, 3);

    team.join_team().unwrap();

    assert_eq!(team.status, TeamStatus::Ready);
    assert_eq!(team.current_member_count, 2);
}

#[test]
fn test_join_on_ready_advances_occupancy() {
    let mut team = team_with(TeamStatus::Ready, 2, 4);

    team.join_team().unwrap();

    assert_eq!(team.status, TeamStatus::Ready);
    assert_eq!(team.current_member_count, 3);
}

#[test]
fn test_join_reaching_capacity_starts_running() {
    let mut team = team_with(TeamStatus::Ready, 2, 3);

    team.join_team().unwrap();

    assert_eq!(team.status, TeamStatus::Running);
    assert_eq!(team.current_member_count, 3);
}

#[test]
fn test_join_on_full_ready_team_is_rejected() {
    let mut team = team_with(TeamStatus::Ready, 3, 3);

    assert_eq!(team.join_team(), Err(DomainError::MemberLimitReached));
    assert_eq!(team.current_member_count, 3);
}

#[test]
fn test_join_on_running_or_end_is_rejected() {
    for status in [TeamStatus::Running, TeamStatus::End] {
        let mut team = team_with(status, 2, 3);
        assert_eq!(team.join_team(), Err(DomainError::InvalidStateTransition));
    }
}

#[test]
fn test_out_decrements_without_regressing_status() {
    let mut team = team_with(TeamStatus::Running, 3, 3);

    team.out_team().unwrap();

    assert_eq!(team.status, TeamStatus::Running);
    assert_eq!(team.current_member_count, 2);
}

#[test]
fn test_out_is_rejected_outside_ready_and_running() {
    for status in [TeamStatus::Waiting, TeamStatus::End] {
        let mut team = team_with(status, 2, 3);
        assert_eq!(team.out_team(), Err(DomainError::InvalidStateTransition));
    }
}

#[test]
fn test_end_from_any_live_status() {
    for status in [TeamStatus::Waiting, TeamStatus::Ready, TeamStatus::Running] {
        let mut team = team_with(status, 2, 3);
        team.end_team().unwrap();
        assert_eq!(team.status, TeamStatus::End);
    }
}

#[test]
fn test_end_twice_is_rejected() {
    let mut team = team_with(TeamStatus::End, 2, 3);
    assert_eq!(team.end_team(), Err(DomainError::InvalidStateTransition));
}

#[test]
fn test_update_info_replaces_period_wholesale() {
    let mut team = team_with(TeamStatus::Waiting, 1, 3);
    let narrower = Period::new(
        DateTime::parse_from_rfc3339("2024-01-01T10:30:00+09:00").unwrap(),
        DateTime::parse_from_rfc3339("2024-01-01T11:30:00+09:00").unwrap(),
    );
    let project_id = Uuid::new_v4();

    team.update_info(narrower, 5, TeamLocation::Pangyo, project_id);

    assert_eq!(team.period, narrower);
    assert_eq!(team.max_member_count, 5);
    assert_eq!(team.location, TeamLocation::Pangyo);
    assert_eq!(team.project_id, project_id);
}

#[test]
fn test_status_round_trips_through_strings() {
    for status in [
        TeamStatus::Waiting,
        TeamStatus::Ready,
        TeamStatus::Running,
        TeamStatus::End,
    ] {
        assert_eq!(status.to_string().parse::<TeamStatus>(), Ok(status));
    }
    assert!("paused".parse::<TeamStatus>().is_err());
}

#[test]
fn test_location_ids_and_names_are_stable() {
    assert_eq!(TeamLocation::all().len(), 5);
    assert_eq!(TeamLocation::Gangnam.id(), 1);
    assert_eq!(TeamLocation::Online.id(), 5);
    assert_eq!(TeamLocation::Sinchon.display_name(), "Sinchon Campus");
    assert_eq!("guro".parse::<TeamLocation>(), Ok(TeamLocation::Guro));
}

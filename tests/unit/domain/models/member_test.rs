// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use teamup::domain::models::member::{Member, MemberRole};
use uuid::Uuid;

#[test]
fn test_member_flags() {
    let team_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let creator = Member::new(team_id, user_id, MemberRole::Mentee, true);
    assert!(creator.is_creator());
    assert!(!creator.is_mentor());

    let mentor = Member::new(team_id, Uuid::new_v4(), MemberRole::Mentor, false);
    assert!(mentor.is_mentor());
    assert!(!mentor.is_creator());
}

#[test]
fn test_role_round_trips_through_strings() {
    assert_eq!("mentor".parse::<MemberRole>(), Ok(MemberRole::Mentor));
    assert_eq!("mentee".parse::<MemberRole>(), Ok(MemberRole::Mentee));
    assert!("observer".parse::<MemberRole>().is_err());
    assert_eq!(MemberRole::Mentor.to_string(), "mentor");
}

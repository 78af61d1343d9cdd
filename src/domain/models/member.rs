// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 成员实体
///
/// 连接用户与团队的关联记录，持有成员角色与创建者标记。
/// team_id 外键是关系的权威方；同一 (团队, 用户) 组合最多
/// 存在一条成员记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// 成员记录唯一标识符
    pub id: Uuid,
    /// 所属团队ID
    pub team_id: Uuid,
    /// 对应用户ID
    pub user_id: Uuid,
    /// 成员角色
    pub role: MemberRole,
    /// 创建者标记，团队发起人为true
    pub creator: bool,
}

/// 成员角色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// 导师
    Mentor,
    /// 学员
    #[default]
    Mentee,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemberRole::Mentor => write!(f, "mentor"),
            MemberRole::Mentee => write!(f, "mentee"),
        }
    }
}

impl FromStr for MemberRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentor" => Ok(MemberRole::Mentor),
            "mentee" => Ok(MemberRole::Mentee),
            _ => Err(()),
        }
    }
}

impl Member {
    /// 创建一个新的成员记录
    pub fn new(team_id: Uuid, user_id: Uuid, role: MemberRole, creator: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            role,
            creator,
        }
    }

    pub fn is_creator(&self) -> bool {
        self.creator
    }

    pub fn is_mentor(&self) -> bool {
        self.role == MemberRole::Mentor
    }
}

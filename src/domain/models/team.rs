// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::period::Period;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 团队聚合实体
///
/// 表示一次绑定到具体项目的学习/辅导活动，持有生命周期状态、
/// 活动地点、时间段、人数上限与当前人数。成员关系由Member行
/// 单独持有，团队侧通过查询重建成员视图，不维护内存反向指针。
///
/// 状态只能沿 WAITING → READY → RUNNING → END 单向推进，
/// 且所有变更都经由服务层调用的方法完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// 团队唯一标识符
    pub id: Uuid,
    /// 生命周期状态
    pub status: TeamStatus,
    /// 活动地点
    pub location: TeamLocation,
    /// 活动时间段
    pub period: Period,
    /// 人数上限
    pub max_member_count: i32,
    /// 当前人数（含创建者）
    pub current_member_count: i32,
    /// 所属项目ID
    pub project_id: Uuid,
    /// 乐观锁版本号，持久化层据此串行化并发写入
    pub version: i32,
}

/// 团队生命周期状态枚举
///
/// 状态转换遵循以下流程（不允许回退）：
/// Waiting → Ready → Running → End
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// 等待导师认领
    #[default]
    Waiting,
    /// 招募成员中
    Ready,
    /// 活动进行中
    Running,
    /// 已结束
    End,
}

impl fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamStatus::Waiting => write!(f, "waiting"),
            TeamStatus::Ready => write!(f, "ready"),
            TeamStatus::Running => write!(f, "running"),
            TeamStatus::End => write!(f, "end"),
        }
    }
}

impl FromStr for TeamStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(TeamStatus::Waiting),
            "ready" => Ok(TeamStatus::Ready),
            "running" => Ok(TeamStatus::Running),
            "end" => Ok(TeamStatus::End),
            _ => Err(()),
        }
    }
}

/// 活动地点枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamLocation {
    Gangnam,
    Sinchon,
    Guro,
    Pangyo,
    #[default]
    Online,
}

impl TeamLocation {
    /// 枚举所有地点
    pub fn all() -> &'static [TeamLocation] {
        &[
            TeamLocation::Gangnam,
            TeamLocation::Sinchon,
            TeamLocation::Guro,
            TeamLocation::Pangyo,
            TeamLocation::Online,
        ]
    }

    /// 地点数字ID
    pub fn id(&self) -> i32 {
        match self {
            TeamLocation::Gangnam => 1,
            TeamLocation::Sinchon => 2,
            TeamLocation::Guro => 3,
            TeamLocation::Pangyo => 4,
            TeamLocation::Online => 5,
        }
    }

    /// 展示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TeamLocation::Gangnam => "Gangnam Campus",
            TeamLocation::Sinchon => "Sinchon Campus",
            TeamLocation::Guro => "Guro Campus",
            TeamLocation::Pangyo => "Pangyo Campus",
            TeamLocation::Online => "Online",
        }
    }
}

impl fmt::Display for TeamLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TeamLocation::Gangnam => write!(f, "gangnam"),
            TeamLocation::Sinchon => write!(f, "sinchon"),
            TeamLocation::Guro => write!(f, "guro"),
            TeamLocation::Pangyo => write!(f, "pangyo"),
            TeamLocation::Online => write!(f, "online"),
        }
    }
}

impl FromStr for TeamLocation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gangnam" => Ok(TeamLocation::Gangnam),
            "sinchon" => Ok(TeamLocation::Sinchon),
            "guro" => Ok(TeamLocation::Guro),
            "pangyo" => Ok(TeamLocation::Pangyo),
            "online" => Ok(TeamLocation::Online),
            _ => Err(()),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition")]
    InvalidStateTransition,

    /// 人数已达上限
    #[error("Member limit reached")]
    MemberLimitReached,
}

impl Team {
    /// 创建一个新的团队
    ///
    /// 创建者随后作为首个成员写入，因此当前人数从1开始。
    ///
    /// # 参数
    ///
    /// * `project_id` - 所属项目ID
    /// * `period` - 活动时间段
    /// * `max_member_count` - 人数上限
    /// * `location` - 活动地点
    /// * `status` - 初始状态（导师创建为Ready，学员创建为Waiting）
    pub fn new(
        project_id: Uuid,
        period: Period,
        max_member_count: i32,
        location: TeamLocation,
        status: TeamStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            status,
            location,
            period,
            max_member_count,
            current_member_count: 1,
            project_id,
            version: 0,
        }
    }

    /// 成员加入团队
    ///
    /// Waiting状态下的加入表示导师认领，团队进入Ready；
    /// Ready状态下人数递增，达到上限时进入Running。
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 加入成功
    /// * `Err(DomainError)` - 状态不允许加入或人数已满
    pub fn join_team(&mut self) -> Result<(), DomainError> {
        match self.status {
            TeamStatus::Waiting => {
                self.current_member_count += 1;
                self.status = TeamStatus::Ready;
                Ok(())
            }
            TeamStatus::Ready => {
                if self.current_member_count >= self.max_member_count {
                    return Err(DomainError::MemberLimitReached);
                }
                self.current_member_count += 1;
                if self.current_member_count >= self.max_member_count {
                    self.status = TeamStatus::Running;
                }
                Ok(())
            }
            TeamStatus::Running | TeamStatus::End => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 成员退出团队
    ///
    /// 仅在Ready或Running状态下允许，人数递减。状态不回退。
    pub fn out_team(&mut self) -> Result<(), DomainError> {
        match self.status {
            TeamStatus::Ready | TeamStatus::Running => {
                self.current_member_count -= 1;
                Ok(())
            }
            _ => Err(DomainError::InvalidStateTransition),
        }
    }

    /// 更新团队信息
    ///
    /// 导师认领时一并调整时间段、人数上限、地点与项目。
    /// 时间段整体替换，不做原地修改。
    pub fn update_info(
        &mut self,
        period: Period,
        max_member_count: i32,
        location: TeamLocation,
        project_id: Uuid,
    ) {
        self.period = period;
        self.max_member_count = max_member_count;
        self.location = location;
        self.project_id = project_id;
    }

    /// 结束团队
    ///
    /// 任何非End状态都可以推进到End；重复结束视为无效转换。
    pub fn end_team(&mut self) -> Result<(), DomainError> {
        match self.status {
            TeamStatus::End => Err(DomainError::InvalidStateTransition),
            _ => {
                self.status = TeamStatus::End;
                Ok(())
            }
        }
    }

    /// 判断团队是否已满员
    pub fn is_full(&self) -> bool {
        self.current_member_count >= self.max_member_count
    }
}

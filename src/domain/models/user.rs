// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 用户实体
///
/// 注册与OAuth登录由外部系统负责，本服务只读取用户记录并
/// 通过 `update` 修改昵称、姓名和头像三个可变字段。
/// 昵称全局唯一，作为查询键使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 用户唯一标识符
    pub id: Uuid,
    /// 昵称（唯一查询键）
    pub nickname: String,
    /// 姓名
    pub fullname: String,
    /// 邮箱地址
    pub email: String,
    /// 头像URL
    pub picture: Option<String>,
    /// 用户角色
    pub role: UserRole,
}

/// 会话用户
///
/// 身份中间件解析出的当前登录用户上下文，作为显式参数传入
/// 每个生命周期操作，不使用全局环境状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// 登录用户昵称
    pub nickname: String,
}

/// 用户角色枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// 正式用户
    #[default]
    User,
    /// 访客
    Guest,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Guest => write!(f, "guest"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "guest" => Ok(UserRole::Guest),
            _ => Err(()),
        }
    }
}

impl User {
    /// 更新用户可变字段
    ///
    /// 仅昵称、姓名、头像允许更新，其余身份字段创建后不变。
    pub fn update(&mut self, nickname: String, fullname: String, picture: Option<String>) {
        self.nickname = nickname;
        self.fullname = fullname;
        self.picture = picture;
    }
}

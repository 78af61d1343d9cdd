// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::team::Team;
use crate::domain::models::user::User;
use anyhow::Result;
use async_trait::async_trait;

/// 邮件服务特质
///
/// 定义匹配成功与活动结束两类通知邮件的发送接口。
/// 尽力而为语义：发送失败由调用方记录日志，不回滚已提交的
/// 状态转换，也不提供投递保证。
#[async_trait]
pub trait MailService: Send + Sync {
    /// 发送匹配成功通知
    ///
    /// # 参数
    ///
    /// * `user` - 收件用户
    /// * `team` - 匹配成功的团队
    async fn send_match_mail(&self, user: &User, team: &Team) -> Result<()>;

    /// 发送活动结束通知
    async fn send_end_mail(&self, user: &User, team: &Team) -> Result<()>;
}

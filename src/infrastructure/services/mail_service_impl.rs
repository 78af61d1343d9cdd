// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::team::Team;
use crate::domain::models::user::User;
use crate::domain::services::mail_service::MailService;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// 邮件网关请求负载
#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    template: &'a str,
    nickname: &'a str,
    team_id: String,
    location: String,
    start_time: String,
    end_time: String,
}

/// 邮件服务实现
///
/// 通过HTTP邮件网关投递通知。调用方按尽力而为处理返回值，
/// 网关失败不影响已提交的状态转换。
pub struct MailServiceImpl {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 网关地址
    base_url: String,
}

impl MailServiceImpl {
    /// 创建新的邮件服务实现
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client, base_url }
    }

    async fn deliver(
        &self,
        user: &User,
        team: &Team,
        subject: &str,
        template: &str,
    ) -> Result<()> {
        let payload = MailPayload {
            to: &user.email,
            subject,
            template,
            nickname: &user.nickname,
            team_id: team.id.to_string(),
            location: team.location.display_name().to_string(),
            start_time: team.period.start_time.to_rfc3339(),
            end_time: team.period.end_time.to_rfc3339(),
        };

        let response = self
            .client
            .post(format!("{}/v1/mails", self.base_url))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Mail delivery failed with status {}: {}",
                status,
                body
            ))
        }
    }
}

#[async_trait]
impl MailService for MailServiceImpl {
    async fn send_match_mail(&self, user: &User, team: &Team) -> Result<()> {
        self.deliver(user, team, "Your team has been matched", "team_match")
            .await
    }

    async fn send_end_mail(&self, user: &User, team: &Team) -> Result<()> {
        self.deliver(user, team, "Your team activity has ended", "team_end")
            .await
    }
}

#[cfg(test)]
#[path = "mail_service_impl_test.rs"]
mod tests;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::team_service::{ServiceError, TeamService};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// 团队过期清理工作器
///
/// 定期扫描结束时间已过的团队并推进到End状态
pub struct ExpirationWorker {
    service: Arc<TeamService>,
    interval: Duration,
}

impl ExpirationWorker {
    pub fn new(service: Arc<TeamService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Team expiration worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.sweep().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Expired {} overdue teams", count);
                    }
                }
                Err(e) => {
                    error!("Failed to expire overdue teams: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn sweep(&self) -> Result<usize, ServiceError> {
        match self.service.expire_teams(Utc::now().fixed_offset()).await {
            Ok(teams) => Ok(teams.len()),
            // An empty candidate set is a quiet no-op, not a failure.
            Err(ServiceError::NotFound(_)) => {
                debug!("No overdue teams to expire");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "expiration_worker_test.rs"]
mod tests;

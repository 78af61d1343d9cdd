// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志订阅器
///
/// 过滤级别取自RUST_LOG，缺省对本crate开启debug并压低
/// sea_orm的SQL日志；TEAMUP_LOG_FORMAT=json时输出结构化
/// 日志，便于日志采集系统消费。
pub fn init_telemetry() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,teamup=debug,sea_orm=warn".into());

    let registry = tracing_subscriber::registry().with(filter);

    if matches!(std::env::var("TEAMUP_LOG_FORMAT").as_deref(), Ok("json")) {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

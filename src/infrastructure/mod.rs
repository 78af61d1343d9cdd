// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域层接口的具体技术实现：
/// - 数据库连接与实体定义（database）
/// - 仓库的SeaORM实现（repositories）
/// - 邮件网关等外部服务客户端（services）
/// - Prometheus指标导出（metrics）
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod services;

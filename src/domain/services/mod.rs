// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 邮件服务（mail_service）：匹配与结束通知的发送接口
/// - 团队服务（team_service）：团队生命周期状态机与成员管理
/// - 用户服务（user_service）：用户资料更新
pub mod mail_service;
pub mod team_service;
pub mod user_service;

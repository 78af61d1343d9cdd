// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 成员仓库（member_repository）：管理用户与团队的关联记录
/// - 项目仓库（project_repository）：读取项目引用数据
/// - 团队仓库（team_repository）：管理团队聚合与条件查询
/// - 用户仓库（user_repository）：读取与更新用户记录
///
/// 这些接口确保了领域层不依赖于具体的数据存储技术，
/// 提高了系统的可测试性和可维护性.
pub mod member_repository;
pub mod project_repository;
pub mod team_repository;
pub mod user_repository;

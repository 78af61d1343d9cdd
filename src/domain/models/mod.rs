// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 成员（member）：用户与团队之间的关联记录
/// - 时间段（period）：描述团队活动起止时间的值对象
/// - 项目（project）：团队所绑定的不可变引用数据
/// - 团队（team）：带容量与生命周期状态的聚合实体
/// - 用户（user）：参与活动的注册用户
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为，是领域驱动设计的核心组成部分。
pub mod member;
pub mod period;
pub mod project;
pub mod team;
pub mod user;

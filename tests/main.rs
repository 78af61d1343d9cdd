// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 测试主模块
///
/// 组织和管理所有测试模块，提供对领域模型公共行为的
/// 黑盒测试覆盖
mod unit;

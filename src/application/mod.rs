// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 承载HTTP边界的数据传输对象（DTO），负责请求校验与
/// 领域对象到响应结构的转换。
pub mod dto;

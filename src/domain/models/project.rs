// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 项目实体
///
/// 不可变的引用数据，多个团队可以指向同一个项目。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// 项目唯一标识符
    pub id: Uuid,
    /// 项目名称
    pub name: String,
}

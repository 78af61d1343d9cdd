// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 活动时间段值对象
///
/// 表示团队活动的起止时间窗口。作为值对象使用：
/// 无标识、按值比较、构造后不再修改（更新时整体替换）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 开始时间
    pub start_time: DateTime<FixedOffset>,
    /// 结束时间
    pub end_time: DateTime<FixedOffset>,
}

impl Period {
    pub fn new(start_time: DateTime<FixedOffset>, end_time: DateTime<FixedOffset>) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// 检查时间段是否有效
    ///
    /// # 返回值
    ///
    /// 当且仅当开始时间严格早于结束时间时返回true
    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }

    /// 检查候选时间段是否落在本时间段内
    ///
    /// 边界包含：与本时间段完全相同的候选时间段视为包含。
    /// 用于保证导师调整后的时间不超出团队最初公布的窗口。
    ///
    /// # 参数
    ///
    /// * `candidate` - 候选时间段
    ///
    /// # 返回值
    ///
    /// 候选时间段完全落在 `[start_time, end_time]` 内时返回true
    pub fn is_in_range(&self, candidate: &Period) -> bool {
        candidate.start_time >= self.start_time && candidate.end_time <= self.end_time
    }
}

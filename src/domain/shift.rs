// ==========================================
// 产线小时生产追踪系统 - 班次实体
// ==========================================
// 职责: 班次起止时刻 + 班次类型推导
// ==========================================

use crate::domain::types::ShiftType;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// 班次
///
/// start_time / end_time 为墙钟时刻字符串（"HH:MM"，24 小时制）。
/// 跨夜班次（end < start）视为次日结束。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// 班次开始时刻，如 "06:00"
    pub start_time: String,
    /// 班次结束时刻，如 "14:00"
    pub end_time: String,
}

impl Shift {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// 解析开始时刻（"HH:MM"）
    pub fn parse_start(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()
    }

    /// 解析结束时刻（"HH:MM"）
    pub fn parse_end(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.end_time, "%H:%M").ok()
    }

    /// 由开始时刻推导班次类型
    ///
    /// 开始时刻无法解析时按 T1 处理（与料号节拍缺省行为一致）
    pub fn shift_type(&self) -> ShiftType {
        match self.parse_start() {
            Some(t) => ShiftType::from_start_hour(t.hour()),
            None => ShiftType::T1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_type_derivation() {
        assert_eq!(Shift::new("06:00", "14:00").shift_type(), ShiftType::T1);
        assert_eq!(Shift::new("14:00", "22:00").shift_type(), ShiftType::T2);
        assert_eq!(Shift::new("22:00", "06:00").shift_type(), ShiftType::T3);
    }

    #[test]
    fn test_unparseable_start_defaults_to_t1() {
        assert_eq!(Shift::new("??", "14:00").shift_type(), ShiftType::T1);
    }
}

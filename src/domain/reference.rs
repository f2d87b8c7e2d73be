// ==========================================
// 产线小时生产追踪系统 - 基础数据实体
// ==========================================
// 职责: 料号/计划停机/周良率/理论人数/停线原因目录
// 红线: 只读参考数据,引擎不修改
// ==========================================

use crate::domain::types::ShiftType;
use serde::{Deserialize, Serialize};

/// 料号主数据
///
/// run_rate_*: 各班次类型的节拍（件/小时，满编满时）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartNumber {
    pub code: String,
    pub description: Option<String>,
    pub run_rate_t1: u32,
    pub run_rate_t2: u32,
    pub run_rate_t3: u32,
}

impl PartNumber {
    /// 取指定班次类型的节拍
    pub fn run_rate(&self, shift_type: ShiftType) -> u32 {
        match shift_type {
            ShiftType::T1 => self.run_rate_t1,
            ShiftType::T2 => self.run_rate_t2,
            ShiftType::T3 => self.run_rate_t3,
        }
    }
}

/// 计划停机（餐休等计划性非生产时间）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammedStop {
    pub name: String,
    /// 停机时长（分钟）
    pub duration_minutes: u32,
    /// 周一至周五适用
    pub applies_weekday: bool,
    /// 周六适用
    pub applies_saturday: bool,
}

/// 周良率系数
///
/// factor: 倍率（通常 0-1+），按 (周次, 班次类型) 维护
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldFactor {
    pub week_number: u32,
    pub shift_type: ShiftType,
    pub factor: f64,
}

/// 理论人数（班次类型设计编制）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheoreticalHeadcount {
    pub shift_type: ShiftType,
    pub head_count: u32,
}

/// 停线原因（大类 + 细分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeCause {
    pub general_cause: String,
    pub specific_cause: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_rate_by_shift_type() {
        let part = PartNumber {
            code: "29508".to_string(),
            description: None,
            run_rate_t1: 56,
            run_rate_t2: 54,
            run_rate_t3: 50,
        };
        assert_eq!(part.run_rate(ShiftType::T1), 56);
        assert_eq!(part.run_rate(ShiftType::T2), 54);
        assert_eq!(part.run_rate(ShiftType::T3), 50);
    }
}

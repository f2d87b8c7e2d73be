// ==========================================
// 产线小时生产追踪系统 - 领域类型定义
// ==========================================
// 依据: 车间数据采集规范 v1.2 - 班次与登记时效
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次类型 (Shift Type)
// ==========================================
// 由班次开始时刻推导: 14:00-21:59 → T2, 22:00-05:59 → T3, 其余 → T1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    T1, // 早班
    T2, // 中班
    T3, // 夜班
}

impl ShiftType {
    /// 由班次开始小时（0-23）推导班次类型
    pub fn from_start_hour(hour: u32) -> Self {
        match hour {
            14..=21 => ShiftType::T2,
            22..=23 | 0..=5 => ShiftType::T3,
            _ => ShiftType::T1,
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftType::T1 => write!(f, "T1"),
            ShiftType::T2 => write!(f, "T2"),
            ShiftType::T3 => write!(f, "T3"),
        }
    }
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T1" => Ok(ShiftType::T1),
            "T2" => Ok(ShiftType::T2),
            "T3" => Ok(ShiftType::T3),
            other => Err(format!("未知班次类型: {}", other)),
        }
    }
}

// ==========================================
// 登记时效等级 (Staleness Level)
// ==========================================
// 红线: 等级制,仅用于展示/审计,不阻断提交
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StalenessLevel {
    Blank,    // 未登记（空行/未来时段）
    OnTime,   // 及时（≤ 15 分钟）
    Late,     // 迟登记（16-30 分钟）
    Critical, // 严重迟登记（> 30 分钟）
    Overtime, // 加班行（不参与时效判定）
}

impl fmt::Display for StalenessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StalenessLevel::Blank => write!(f, "BLANK"),
            StalenessLevel::OnTime => write!(f, "ON_TIME"),
            StalenessLevel::Late => write!(f, "LATE"),
            StalenessLevel::Critical => write!(f, "CRITICAL"),
            StalenessLevel::Overtime => write!(f, "OVERTIME"),
        }
    }
}

// ==========================================
// 校验结果 (Validation Result)
// ==========================================
// 红线: 校验只输出结构化结果,不抛异常;是否阻断由调用方决定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// 是否通过校验
    pub is_valid: bool,
    /// 拒绝原因（通过时为空字符串）
    pub message: String,
}

impl ValidationResult {
    /// 构造通过结果
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    /// 构造拒绝结果（必须带显式原因）
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_type_from_start_hour() {
        assert_eq!(ShiftType::from_start_hour(6), ShiftType::T1);
        assert_eq!(ShiftType::from_start_hour(13), ShiftType::T1);
        assert_eq!(ShiftType::from_start_hour(14), ShiftType::T2);
        assert_eq!(ShiftType::from_start_hour(21), ShiftType::T2);
        assert_eq!(ShiftType::from_start_hour(22), ShiftType::T3);
        assert_eq!(ShiftType::from_start_hour(0), ShiftType::T3);
        assert_eq!(ShiftType::from_start_hour(5), ShiftType::T3);
    }

    #[test]
    fn test_validation_result_constructors() {
        let ok = ValidationResult::valid();
        assert!(ok.is_valid);
        assert!(ok.message.is_empty());

        let bad = ValidationResult::invalid("缺少前序时段");
        assert!(!bad.is_valid);
        assert_eq!(bad.message, "缺少前序时段");
    }
}

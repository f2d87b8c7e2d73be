// ==========================================
// 产线小时生产追踪系统 - 录入校验引擎
// ==========================================
// 职责: 顺序完整性校验 + 时间窗校验
// 红线: 校验只输出结构化结果,不抛异常;阻断由调用方执行
// 红线: "当前时刻"由调用方注入
// ==========================================

use crate::domain::entry::ProductionEntry;
use crate::domain::types::ValidationResult;
use crate::engine::hour_range::parse_hour_label_start;
use chrono::NaiveDateTime;

// ==========================================
// EntryValidator - 录入校验器
// ==========================================
pub struct EntryValidator;

impl EntryValidator {
    /// 创建新的录入校验器
    pub fn new() -> Self {
        Self
    }

    /// 顺序完整性校验: 前序时段逐一完整后才能登记当前时段
    ///
    /// 口径: 每个前序时段只要存在"任意一条"完整登记即算完整
    /// （实际人数已填 + 工单非空 + 料号非空 + 实际产量已填），
    /// 不要求该时段全部记录完整，也不做去重合并。
    ///
    /// # 边界
    /// - 当前时段是第一个时段: 恒通过
    /// - 当前时段不在时段序列中: 通过（无可校验的前序）
    /// - 从最早时段开始扫描，第一个不完整的前序时段即拒绝，
    ///   拒绝原因点名该时段标签
    pub fn validate_registration_order(
        &self,
        entries: &[ProductionEntry],
        current_hour: &str,
        hour_ranges: &[String],
    ) -> ValidationResult {
        let current_index = match hour_ranges.iter().position(|h| h == current_hour) {
            Some(idx) => idx,
            None => return ValidationResult::valid(),
        };

        for prior_slot in &hour_ranges[..current_index] {
            let complete = entries
                .iter()
                .any(|e| e.hour == *prior_slot && e.is_complete());

            if !complete {
                return ValidationResult::invalid(format!(
                    "请先完成前序时段 {} 的登记",
                    prior_slot
                ));
            }
        }

        ValidationResult::valid()
    }

    /// 时间窗校验: 不允许提前登记尚未开始的时段
    ///
    /// 时段起始时刻与注入的当前时刻按"当日时刻"归一比较。
    ///
    /// # 边界
    /// - 时段标签无法解析: 拒绝（所有拒绝必须有显式原因）
    /// - 时段起始 == 当前时刻: 通过（当前时段可登记）
    pub fn validate_registration_time(
        &self,
        hour_range: &str,
        now: NaiveDateTime,
    ) -> ValidationResult {
        let slot_start = match parse_hour_label_start(hour_range) {
            Some(t) => t,
            None => {
                return ValidationResult::invalid(format!("时段标签无法解析: {}", hour_range))
            }
        };

        if slot_start > now.time() {
            return ValidationResult::invalid(format!(
                "时段 {} 尚未开始,不能提前登记",
                hour_range
            ));
        }

        ValidationResult::valid()
    }
}

impl Default for EntryValidator {
    fn default() -> Self {
        Self::new()
    }
}

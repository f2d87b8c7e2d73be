// ==========================================
// 产线小时生产追踪系统 - 小时生产登记实体
// ==========================================
// 依据: 车间数据采集规范 v1.2 - 登记记录字段全集
// 职责: 登记记录字段 + 派生字段的一致性维护
// ==========================================
// 不变式:
// - delta == daily_production - hourly_target
// - delta >= 0 时 general_cause / specific_cause 必须为空
// - available_time ∈ [0, 60]
// - downtime == max(0, hourly_target - daily_production)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 小时生产登记记录
///
/// 一条记录对应一个 (小时时段, 工单) 的登记。
/// 打开时段时创建草稿，逐字段编辑，提交后不可变（只追加、不删除，
/// 同一时段的后续提交产生新记录）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEntry {
    /// 记录 ID，格式 "{hour}-{timestamp_millis}"
    pub id: String,
    /// 小时时段标签，如 "10:00 AM - 11:00 AM"
    pub hour: String,
    /// 实际人数（未填写为 None）
    pub real_head_count: Option<u32>,
    /// 支援人数（可选）
    pub additional_head_count: Option<u32>,
    /// 计划停机名称（None 表示无停机）
    pub programmed_stop: Option<String>,
    /// 工单号（自由文本）
    pub work_order: String,
    /// 料号
    pub part_number: String,
    /// 小时目标（计算得出）
    pub hourly_target: u32,
    /// 实际产量（操作工录入，未填写为 None）
    pub daily_production: Option<u32>,
    /// 差额 = 实际产量 - 小时目标
    pub delta: i64,
    /// 停线分钟数（派生）
    pub downtime: u32,
    /// 可用时间（分钟，[0, 60]，由计划停机派生）
    pub available_time: u32,
    /// 停线大类原因（仅 delta < 0 时存在）
    pub general_cause: Option<String>,
    /// 停线细分原因（仅 delta < 0 时存在）
    pub specific_cause: Option<String>,
    /// 提交时刻
    pub registered_at: Option<NaiveDateTime>,
    /// 加班标记
    pub is_overtime: bool,
}

impl ProductionEntry {
    /// 创建指定时段的空白草稿
    ///
    /// # 参数
    /// - hour: 小时时段标签
    /// - now: 草稿创建时刻（用于生成 ID）
    pub fn new_draft(hour: &str, now: NaiveDateTime) -> Self {
        Self {
            id: format!("{}-{}", hour, now.and_utc().timestamp_millis()),
            hour: hour.to_string(),
            real_head_count: None,
            additional_head_count: None,
            programmed_stop: None,
            work_order: String::new(),
            part_number: String::new(),
            hourly_target: 0,
            daily_production: None,
            delta: 0,
            downtime: 0,
            available_time: 60,
            general_cause: None,
            specific_cause: None,
            registered_at: None,
            is_overtime: false,
        }
    }

    /// 登记是否"完整"（前序时段校验使用的口径）
    ///
    /// 完整 = 实际人数已填 + 工单非空 + 料号非空 + 实际产量已填
    pub fn is_complete(&self) -> bool {
        self.real_head_count.is_some()
            && !self.work_order.trim().is_empty()
            && !self.part_number.trim().is_empty()
            && self.daily_production.is_some()
    }

    /// 重算差额（未填写的实际产量按 0 计）
    pub fn recompute_delta(&mut self) {
        let production = i64::from(self.daily_production.unwrap_or(0));
        self.delta = production - i64::from(self.hourly_target);
    }

    /// 差额非负时清除停线原因（原因归集仅适用于欠产）
    pub fn clear_causes_if_met(&mut self) {
        if self.delta >= 0 {
            self.general_cause = None;
            self.specific_cause = None;
        }
    }

    /// 重算停线分钟数
    pub fn recompute_downtime(&mut self) {
        let production = self.daily_production.unwrap_or(0);
        self.downtime = self.hourly_target.saturating_sub(production);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> ProductionEntry {
        let now = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap();
        ProductionEntry::new_draft("6:00 AM - 7:00 AM", now)
    }

    #[test]
    fn test_draft_id_format() {
        let e = draft();
        assert!(e.id.starts_with("6:00 AM - 7:00 AM-"));
        assert_eq!(e.available_time, 60);
        assert!(!e.is_complete());
    }

    #[test]
    fn test_completeness_requires_all_four_fields() {
        let mut e = draft();
        e.real_head_count = Some(6);
        e.work_order = "WO-100".to_string();
        e.part_number = "29508".to_string();
        assert!(!e.is_complete());
        e.daily_production = Some(50);
        assert!(e.is_complete());
    }

    #[test]
    fn test_delta_and_cause_clearing() {
        let mut e = draft();
        e.hourly_target = 56;
        e.daily_production = Some(50);
        e.recompute_delta();
        assert_eq!(e.delta, -6);

        e.general_cause = Some("设备".to_string());
        e.specific_cause = Some("换模".to_string());
        e.daily_production = Some(60);
        e.recompute_delta();
        e.clear_causes_if_met();
        assert_eq!(e.delta, 4);
        assert!(e.general_cause.is_none());
        assert!(e.specific_cause.is_none());
    }

    #[test]
    fn test_downtime_never_negative() {
        let mut e = draft();
        e.hourly_target = 56;
        e.daily_production = Some(50);
        e.recompute_downtime();
        assert_eq!(e.downtime, 6);

        e.daily_production = Some(70);
        e.recompute_downtime();
        assert_eq!(e.downtime, 0);
    }
}

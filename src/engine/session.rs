// ==========================================
// 产线小时生产追踪系统 - 录入会话引擎
// ==========================================
// 职责: 持有当前时段的登记草稿,响应字段编辑,提交时定稿
// 说明: 每个会话独占自己的草稿,无共享可变状态
// ==========================================
// 字段编辑规则:
// - 料号变更: 以 T1 节拍作为临时目标(完整折算在提交时进行)
// - 目标/产量任一变更: 重算差额
// - 差额转为非负: 清除停线原因(原因归集仅适用于欠产)
// ==========================================

use crate::domain::entry::ProductionEntry;
use crate::domain::reference::ProgrammedStop;
use crate::domain::shift::Shift;
use crate::domain::types::ShiftType;
use crate::engine::catalog::ReferenceCatalog;
use crate::engine::target::TargetCalculator;
use chrono::{Datelike, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// DataEntrySession - 录入会话
// ==========================================

/// 录入会话
///
/// 打开时段时创建，提交后草稿重置为同时段的新空白草稿（新 ID）。
pub struct DataEntrySession {
    hour: String,
    draft: ProductionEntry,
    catalog: Arc<ReferenceCatalog>,
    calculator: TargetCalculator,
}

impl DataEntrySession {
    /// 打开指定时段的录入会话
    ///
    /// # 参数
    /// - hour: 小时时段标签
    /// - catalog: 基础数据目录快照
    /// - now: 注入的当前时刻（生成草稿 ID）
    pub fn open(hour: &str, catalog: Arc<ReferenceCatalog>, now: NaiveDateTime) -> Self {
        Self {
            hour: hour.to_string(),
            draft: ProductionEntry::new_draft(hour, now),
            catalog,
            calculator: TargetCalculator::new(),
        }
    }

    /// 当前时段标签
    pub fn hour(&self) -> &str {
        &self.hour
    }

    /// 当前草稿（只读）
    pub fn draft(&self) -> &ProductionEntry {
        &self.draft
    }

    // ==========================================
    // 字段编辑
    // ==========================================

    /// 设置料号
    ///
    /// 临时目标取该料号的 T1 节拍；完整折算（班次类型/良率/人数比）
    /// 在提交时进行
    pub fn set_part_number(&mut self, code: &str) {
        self.draft.part_number = code.to_string();
        self.draft.hourly_target = self.catalog.run_rate(code, ShiftType::T1);
        self.recompute_derived();
    }

    /// 设置工单号
    pub fn set_work_order(&mut self, work_order: &str) {
        self.draft.work_order = work_order.to_string();
    }

    /// 设置实际人数
    pub fn set_real_head_count(&mut self, head_count: Option<u32>) {
        self.draft.real_head_count = head_count;
    }

    /// 设置支援人数
    pub fn set_additional_head_count(&mut self, head_count: Option<u32>) {
        self.draft.additional_head_count = head_count;
    }

    /// 设置实际产量
    pub fn set_daily_production(&mut self, production: Option<u32>) {
        self.draft.daily_production = production;
        self.recompute_derived();
    }

    /// 设置计划停机（None 表示无停机）
    pub fn set_programmed_stop(&mut self, stop_name: Option<&str>) {
        self.draft.programmed_stop = stop_name.map(str::to_string);
    }

    /// 设置加班标记
    pub fn set_overtime(&mut self, is_overtime: bool) {
        self.draft.is_overtime = is_overtime;
    }

    /// 设置停线大类原因
    ///
    /// 仅在差额为负时生效；大类变更时清除细分原因
    pub fn set_general_cause(&mut self, cause: Option<&str>) {
        if self.draft.delta >= 0 {
            return;
        }
        self.draft.general_cause = cause.map(str::to_string);
        self.draft.specific_cause = None;
    }

    /// 设置停线细分原因
    ///
    /// 仅在差额为负、且细分属于当前大类时生效
    pub fn set_specific_cause(&mut self, cause: Option<&str>) {
        if self.draft.delta >= 0 {
            return;
        }
        match (&self.draft.general_cause, cause) {
            (Some(general), Some(specific)) => {
                if self
                    .catalog
                    .specific_causes_for(general)
                    .contains(&specific)
                {
                    self.draft.specific_cause = Some(specific.to_string());
                }
            }
            (_, None) => self.draft.specific_cause = None,
            (None, Some(_)) => {}
        }
    }

    // ==========================================
    // 选项查询
    // ==========================================

    /// 当日适用的计划停机选项
    pub fn stop_options(&self, now: NaiveDateTime) -> Vec<&ProgrammedStop> {
        self.catalog.stops_for_weekday(now.date().weekday())
    }

    /// 停线大类选项（仅差额为负时暴露）
    pub fn general_cause_options(&self) -> Vec<&str> {
        if self.draft.delta >= 0 {
            return Vec::new();
        }
        self.catalog.general_causes()
    }

    /// 当前大类下的细分原因选项
    pub fn specific_cause_options(&self) -> Vec<&str> {
        if self.draft.delta >= 0 {
            return Vec::new();
        }
        match &self.draft.general_cause {
            Some(general) => self.catalog.specific_causes_for(general),
            None => Vec::new(),
        }
    }

    /// 提交前是否还需要补停线原因（差额为负且大类未选）
    pub fn cause_required(&self) -> bool {
        self.draft.delta < 0 && self.draft.general_cause.is_none()
    }

    // ==========================================
    // 提交定稿
    // ==========================================

    /// 提交当前草稿，返回定稿记录并重置草稿
    ///
    /// 定稿步骤:
    /// 1. 由计划停机定稿可用时间
    /// 2. 按班次类型/良率/人数比完整折算小时目标
    /// 3. 重算差额与停线分钟数，差额非负时清除原因
    /// 4. 盖提交时刻，草稿重置为同时段新空白草稿（新 ID）
    #[instrument(skip(self, shift), fields(hour = %self.hour))]
    pub fn submit(&mut self, shift: &Shift, now: NaiveDateTime) -> ProductionEntry {
        let mut entry = self.draft.clone();

        entry.available_time = self
            .catalog
            .available_time_for_stop(entry.programmed_stop.as_deref());

        entry.hourly_target = self.calculator.hourly_target(
            &self.catalog,
            &entry.part_number,
            shift,
            entry.available_time,
            entry.real_head_count,
            now.date(),
        );

        entry.recompute_delta();
        entry.recompute_downtime();
        entry.clear_causes_if_met();
        entry.registered_at = Some(now);

        debug!(
            entry_id = %entry.id,
            hourly_target = entry.hourly_target,
            delta = entry.delta,
            downtime = entry.downtime,
            "录入会话提交定稿"
        );

        // 重置草稿: 同时段、新 ID
        self.draft = ProductionEntry::new_draft(&self.hour, now);

        entry
    }

    /// 重算派生字段（差额 + 非负清因）
    fn recompute_derived(&mut self) {
        self.draft.recompute_delta();
        self.draft.clear_causes_if_met();
    }
}

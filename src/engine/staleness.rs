// ==========================================
// 产线小时生产追踪系统 - 登记时效分级引擎
// ==========================================
// 职责: 提交时刻相对时段名义起始时刻的迟滞分级
// 说明: 纯展示/审计信号,不是正确性门槛,不阻断提交
// ==========================================

use crate::domain::types::StalenessLevel;
use crate::engine::hour_range::parse_hour_label_start;
use chrono::NaiveDateTime;

/// 时效分级阈值（分钟）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessThresholds {
    /// 及时上限（含），默认 15
    pub on_time_limit_minutes: i64,
    /// 迟登记上限（含），默认 30；超过即严重迟登记
    pub late_limit_minutes: i64,
}

impl Default for StalenessThresholds {
    fn default() -> Self {
        Self {
            on_time_limit_minutes: 15,
            late_limit_minutes: 30,
        }
    }
}

// ==========================================
// StalenessClassifier - 时效分级器
// ==========================================
pub struct StalenessClassifier {
    thresholds: StalenessThresholds,
}

impl StalenessClassifier {
    /// 创建默认阈值（15/30 分钟）的时效分级器
    pub fn new() -> Self {
        Self {
            thresholds: StalenessThresholds::default(),
        }
    }

    /// 创建自定义阈值的时效分级器（阈值由配置层下发）
    pub fn with_thresholds(thresholds: StalenessThresholds) -> Self {
        Self { thresholds }
    }

    /// 对一条登记做时效分级
    ///
    /// # 规则
    /// - 无提交时刻 → Blank（未登记/未来时段）
    /// - 加班行 → Overtime（无条件，不参与时效判定）
    /// - 其余按 (提交时刻 - 时段名义起始时刻) 的分钟差分级:
    ///   ≤15 → OnTime; 16-30 → Late; >30 → Critical
    /// - 提前提交（负分钟差）按 OnTime 处理
    /// - 时段标签无法解析 → Blank（无可用信号）
    pub fn classify(
        &self,
        registered_at: Option<NaiveDateTime>,
        hour: &str,
        is_overtime: bool,
    ) -> StalenessLevel {
        let registered_at = match registered_at {
            Some(ts) => ts,
            None => return StalenessLevel::Blank,
        };

        if is_overtime {
            return StalenessLevel::Overtime;
        }

        let slot_start = match parse_hour_label_start(hour) {
            Some(t) => t,
            None => return StalenessLevel::Blank,
        };

        // 时段起始锚定到提交当天
        let slot_start_dt = registered_at.date().and_time(slot_start);
        let elapsed_minutes = (registered_at - slot_start_dt).num_minutes();

        if elapsed_minutes <= self.thresholds.on_time_limit_minutes {
            StalenessLevel::OnTime
        } else if elapsed_minutes <= self.thresholds.late_limit_minutes {
            StalenessLevel::Late
        } else {
            StalenessLevel::Critical
        }
    }
}

impl Default for StalenessClassifier {
    fn default() -> Self {
        Self::new()
    }
}

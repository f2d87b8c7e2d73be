// ==========================================
// 产线小时生产追踪系统 - 小时目标计算引擎
// ==========================================
// 依据: 车间数据采集规范 v1.2 - 小时目标公式
// 职责: 满编目标 + 折算目标
// 公式: target = round(节拍 × 时间比 × 良率 × 人数比)
// 红线: 各因子独立相乘,只在最终结果四舍五入一次
// ==========================================

use crate::domain::shift::Shift;
use crate::engine::catalog::ReferenceCatalog;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

// ==========================================
// TargetCalculator - 小时目标计算器
// ==========================================
pub struct TargetCalculator;

impl TargetCalculator {
    /// 创建新的小时目标计算器
    pub fn new() -> Self {
        Self
    }

    /// 满编满时目标
    ///
    /// 直接取料号在该班次类型下的节拍；料号为空或未知返回 0
    pub fn full_capacity_target(
        &self,
        catalog: &ReferenceCatalog,
        part_code: &str,
        shift: &Shift,
    ) -> u32 {
        if part_code.trim().is_empty() {
            return 0;
        }
        catalog.run_rate(part_code, shift.shift_type())
    }

    /// 折算小时目标
    ///
    /// 因子:
    /// - 时间比 = 可用时间 / 60
    /// - 良率 = (today 所在 ISO 周次, 班次类型) 的良率系数
    /// - 人数比 = 实际人数 / 理论人数（理论人数为 0 时按 0 计）
    ///
    /// # 中性缺省
    /// 料号为空或实际人数为 0/未填时返回 0 —— 表示"信息不足"，
    /// 不是错误状态（人数为 0 得 0 目标，而不是除零）
    ///
    /// # 参数
    /// - available_time: 可用时间（分钟，[0, 60]）
    /// - real_head_count: 实际人数（未填为 None）
    /// - today: 注入的"当天"日期（良率按其 ISO 周次查找）
    pub fn hourly_target(
        &self,
        catalog: &ReferenceCatalog,
        part_code: &str,
        shift: &Shift,
        available_time: u32,
        real_head_count: Option<u32>,
        today: NaiveDate,
    ) -> u32 {
        let head_count = real_head_count.unwrap_or(0);
        if part_code.trim().is_empty() || head_count == 0 {
            return 0;
        }

        let shift_type = shift.shift_type();
        let run_rate = f64::from(catalog.run_rate(part_code, shift_type));
        let week_number = today.iso_week().week();
        let yield_factor = catalog.yield_factor(week_number, shift_type);
        let theoretical_hc = catalog.theoretical_headcount(shift_type);

        let time_ratio = f64::from(available_time) / 60.0;
        let head_count_ratio = if theoretical_hc > 0 {
            f64::from(head_count) / f64::from(theoretical_hc)
        } else {
            0.0
        };

        let target = (run_rate * time_ratio * yield_factor * head_count_ratio).round();

        debug!(
            part_code,
            %shift_type,
            run_rate,
            week_number,
            yield_factor,
            time_ratio,
            head_count_ratio,
            target,
            "小时目标计算"
        );

        if target <= 0.0 {
            0
        } else {
            target as u32
        }
    }
}

impl Default for TargetCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::{PartNumber, TheoreticalHeadcount, YieldFactor};
    use crate::domain::types::ShiftType;

    fn catalog_with(yield_factor: f64) -> ReferenceCatalog {
        ReferenceCatalog::from_parts(
            vec![PartNumber {
                code: "29508".to_string(),
                description: None,
                run_rate_t1: 100,
                run_rate_t2: 90,
                run_rate_t3: 80,
            }],
            vec![],
            // 2026-03-02 所在 ISO 周为第 10 周
            vec![YieldFactor {
                week_number: 10,
                shift_type: ShiftType::T1,
                factor: yield_factor,
            }],
            vec![TheoreticalHeadcount {
                shift_type: ShiftType::T1,
                head_count: 6,
            }],
            vec![],
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_zero_on_missing_part_or_headcount() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(1.0);
        let shift = Shift::new("06:00", "14:00");

        assert_eq!(calc.hourly_target(&catalog, "", &shift, 60, Some(6), today()), 0);
        assert_eq!(calc.hourly_target(&catalog, "29508", &shift, 60, None, today()), 0);
        assert_eq!(
            calc.hourly_target(&catalog, "29508", &shift, 60, Some(0), today()),
            0
        );
    }

    #[test]
    fn test_ratios_collapse_to_run_rate() {
        // 满时 + 良率 1.0 + 满编 → 目标等于节拍
        let calc = TargetCalculator::new();
        let catalog = catalog_with(1.0);
        let shift = Shift::new("06:00", "14:00");

        assert_eq!(
            calc.hourly_target(&catalog, "29508", &shift, 60, Some(6), today()),
            100
        );
    }

    #[test]
    fn test_multiplicative_factors_single_rounding() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(0.95);
        let shift = Shift::new("06:00", "14:00");

        // 100 × (45/60) × 0.95 × (5/6) = 59.375 → 59
        assert_eq!(
            calc.hourly_target(&catalog, "29508", &shift, 45, Some(5), today()),
            59
        );
    }

    #[test]
    fn test_unknown_part_yields_zero() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(1.0);
        let shift = Shift::new("06:00", "14:00");

        assert_eq!(
            calc.hourly_target(&catalog, "不存在", &shift, 60, Some(6), today()),
            0
        );
    }

    #[test]
    fn test_zero_theoretical_headcount_yields_zero() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(1.0);
        // T2 未维护理论人数 → 人数比按 0 计
        let shift = Shift::new("14:00", "22:00");

        assert_eq!(
            calc.hourly_target(&catalog, "29508", &shift, 60, Some(6), today()),
            0
        );
    }

    #[test]
    fn test_pure_function_idempotent() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(0.95);
        let shift = Shift::new("06:00", "14:00");

        let first = calc.hourly_target(&catalog, "29508", &shift, 45, Some(5), today());
        let second = calc.hourly_target(&catalog, "29508", &shift, 45, Some(5), today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_capacity_target() {
        let calc = TargetCalculator::new();
        let catalog = catalog_with(1.0);

        assert_eq!(
            calc.full_capacity_target(&catalog, "29508", &Shift::new("06:00", "14:00")),
            100
        );
        assert_eq!(
            calc.full_capacity_target(&catalog, "29508", &Shift::new("14:00", "22:00")),
            90
        );
        assert_eq!(
            calc.full_capacity_target(&catalog, "", &Shift::new("06:00", "14:00")),
            0
        );
    }
}

// ==========================================
// 产线小时生产追踪系统 - 基础数据目录快照
// ==========================================
// 职责: 引擎侧的键索引基础数据快照（O(1) 查找）
// 说明: 重复键首条生效（与历史线性扫描"先到先得"口径一致）
// ==========================================

use crate::domain::reference::{
    DowntimeCause, PartNumber, ProgrammedStop, TheoreticalHeadcount, YieldFactor,
};
use crate::domain::types::ShiftType;
use crate::repository::reference_reader::ReferenceDataReader;
use crate::repository::RepositoryResult;
use chrono::Weekday;
use std::collections::HashMap;

// ==========================================
// ReferenceCatalog - 基础数据目录
// ==========================================

/// 基础数据目录快照
///
/// 一次加载、只读使用；录入会话与目标计算都从这里取数。
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    /// 料号索引（code → 料号）
    parts: HashMap<String, PartNumber>,
    /// 计划停机索引（name → 停机）
    stops: HashMap<String, ProgrammedStop>,
    /// 停机展示顺序（目录原始顺序）
    stop_order: Vec<String>,
    /// 良率索引（(周次, 班次类型) → 系数）
    yields: HashMap<(u32, ShiftType), f64>,
    /// 理论人数索引（班次类型 → 人数）
    theoretical_hc: HashMap<ShiftType, u32>,
    /// 停线原因索引（大类 → 细分列表）
    causes: HashMap<String, Vec<String>>,
    /// 大类展示顺序
    cause_order: Vec<String>,
}

impl ReferenceCatalog {
    /// 由各目录全集构建（重复键首条生效）
    pub fn from_parts(
        parts: Vec<PartNumber>,
        stops: Vec<ProgrammedStop>,
        yields: Vec<YieldFactor>,
        headcounts: Vec<TheoreticalHeadcount>,
        causes: Vec<DowntimeCause>,
    ) -> Self {
        let mut catalog = Self::default();

        for part in parts {
            catalog.parts.entry(part.code.clone()).or_insert(part);
        }

        for stop in stops {
            if !catalog.stops.contains_key(&stop.name) {
                catalog.stop_order.push(stop.name.clone());
                catalog.stops.insert(stop.name.clone(), stop);
            }
        }

        for yf in yields {
            catalog
                .yields
                .entry((yf.week_number, yf.shift_type))
                .or_insert(yf.factor);
        }

        for hc in headcounts {
            catalog
                .theoretical_hc
                .entry(hc.shift_type)
                .or_insert(hc.head_count);
        }

        for cause in causes {
            if !catalog.causes.contains_key(&cause.general_cause) {
                catalog.cause_order.push(cause.general_cause.clone());
                catalog.causes.insert(cause.general_cause.clone(), Vec::new());
            }
            if let Some(specifics) = catalog.causes.get_mut(&cause.general_cause) {
                if !specifics.contains(&cause.specific_cause) {
                    specifics.push(cause.specific_cause);
                }
            }
        }

        catalog
    }

    /// 从基础数据读取接口加载目录快照
    pub async fn load(reader: &dyn ReferenceDataReader) -> RepositoryResult<Self> {
        let parts = reader.list_part_numbers().await?;
        let stops = reader.get_programmed_stops().await?;
        let yields = reader.list_yield_factors().await?;
        let headcounts = reader.list_theoretical_headcounts().await?;
        let causes = reader.get_downtime_causes().await?;

        Ok(Self::from_parts(parts, stops, yields, headcounts, causes))
    }

    // ==========================================
    // 查找接口
    // ==========================================

    /// 料号节拍（未知料号/空料号返回 0）
    pub fn run_rate(&self, code: &str, shift_type: ShiftType) -> u32 {
        self.parts
            .get(code)
            .map(|p| p.run_rate(shift_type))
            .unwrap_or(0)
    }

    /// 停机时长（未知停机返回 0）
    pub fn stop_duration(&self, name: &str) -> u32 {
        self.stops.get(name).map(|s| s.duration_minutes).unwrap_or(0)
    }

    /// 计划停机派生的可用时间（分钟，[0, 60]）
    ///
    /// 无停机为 60；停机超过 60 分钟时截断到 0
    pub fn available_time_for_stop(&self, stop_name: Option<&str>) -> u32 {
        match stop_name {
            Some(name) => 60u32.saturating_sub(self.stop_duration(name)),
            None => 60,
        }
    }

    /// 当日适用的计划停机选项（周六与平日分开维护）
    pub fn stops_for_weekday(&self, weekday: Weekday) -> Vec<&ProgrammedStop> {
        let is_saturday = weekday == Weekday::Sat;
        self.stop_order
            .iter()
            .filter_map(|name| self.stops.get(name))
            .filter(|s| {
                if is_saturday {
                    s.applies_saturday
                } else {
                    s.applies_weekday
                }
            })
            .collect()
    }

    /// (周次, 班次类型) 良率系数（未维护返回 1.0）
    pub fn yield_factor(&self, week_number: u32, shift_type: ShiftType) -> f64 {
        self.yields
            .get(&(week_number, shift_type))
            .copied()
            .unwrap_or(1.0)
    }

    /// 班次类型理论人数（未维护返回 0）
    pub fn theoretical_headcount(&self, shift_type: ShiftType) -> u32 {
        self.theoretical_hc.get(&shift_type).copied().unwrap_or(0)
    }

    /// 停线大类选项（目录顺序）
    pub fn general_causes(&self) -> Vec<&str> {
        self.cause_order.iter().map(String::as_str).collect()
    }

    /// 指定大类下的细分原因选项（未知大类返回空）
    pub fn specific_causes_for(&self, general_cause: &str) -> Vec<&str> {
        self.causes
            .get(general_cause)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> ReferenceCatalog {
        ReferenceCatalog::from_parts(
            vec![
                PartNumber {
                    code: "29508".to_string(),
                    description: None,
                    run_rate_t1: 56,
                    run_rate_t2: 54,
                    run_rate_t3: 50,
                },
                // 重复料号: 首条生效
                PartNumber {
                    code: "29508".to_string(),
                    description: None,
                    run_rate_t1: 99,
                    run_rate_t2: 99,
                    run_rate_t3: 99,
                },
            ],
            vec![
                ProgrammedStop {
                    name: "午餐".to_string(),
                    duration_minutes: 30,
                    applies_weekday: true,
                    applies_saturday: false,
                },
                ProgrammedStop {
                    name: "周六例会".to_string(),
                    duration_minutes: 15,
                    applies_weekday: false,
                    applies_saturday: true,
                },
            ],
            vec![YieldFactor {
                week_number: 10,
                shift_type: ShiftType::T1,
                factor: 0.95,
            }],
            vec![TheoreticalHeadcount {
                shift_type: ShiftType::T1,
                head_count: 6,
            }],
            vec![
                DowntimeCause {
                    general_cause: "设备".to_string(),
                    specific_cause: "换模".to_string(),
                },
                DowntimeCause {
                    general_cause: "设备".to_string(),
                    specific_cause: "故障停机".to_string(),
                },
                DowntimeCause {
                    general_cause: "物料".to_string(),
                    specific_cause: "缺料".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_first_match_wins_on_duplicate_part() {
        let catalog = sample_catalog();
        assert_eq!(catalog.run_rate("29508", ShiftType::T1), 56);
    }

    #[test]
    fn test_unknown_lookups_return_defaults() {
        let catalog = sample_catalog();
        assert_eq!(catalog.run_rate("不存在", ShiftType::T1), 0);
        assert_eq!(catalog.stop_duration("不存在"), 0);
        assert_eq!(catalog.yield_factor(99, ShiftType::T2), 1.0);
        assert_eq!(catalog.theoretical_headcount(ShiftType::T3), 0);
        assert!(catalog.specific_causes_for("不存在").is_empty());
    }

    #[test]
    fn test_available_time_clamped() {
        let mut catalog = sample_catalog();
        catalog.stops.insert(
            "长停机".to_string(),
            ProgrammedStop {
                name: "长停机".to_string(),
                duration_minutes: 90,
                applies_weekday: true,
                applies_saturday: true,
            },
        );
        assert_eq!(catalog.available_time_for_stop(None), 60);
        assert_eq!(catalog.available_time_for_stop(Some("午餐")), 30);
        assert_eq!(catalog.available_time_for_stop(Some("长停机")), 0);
    }

    #[test]
    fn test_saturday_stop_filtering() {
        let catalog = sample_catalog();
        let weekday_stops = catalog.stops_for_weekday(Weekday::Wed);
        assert_eq!(weekday_stops.len(), 1);
        assert_eq!(weekday_stops[0].name, "午餐");

        let saturday_stops = catalog.stops_for_weekday(Weekday::Sat);
        assert_eq!(saturday_stops.len(), 1);
        assert_eq!(saturday_stops[0].name, "周六例会");
    }

    #[test]
    fn test_cause_tree() {
        let catalog = sample_catalog();
        assert_eq!(catalog.general_causes(), vec!["设备", "物料"]);
        assert_eq!(catalog.specific_causes_for("设备"), vec!["换模", "故障停机"]);
    }
}

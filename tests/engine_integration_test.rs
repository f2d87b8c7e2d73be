// ==========================================
// 核心引擎集成测试
// ==========================================
// 测试目标: 时段生成 + 目标计算 + 校验 + 时效分级协同工作
// 覆盖范围: 标准早班端到端场景
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use production_tracking::domain::reference::{
    DowntimeCause, PartNumber, TheoreticalHeadcount, YieldFactor,
};
use production_tracking::domain::types::{ShiftType, StalenessLevel};
use production_tracking::domain::Shift;
use production_tracking::engine::{
    DataEntrySession, EntryValidator, HourRangeGenerator, ReferenceCatalog,
    StalenessClassifier,
};
use std::sync::Arc;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的基础数据目录
///
/// 料号 29508: T1 节拍 56; 良率 1.0; 理论人数 6
fn create_test_catalog() -> Arc<ReferenceCatalog> {
    Arc::new(ReferenceCatalog::from_parts(
        vec![PartNumber {
            code: "29508".to_string(),
            description: None,
            run_rate_t1: 56,
            run_rate_t2: 54,
            run_rate_t3: 50,
        }],
        vec![],
        // 2026-03-02 所在 ISO 周为第 10 周
        vec![YieldFactor {
            week_number: 10,
            shift_type: ShiftType::T1,
            factor: 1.0,
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
                general_cause: "物料".to_string(),
                specific_cause: "缺料".to_string(),
            },
        ],
    ))
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

// ==========================================
// 测试用例: 标准早班端到端场景
// ==========================================

#[test]
fn test_full_day_shift_scenario() {
    println!("\n=== 测试：标准早班 06:00-14:00 端到端 ===");

    let shift = Shift::new("06:00", "14:00");
    let generator = HourRangeGenerator::new();
    let validator = EntryValidator::new();
    let classifier = StalenessClassifier::new();
    let catalog = create_test_catalog();

    // 1. 时段生成: 8 个时段
    let hour_ranges = generator.generate(&shift);
    assert_eq!(hour_ranges.len(), 8);
    assert_eq!(hour_ranges[0], "6:00 AM - 7:00 AM");
    println!("✓ 时段生成: {} 个时段", hour_ranges.len());

    // 2. 第一个时段: 顺序校验恒通过
    let order = validator.validate_registration_order(&[], &hour_ranges[0], &hour_ranges);
    assert!(order.is_valid);

    // 3. 录入会话: 满编满时 → 目标 = 节拍 56
    let mut session = DataEntrySession::open(&hour_ranges[0], catalog.clone(), at(6, 5));
    session.set_part_number("29508");
    session.set_work_order("WO-2026-001");
    session.set_real_head_count(Some(6));
    session.set_daily_production(Some(50));

    let entry = session.submit(&shift, at(7, 5));
    assert_eq!(entry.hourly_target, 56);
    println!("✓ 目标计算: 满编满时目标 = {}", entry.hourly_target);

    // 4. 欠产派生: delta = -6, downtime = 6, 需要补原因
    assert_eq!(entry.delta, -6);
    assert_eq!(entry.downtime, 6);
    println!("✓ 欠产派生: delta={}, downtime={}", entry.delta, entry.downtime);

    // 5. 时效分级: 07:05 提交,时段起始 06:00 → 超过 30 分钟
    let staleness = classifier.classify(entry.registered_at, &entry.hour, entry.is_overtime);
    assert_eq!(staleness, StalenessLevel::Critical);
    println!("✓ 时效分级: {}", staleness);

    // 6. 顺序校验: 第 0 时段已完整 → 第 1 时段可登记
    let entries = vec![entry];
    let order = validator.validate_registration_order(&entries, &hour_ranges[1], &hour_ranges);
    assert!(order.is_valid);

    // 7. 跳段登记被拒,拒绝原因点名最早缺口
    let order = validator.validate_registration_order(&entries, &hour_ranges[3], &hour_ranges);
    assert!(!order.is_valid);
    assert!(order.message.contains(&hour_ranges[1]));
    println!("✓ 跳段拒绝: {}", order.message);

    // 8. 时间窗: 07:05 时第 2 时段(08:00 起)还未开始
    let time = validator.validate_registration_time(&hour_ranges[2], at(7, 5));
    assert!(!time.is_valid);
    println!("✓ 时间窗拒绝: {}", time.message);
}

// ==========================================
// 测试用例: 夜班跨夜时段
// ==========================================

#[test]
fn test_overnight_shift_scenario() {
    println!("\n=== 测试：夜班 22:00-06:00 跨夜 ===");

    let generator = HourRangeGenerator::new();
    let ranges = generator.generate(&Shift::new("22:00", "06:00"));

    assert_eq!(ranges.len(), 8);
    assert_eq!(ranges[0], "10:00 PM - 11:00 PM");
    assert_eq!(ranges[2], "12:00 AM - 1:00 AM");
    assert_eq!(ranges[7], "5:00 AM - 6:00 AM");
    println!("✓ 跨夜时段: {:?}", ranges);

    assert_eq!(Shift::new("22:00", "06:00").shift_type(), ShiftType::T3);
}

// ==========================================
// 测试用例: 欠产原因归集只在欠产时生效
// ==========================================

#[test]
fn test_cause_attribution_follows_delta_sign() {
    println!("\n=== 测试：差额符号驱动原因归集 ===");

    let catalog = create_test_catalog();
    let mut session = DataEntrySession::open("6:00 AM - 7:00 AM", catalog, at(6, 5));

    session.set_part_number("29508");
    session.set_real_head_count(Some(6));
    session.set_daily_production(Some(40));
    assert!(session.cause_required());

    session.set_general_cause(Some("设备"));
    session.set_specific_cause(Some("换模"));
    assert_eq!(session.draft().specific_cause.as_deref(), Some("换模"));

    // 产量追上目标 → 原因被清除,选项收起
    session.set_daily_production(Some(60));
    assert!(session.draft().general_cause.is_none());
    assert!(session.general_cause_options().is_empty());
    assert!(!session.cause_required());
    println!("✓ 差额转正后原因已清除");
}

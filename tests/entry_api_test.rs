// ==========================================
// EntryApi 集成测试
// ==========================================
// 测试目标: 会话编排 + 带校验提交 + 时段概览
// 工具: tempfile 临时数据库 + tokio 异步测试
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use production_tracking::app::AppState;
use production_tracking::domain::reference::{PartNumber, TheoreticalHeadcount, YieldFactor};
use production_tracking::domain::types::{ShiftType, StalenessLevel};
use production_tracking::domain::Shift;
use tempfile::TempDir;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建带基础数据的应用状态
fn create_test_state() -> (TempDir, AppState) {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("test.db").to_string_lossy().to_string();
    let state = AppState::new(db_path).expect("应用状态初始化失败");

    state
        .part_repo
        .upsert(&PartNumber {
            code: "29508".to_string(),
            description: None,
            run_rate_t1: 56,
            run_rate_t2: 54,
            run_rate_t3: 50,
        })
        .unwrap();

    for shift_type in [ShiftType::T1, ShiftType::T2, ShiftType::T3] {
        state
            .yield_repo
            .upsert_factor(&YieldFactor {
                week_number: 10,
                shift_type,
                factor: 1.0,
            })
            .unwrap();
        state
            .yield_repo
            .upsert_theoretical_headcount(&TheoreticalHeadcount {
                shift_type,
                head_count: 6,
            })
            .unwrap();
    }

    (dir, state)
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    // 2026-03-02 周一, ISO 第 10 周
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn day_shift() -> Shift {
    Shift::new("06:00", "14:00")
}

// ==========================================
// 测试用例
// ==========================================

#[tokio::test]
async fn test_submit_first_slot_accepted() {
    let (_dir, state) = create_test_state();
    let api = &state.entry_api;
    let shift = day_shift();

    let mut session = api.open_session("6:00 AM - 7:00 AM", at(6, 5)).await.unwrap();
    session.set_part_number("29508");
    session.set_work_order("WO-1");
    session.set_real_head_count(Some(6));
    session.set_daily_production(Some(50));

    let outcome = api.submit(&shift, &mut session, at(7, 5)).await.unwrap();
    assert!(outcome.accepted);
    assert!(outcome.validation.is_valid);
    let entry_id = outcome.entry_id.expect("入库后应返回记录 ID");

    let entries = api.list_entries(Some("6:00 AM - 7:00 AM")).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, entry_id);
    assert_eq!(entries[0].hourly_target, 56);
    assert_eq!(entries[0].delta, -6);
    assert_eq!(entries[0].downtime, 6);
    println!("✓ 首时段提交入库: {}", entry_id);
}

#[tokio::test]
async fn test_submit_rejected_when_skipping_ahead() {
    let (_dir, state) = create_test_state();
    let api = &state.entry_api;
    let shift = day_shift();

    // 未登记任何前序时段,直接提交第 3 时段
    let mut session = api.open_session("8:00 AM - 9:00 AM", at(8, 10)).await.unwrap();
    session.set_part_number("29508");
    session.set_work_order("WO-1");
    session.set_real_head_count(Some(6));
    session.set_daily_production(Some(40));

    let outcome = api.submit(&shift, &mut session, at(8, 10)).await.unwrap();
    assert!(!outcome.accepted);
    assert!(outcome.entry_id.is_none());
    assert!(outcome.validation.message.contains("6:00 AM - 7:00 AM"));

    // 被拒绝的提交不入库
    assert!(api.list_entries(None).await.unwrap().is_empty());
    println!("✓ 跳段提交被拒: {}", outcome.validation.message);
}

#[tokio::test]
async fn test_submit_rejected_for_future_slot() {
    let (_dir, state) = create_test_state();
    let api = &state.entry_api;
    let shift = day_shift();

    // 06:30 试图登记 07:00 起的时段
    let mut session = api.open_session("7:00 AM - 8:00 AM", at(6, 30)).await.unwrap();
    session.set_part_number("29508");

    // 先补齐第 0 时段,确保只触发时间窗拒绝
    let mut first = api.open_session("6:00 AM - 7:00 AM", at(6, 5)).await.unwrap();
    first.set_part_number("29508");
    first.set_work_order("WO-1");
    first.set_real_head_count(Some(6));
    first.set_daily_production(Some(50));
    assert!(api.submit(&shift, &mut first, at(6, 30)).await.unwrap().accepted);

    let outcome = api.submit(&shift, &mut session, at(6, 30)).await.unwrap();
    assert!(!outcome.accepted);
    assert!(outcome.validation.message.contains("尚未开始"));
    println!("✓ 未来时段提交被拒: {}", outcome.validation.message);
}

#[tokio::test]
async fn test_list_slots_summary() {
    let (_dir, state) = create_test_state();
    let api = &state.entry_api;
    let shift = day_shift();

    let mut session = api.open_session("6:00 AM - 7:00 AM", at(6, 5)).await.unwrap();
    session.set_part_number("29508");
    session.set_work_order("WO-1");
    session.set_real_head_count(Some(6));
    session.set_daily_production(Some(50));
    assert!(api.submit(&shift, &mut session, at(7, 10)).await.unwrap().accepted);

    let slots = api.list_slots(&shift, at(7, 30)).await.unwrap();
    assert_eq!(slots.len(), 8);

    // 第 0 时段: 已完整,07:10 提交(+70 分钟) → Critical,满编目标 56
    assert!(slots[0].is_complete);
    assert!(slots[0].is_open);
    assert_eq!(slots[0].entry_count, 1);
    assert_eq!(slots[0].staleness, StalenessLevel::Critical);
    assert_eq!(slots[0].full_capacity_target, 56);

    // 其余时段: 空白; 07:30 时第 1 时段已开放,第 2 时段未开放
    assert!(!slots[1].is_complete);
    assert!(slots[1].is_open);
    assert!(!slots[2].is_open);
    assert_eq!(slots[1].staleness, StalenessLevel::Blank);
    assert_eq!(slots[1].full_capacity_target, 0);
    println!("✓ 时段概览: {} 个时段", slots.len());
}

#[tokio::test]
async fn test_sequential_flow_through_shift() {
    let (_dir, state) = create_test_state();
    let api = &state.entry_api;
    let shift = day_shift();

    // 依次登记前三个时段,每次都应通过
    let hours = [
        ("6:00 AM - 7:00 AM", 7u32),
        ("7:00 AM - 8:00 AM", 8u32),
        ("8:00 AM - 9:00 AM", 9u32),
    ];
    for (hour, submit_hour) in hours {
        let mut session = api.open_session(hour, at(submit_hour, 0)).await.unwrap();
        session.set_part_number("29508");
        session.set_work_order("WO-1");
        session.set_real_head_count(Some(6));
        session.set_daily_production(Some(56));

        let outcome = api.submit(&shift, &mut session, at(submit_hour, 0)).await.unwrap();
        assert!(outcome.accepted, "时段 {} 应提交成功", hour);
    }

    let entries = api.list_entries(None).await.unwrap();
    assert_eq!(entries.len(), 3);
    // 产量等于目标 → 无欠产,无原因
    assert!(entries.iter().all(|e| e.delta == 0 && e.general_cause.is_none()));
    println!("✓ 顺序登记 3 个时段");
}

// ==========================================
// 产线小时生产追踪系统 - 缺省目录种子
// ==========================================
// 职责: 空库首启时写入一套可用的基础数据目录
// 说明: 批量目录导入不在本系统范围内,这里只保证开箱可用
// ==========================================

use std::error::Error;

use crate::domain::reference::{
    DowntimeCause, PartNumber, ProgrammedStop, TheoreticalHeadcount, YieldFactor,
};
use crate::domain::types::ShiftType;
use tracing::info;

use super::state::AppState;

/// 空库时写入缺省基础数据目录（料号/停机/良率/理论人数/原因树）
///
/// 已有料号数据时不做任何写入
pub fn seed_default_catalog(state: &AppState) -> Result<(), Box<dyn Error>> {
    if !state.part_repo.list_all()?.is_empty() {
        return Ok(());
    }

    info!("空库首启,写入缺省基础数据目录");

    let parts = [
        PartNumber {
            code: "29508".to_string(),
            description: Some("支架总成".to_string()),
            run_rate_t1: 56,
            run_rate_t2: 54,
            run_rate_t3: 50,
        },
        PartNumber {
            code: "29510".to_string(),
            description: Some("侧板".to_string()),
            run_rate_t1: 72,
            run_rate_t2: 70,
            run_rate_t3: 64,
        },
    ];
    for part in &parts {
        state.part_repo.upsert(part)?;
    }

    let stops = [
        ProgrammedStop {
            name: "早会".to_string(),
            duration_minutes: 10,
            applies_weekday: true,
            applies_saturday: true,
        },
        ProgrammedStop {
            name: "午餐".to_string(),
            duration_minutes: 30,
            applies_weekday: true,
            applies_saturday: false,
        },
        ProgrammedStop {
            name: "周六保养".to_string(),
            duration_minutes: 20,
            applies_weekday: false,
            applies_saturday: true,
        },
    ];
    for stop in &stops {
        state.stop_repo.upsert(stop)?;
    }

    // 1-53 周全部置 1.0,由产线按周维护实际良率
    for week_number in 1..=53u32 {
        for shift_type in [ShiftType::T1, ShiftType::T2, ShiftType::T3] {
            state.yield_repo.upsert_factor(&YieldFactor {
                week_number,
                shift_type,
                factor: 1.0,
            })?;
        }
    }

    for (shift_type, head_count) in [(ShiftType::T1, 6), (ShiftType::T2, 6), (ShiftType::T3, 5)] {
        state
            .yield_repo
            .upsert_theoretical_headcount(&TheoreticalHeadcount {
                shift_type,
                head_count,
            })?;
    }

    let causes = [
        ("设备", "换模"),
        ("设备", "故障停机"),
        ("物料", "缺料"),
        ("物料", "来料不良"),
        ("人员", "人员不足"),
        ("品质", "首件确认"),
    ];
    for (general, specific) in causes {
        state.cause_repo.insert(&DowntimeCause {
            general_cause: general.to_string(),
            specific_cause: specific.to_string(),
        })?;
    }

    info!("缺省目录写入完成");
    Ok(())
}

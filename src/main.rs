// ==========================================
// 产线小时生产追踪系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 小时目标计算 + 数据录入校验引擎
// ==========================================

use production_tracking::app::{get_default_db_path, seed_default_catalog, AppState};
use production_tracking::domain::Shift;
use production_tracking::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("产线小时生产追踪系统");
    tracing::info!("系统版本: {}", production_tracking::VERSION);
    tracing::info!("==================================================");

    // 数据库路径: 第一个命令行参数,缺省取系统数据目录
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    // 初始化应用状态
    let state = AppState::new(db_path)
        .map_err(|e| anyhow::anyhow!("无法初始化应用状态: {}", e))?;

    // 空库首启时写入缺省目录
    seed_default_catalog(&state)
        .map_err(|e| anyhow::anyhow!("缺省目录写入失败: {}", e))?;

    // 启动自检: 打印标准早班的时段清单
    let shift = Shift::new("06:00", "14:00");
    let now = chrono::Local::now().naive_local();
    let slots = state.entry_api.list_slots(&shift, now).await?;
    tracing::info!("早班 {} - {} 共 {} 个时段", shift.start_time, shift.end_time, slots.len());
    for slot in &slots {
        tracing::info!(
            "  {} | 登记 {} 条 | 完整: {} | 时效: {}",
            slot.hour,
            slot.entry_count,
            slot.is_complete,
            slot.staleness
        );
    }

    tracing::info!("初始化完成");
    Ok(())
}

// ==========================================
// 产线小时生产追踪系统 - 基础数据读取 Trait
// ==========================================
// 职责: 定义引擎所需的基础数据读取接口（不包含实现）
// 红线: 不包含写入、不包含业务逻辑
// 说明: 基础数据与登记存储是外部协作方,按异步调用建模,
//       由调用方 await;引擎本体保持纯函数
// ==========================================

use crate::domain::reference::{
    DowntimeCause, PartNumber, ProgrammedStop, TheoreticalHeadcount, YieldFactor,
};
use crate::domain::types::ShiftType;
use crate::repository::error::RepositoryResult;
use crate::repository::{
    DowntimeCauseRepository, PartNumberRepository, ProgrammedStopRepository, YieldRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// ReferenceDataReader Trait
// ==========================================
// 用途: 目标计算/录入会话所需的基础数据读取接口
// 实现者: SqliteReferenceReader（从参考表读取）
#[async_trait]
pub trait ReferenceDataReader: Send + Sync {
    /// 取料号节拍（未知料号返回 0）
    async fn get_run_rate(&self, code: &str, shift_type: ShiftType) -> RepositoryResult<u32>;

    /// 取计划停机目录
    async fn get_programmed_stops(&self) -> RepositoryResult<Vec<ProgrammedStop>>;

    /// 取 (周次, 班次类型) 良率系数（未维护返回 1.0，保持表单可用）
    async fn get_yield_factor(
        &self,
        week_number: u32,
        shift_type: ShiftType,
    ) -> RepositoryResult<f64>;

    /// 取班次类型理论人数（未维护返回 0）
    async fn get_theoretical_headcount(&self, shift_type: ShiftType) -> RepositoryResult<u32>;

    /// 取料号全集（用于目录快照构建）
    async fn list_part_numbers(&self) -> RepositoryResult<Vec<PartNumber>>;

    /// 取良率系数全集
    async fn list_yield_factors(&self) -> RepositoryResult<Vec<YieldFactor>>;

    /// 取理论人数全集（T1/T2/T3，未维护的班次类型不返回）
    async fn list_theoretical_headcounts(&self) -> RepositoryResult<Vec<TheoreticalHeadcount>>;

    /// 取停线原因目录
    async fn get_downtime_causes(&self) -> RepositoryResult<Vec<DowntimeCause>>;
}

// ==========================================
// SqliteReferenceReader - SQLite 实现
// ==========================================

/// SQLite 基础数据读取实现
///
/// 委托各参考表仓储；接口异步，内部查询同步（SQLite 本地文件）。
pub struct SqliteReferenceReader {
    part_repo: Arc<PartNumberRepository>,
    stop_repo: Arc<ProgrammedStopRepository>,
    yield_repo: Arc<YieldRepository>,
    cause_repo: Arc<DowntimeCauseRepository>,
}

impl SqliteReferenceReader {
    pub fn new(
        part_repo: Arc<PartNumberRepository>,
        stop_repo: Arc<ProgrammedStopRepository>,
        yield_repo: Arc<YieldRepository>,
        cause_repo: Arc<DowntimeCauseRepository>,
    ) -> Self {
        Self {
            part_repo,
            stop_repo,
            yield_repo,
            cause_repo,
        }
    }
}

#[async_trait]
impl ReferenceDataReader for SqliteReferenceReader {
    async fn get_run_rate(&self, code: &str, shift_type: ShiftType) -> RepositoryResult<u32> {
        let part = self.part_repo.find_by_code(code)?;
        Ok(part.map(|p| p.run_rate(shift_type)).unwrap_or(0))
    }

    async fn get_programmed_stops(&self) -> RepositoryResult<Vec<ProgrammedStop>> {
        self.stop_repo.list_all()
    }

    async fn get_yield_factor(
        &self,
        week_number: u32,
        shift_type: ShiftType,
    ) -> RepositoryResult<f64> {
        let factor = self.yield_repo.find_factor(week_number, shift_type)?;
        Ok(factor.unwrap_or(1.0))
    }

    async fn get_theoretical_headcount(&self, shift_type: ShiftType) -> RepositoryResult<u32> {
        let hc = self.yield_repo.find_theoretical_headcount(shift_type)?;
        Ok(hc.unwrap_or(0))
    }

    async fn list_part_numbers(&self) -> RepositoryResult<Vec<PartNumber>> {
        self.part_repo.list_all()
    }

    async fn list_yield_factors(&self) -> RepositoryResult<Vec<YieldFactor>> {
        self.yield_repo.list_factors()
    }

    async fn list_theoretical_headcounts(&self) -> RepositoryResult<Vec<TheoreticalHeadcount>> {
        let mut result = Vec::new();
        for shift_type in [ShiftType::T1, ShiftType::T2, ShiftType::T3] {
            if let Some(head_count) = self.yield_repo.find_theoretical_headcount(shift_type)? {
                result.push(TheoreticalHeadcount {
                    shift_type,
                    head_count,
                });
            }
        }
        Ok(result)
    }

    async fn get_downtime_causes(&self) -> RepositoryResult<Vec<DowntimeCause>> {
        self.cause_repo.list_all()
    }
}

// ==========================================
// 产线小时生产追踪系统 - 生产登记 API
// ==========================================
// 职责: 时段清单查询 + 录入会话编排 + 带校验的提交
// 说明: 基础数据与登记存储按异步外部协作方 await;
//       校验是建议性的,结果随 SubmitOutcome 返回,阻断由调用方执行
// ==========================================

use crate::domain::entry::ProductionEntry;
use crate::domain::shift::Shift;
use crate::domain::types::{StalenessLevel, ValidationResult};
use crate::engine::catalog::ReferenceCatalog;
use crate::engine::hour_range::HourRangeGenerator;
use crate::engine::session::DataEntrySession;
use crate::engine::staleness::{StalenessClassifier, StalenessThresholds};
use crate::engine::target::TargetCalculator;
use crate::engine::validator::EntryValidator;
use crate::repository::reference_reader::ReferenceDataReader;
use crate::repository::ProductionEntryRepository;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::error::{ApiError, ApiResult};

// ==========================================
// 响应类型
// ==========================================

/// 时段概览（看板一行）
#[derive(Debug, Clone, Serialize)]
pub struct SlotSummary {
    /// 小时时段标签
    pub hour: String,
    /// 该时段是否已有完整登记
    pub is_complete: bool,
    /// 时间窗是否已开放（时段起始 ≤ 当前时刻）
    pub is_open: bool,
    /// 该时段登记条数
    pub entry_count: usize,
    /// 满编满时目标（取最近一条登记的料号；无登记为 0）
    pub full_capacity_target: u32,
    /// 登记时效等级（取最近一条登记）
    pub staleness: StalenessLevel,
}

/// 提交结果
///
/// accepted=false 时 validation 携带拒绝原因；trace_id 用于追踪一次提交请求
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub accepted: bool,
    /// 入库的登记记录 ID（被拒绝时为 None）
    pub entry_id: Option<String>,
    pub trace_id: Uuid,
    pub validation: ValidationResult,
}

// ==========================================
// EntryApi - 生产登记 API
// ==========================================
pub struct EntryApi {
    reader: Arc<dyn ReferenceDataReader>,
    entry_repo: Arc<ProductionEntryRepository>,
    validator: EntryValidator,
    classifier: StalenessClassifier,
    hour_generator: HourRangeGenerator,
    calculator: TargetCalculator,
}

impl EntryApi {
    /// 创建新的 EntryApi 实例
    ///
    /// # 参数
    /// - reader: 基础数据读取接口
    /// - entry_repo: 登记存储
    /// - thresholds: 时效分级阈值（配置层下发）
    pub fn new(
        reader: Arc<dyn ReferenceDataReader>,
        entry_repo: Arc<ProductionEntryRepository>,
        thresholds: StalenessThresholds,
    ) -> Self {
        Self {
            reader,
            entry_repo,
            validator: EntryValidator::new(),
            classifier: StalenessClassifier::with_thresholds(thresholds),
            hour_generator: HourRangeGenerator::new(),
            calculator: TargetCalculator::new(),
        }
    }

    /// 加载基础数据目录快照
    pub async fn load_catalog(&self) -> ApiResult<Arc<ReferenceCatalog>> {
        let catalog = ReferenceCatalog::load(self.reader.as_ref()).await?;
        Ok(Arc::new(catalog))
    }

    /// 打开指定时段的录入会话
    pub async fn open_session(
        &self,
        hour: &str,
        now: NaiveDateTime,
    ) -> ApiResult<DataEntrySession> {
        if hour.trim().is_empty() {
            return Err(ApiError::InvalidInput("时段标签不能为空".to_string()));
        }

        let catalog = self.load_catalog().await?;
        Ok(DataEntrySession::open(hour, catalog, now))
    }

    /// 班次时段概览（看板）
    pub async fn list_slots(
        &self,
        shift: &Shift,
        now: NaiveDateTime,
    ) -> ApiResult<Vec<SlotSummary>> {
        let catalog = self.load_catalog().await?;
        let hour_ranges = self.hour_generator.generate(shift);

        let mut summaries = Vec::with_capacity(hour_ranges.len());
        for hour in hour_ranges {
            let entries = self.entry_repo.list_by_hour(&hour)?;

            // 最近一条登记（按提交时刻）
            let latest = entries
                .iter()
                .max_by_key(|e| e.registered_at);

            let staleness = match latest {
                Some(entry) => {
                    self.classifier
                        .classify(entry.registered_at, &entry.hour, entry.is_overtime)
                }
                None => StalenessLevel::Blank,
            };

            let full_capacity_target = latest
                .map(|e| self.calculator.full_capacity_target(&catalog, &e.part_number, shift))
                .unwrap_or(0);

            summaries.push(SlotSummary {
                is_complete: entries.iter().any(ProductionEntry::is_complete),
                is_open: self.validator.validate_registration_time(&hour, now).is_valid,
                entry_count: entries.len(),
                full_capacity_target,
                staleness,
                hour,
            });
        }

        Ok(summaries)
    }

    /// 提交录入会话的草稿
    ///
    /// 先做顺序完整性校验，再做时间窗校验；任一不通过则不定稿、
    /// 不入库，拒绝原因随 SubmitOutcome 返回。
    pub async fn submit(
        &self,
        shift: &Shift,
        session: &mut DataEntrySession,
        now: NaiveDateTime,
    ) -> ApiResult<SubmitOutcome> {
        let trace_id = Uuid::new_v4();
        let hour_ranges = self.hour_generator.generate(shift);
        let existing = self.entry_repo.list_all()?;

        let order_check =
            self.validator
                .validate_registration_order(&existing, session.hour(), &hour_ranges);
        if !order_check.is_valid {
            info!(%trace_id, hour = session.hour(), reason = %order_check.message, "提交被顺序校验拒绝");
            return Ok(SubmitOutcome {
                accepted: false,
                entry_id: None,
                trace_id,
                validation: order_check,
            });
        }

        let time_check = self.validator.validate_registration_time(session.hour(), now);
        if !time_check.is_valid {
            info!(%trace_id, hour = session.hour(), reason = %time_check.message, "提交被时间窗校验拒绝");
            return Ok(SubmitOutcome {
                accepted: false,
                entry_id: None,
                trace_id,
                validation: time_check,
            });
        }

        let entry = session.submit(shift, now);
        self.entry_repo.upsert(&entry)?;

        info!(
            %trace_id,
            entry_id = %entry.id,
            hour = %entry.hour,
            hourly_target = entry.hourly_target,
            delta = entry.delta,
            "登记提交入库"
        );

        Ok(SubmitOutcome {
            accepted: true,
            entry_id: Some(entry.id),
            trace_id,
            validation: ValidationResult::valid(),
        })
    }

    /// 查询登记记录（hour 为 None 时返回全部）
    pub async fn list_entries(&self, hour: Option<&str>) -> ApiResult<Vec<ProductionEntry>> {
        let entries = match hour {
            Some(h) => self.entry_repo.list_by_hour(h)?,
            None => self.entry_repo.list_all()?,
        };
        Ok(entries)
    }
}

// ==========================================
// 产线小时生产追踪系统 - 小时时段生成引擎
// ==========================================
// 职责: 班次起止时刻 → 有序、无缝、不重叠的一小时时段标签序列
// 边界: 跨夜班次（end < start）按次日结束处理; 零时长班次输出空序列
// ==========================================

use crate::domain::shift::Shift;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// 时段标签锚定用的固定参考日期
///
/// 标签只携带时刻信息，统一锚定到参考日期做算术，避免受真实日期影响
const REFERENCE_DATE_YMD: (i32, u32, u32) = (2000, 1, 1);

fn reference_date() -> NaiveDate {
    let (y, m, d) = REFERENCE_DATE_YMD;
    NaiveDate::from_ymd_opt(y, m, d).expect("固定参考日期必然合法")
}

// ==========================================
// HourRangeGenerator - 小时时段生成器
// ==========================================
pub struct HourRangeGenerator;

impl HourRangeGenerator {
    /// 创建新的小时时段生成器
    pub fn new() -> Self {
        Self
    }

    /// 生成覆盖整个班次的小时时段标签序列
    ///
    /// 标签格式: "<起始 12 小时制> - <起始+1h 12 小时制>"，如 "6:00 AM - 7:00 AM"
    ///
    /// # 边界
    /// - end < start: 跨夜班次，结束时刻按次日处理
    /// - end == start: 零时长班次，返回空序列
    /// - 起止时刻无法解析: 返回空序列
    pub fn generate(&self, shift: &Shift) -> Vec<String> {
        let (start, end) = match (shift.parse_start(), shift.parse_end()) {
            (Some(s), Some(e)) => (s, e),
            _ => return Vec::new(),
        };

        let base = reference_date();
        let mut cursor: NaiveDateTime = base.and_time(start);
        let mut end_dt: NaiveDateTime = base.and_time(end);

        // 跨夜班次: 结束时刻落在次日
        if end_dt < cursor {
            end_dt += Duration::days(1);
        }

        let mut ranges = Vec::new();
        while cursor < end_dt {
            let next = cursor + Duration::hours(1);
            ranges.push(format!(
                "{} - {}",
                format_12h(cursor.time()),
                format_12h(next.time())
            ));
            cursor = next;
        }

        ranges
    }
}

impl Default for HourRangeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 12 小时制时刻格式化（"6:00 AM" / "12:30 PM"）
fn format_12h(t: NaiveTime) -> String {
    let (is_pm, hour12) = t.hour12();
    format!(
        "{}:{:02} {}",
        hour12,
        t.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// 解析时段标签的起始时刻（显式 am/pm 文法）
///
/// 文法: "H:MM AM - H:MM PM"，取 " - " 前半段。
/// 边界: "12:xx AM" → 0 时; "12:xx PM" → 12 时。
/// 非法标签返回 None。
pub fn parse_hour_label_start(label: &str) -> Option<NaiveTime> {
    let start_part = label.split(" - ").next()?.trim();

    let mut pieces = start_part.split_whitespace();
    let clock = pieces.next()?;
    let meridiem = pieces.next()?;
    if pieces.next().is_some() {
        return None;
    }

    let mut clock_parts = clock.split(':');
    let hour: u32 = clock_parts.next()?.parse().ok()?;
    let minute: u32 = clock_parts.next()?.parse().ok()?;
    if clock_parts.next().is_some() || !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour24 = match meridiem.to_ascii_uppercase().as_str() {
        "AM" => {
            if hour == 12 {
                0 // 12am → 0 时
            } else {
                hour
            }
        }
        "PM" => {
            if hour == 12 {
                12 // 12pm 保持 12 时
            } else {
                hour + 12
            }
        }
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour24, minute, 0)
}

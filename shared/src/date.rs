//! 时间戳处理
//!
//! 服务端的时间字段可能是 ISO 字符串，也可能是秒或毫秒精度的
//! 数字纪元，这里统一换算成 Unix 毫秒再做排序和展示。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// 纪元数值小于该阈值视为秒，乘 1000 换算为毫秒
const EPOCH_SECONDS_CUTOFF: i64 = 10_000_000_000;

/// 把数字纪元统一到毫秒精度
pub fn scale_epoch_ms(n: i64) -> i64 {
    if n < EPOCH_SECONDS_CUTOFF { n * 1000 } else { n }
}

/// 解析时间字符串为 Unix 毫秒，解析失败返回 None
pub fn parse_timestamp_ms(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

/// 印尼语短月份名
const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// 渲染为印尼习惯的短日期时间，如 "11 Sep 2025 14:30"
pub fn format_datetime_id(ms: i64) -> Option<String> {
    let dt = DateTime::<Utc>::from_timestamp_millis(ms)?;
    Some(format!(
        "{:02} {} {} {:02}:{:02}",
        dt.day(),
        MONTHS_ID[dt.month0() as usize],
        dt.year(),
        dt.hour(),
        dt.minute()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_epochs_are_scaled_to_millis() {
        assert_eq!(scale_epoch_ms(1_700_000_000), 1_700_000_000_000);
        assert_eq!(scale_epoch_ms(1_700_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn parses_rfc3339() {
        let ms = parse_timestamp_ms("2025-09-11T07:30:00Z").unwrap();
        assert_eq!(format_datetime_id(ms).unwrap(), "11 Sep 2025 07:30");
    }

    #[test]
    fn parses_naive_datetime_and_bare_date() {
        assert!(parse_timestamp_ms("2025-09-11 07:30:00").is_some());
        let ms = parse_timestamp_ms("2025-09-11").unwrap();
        assert_eq!(format_datetime_id(ms).unwrap(), "11 Sep 2025 00:00");
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(parse_timestamp_ms("kemarin sore"), None);
        assert_eq!(parse_timestamp_ms(""), None);
    }
}

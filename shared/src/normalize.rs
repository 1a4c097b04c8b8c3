//! 响应形状归一化
//!
//! 服务端的字段名不是固定契约：同一个逻辑字段在不同部署里见过
//! 好几种拼法。这里把「按固定优先级尝试候选键」集中成一组纯函数，
//! 各端点的解码器复用同一套策略。
//!
//! 规则：取第一个存在且类型正确的候选键；全部落空则该字段缺失，
//! 由界面渲染为占位符。

use crate::date;
use crate::{HistoryItem, TransactionReceipt};
use serde_json::Value;

// =========================================================
// 候选键表（按优先级排列）
// =========================================================

pub const AMOUNT_KEYS: &[&str] = &["total_amount", "amount", "nominal"];
pub const TIMESTAMP_KEYS: &[&str] = &["created_on", "created_at", "created", "date", "timestamp"];
pub const INVOICE_KEYS: &[&str] = &["invoice_number", "invoice", "ref", "reference"];
pub const TYPE_KEYS: &[&str] = &["transaction_type", "type", "direction"];
pub const DESCRIPTION_KEYS: &[&str] = &["description", "note", "notes", "service_name", "title"];

// =========================================================
// 基础工具
// =========================================================

/// 宽容的 JSON 解析：解析失败就退化为空对象，后续的字段提取
/// 自然全部落空。
pub fn parse_json_lenient(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// 第一个取值为字符串的候选键
pub fn first_str(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_owned)
}

/// 第一个取值为数字的候选键
pub fn first_u64(obj: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_u64))
}

/// 第一个取值为字符串或数字的候选键，换算为 Unix 毫秒。
/// 命中了候选键但解析不出时间时字段同样视为缺失。
pub fn first_timestamp_ms(obj: &Value, keys: &[&str]) -> Option<i64> {
    let raw = keys
        .iter()
        .find_map(|k| obj.get(*k).filter(|v| v.is_string() || v.is_number()))?;
    if let Some(n) = raw.as_i64() {
        return Some(date::scale_epoch_ms(n));
    }
    raw.as_str().and_then(date::parse_timestamp_ms)
}

/// 响应体里的 `data` 对象
pub fn data_object(body: &Value) -> Option<&Value> {
    body.get("data").filter(|v| v.is_object())
}

/// 在已知位置寻找列表载荷：`data`、`records`、`data.records`、
/// `data.history`、`history`。都不是数组时返回 None。
pub fn extract_array(body: &Value) -> Option<Vec<Value>> {
    let candidates = [
        body.get("data"),
        body.get("records"),
        body.get("data").and_then(|d| d.get("records")),
        body.get("data").and_then(|d| d.get("history")),
        body.get("history"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_array().cloned())
}

/// 登录 token：`data.token`、`token`、`access_token`
pub fn extract_token(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|d| d.get("token"))
        .and_then(Value::as_str)
        .or_else(|| body.get("token").and_then(Value::as_str))
        .or_else(|| body.get("access_token").and_then(Value::as_str))
        .map(str::to_owned)
}

/// 余额：`data.balance` 或顶层 `balance`，只接受数字
pub fn extract_balance(body: &Value) -> Option<u64> {
    body.get("data")
        .and_then(|d| d.get("balance"))
        .and_then(Value::as_u64)
        .or_else(|| body.get("balance").and_then(Value::as_u64))
}

/// 服务器错误消息：`message`、`error`，或者整个响应体就是一个字符串
pub fn extract_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| body.as_str())
        .map(str::to_owned)
}

// =========================================================
// 条目归一化
// =========================================================

impl HistoryItem {
    /// 按候选键表归一化一条历史记录
    pub fn from_value(raw: &Value) -> Self {
        Self {
            invoice_number: first_str(raw, INVOICE_KEYS),
            transaction_type: first_str(raw, TYPE_KEYS),
            description: first_str(raw, DESCRIPTION_KEYS),
            total_amount: first_u64(raw, AMOUNT_KEYS),
            created_ms: first_timestamp_ms(raw, TIMESTAMP_KEYS),
        }
    }
}

impl TransactionReceipt {
    /// 回执字段优先从 `data` 对象取，顶层作为退路
    pub fn from_value(body: &Value) -> Self {
        let scope = data_object(body).unwrap_or(body);
        Self {
            invoice_number: first_str(scope, INVOICE_KEYS),
            total_amount: first_u64(scope, AMOUNT_KEYS),
            balance: scope.get("balance").and_then(Value::as_u64),
        }
    }
}

#[cfg(test)]
mod tests;

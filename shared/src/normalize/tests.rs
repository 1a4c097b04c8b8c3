use super::*;
use serde_json::json;

// =========================================================
// Candidate key priority
// =========================================================

#[test]
fn amount_prefers_total_amount_over_amount() {
    let raw = json!({ "total_amount": 7000, "amount": 5000 });
    assert_eq!(first_u64(&raw, AMOUNT_KEYS), Some(7000));
}

#[test]
fn amount_falls_back_through_the_candidate_list() {
    let raw = json!({ "amount": 5000 });
    assert_eq!(first_u64(&raw, AMOUNT_KEYS), Some(5000));
    let raw = json!({ "nominal": 2500 });
    assert_eq!(first_u64(&raw, AMOUNT_KEYS), Some(2500));
}

#[test]
fn amount_is_absent_when_no_candidate_matches() {
    let raw = json!({ "harga": 5000 });
    assert_eq!(first_u64(&raw, AMOUNT_KEYS), None);
}

#[test]
fn string_amounts_do_not_count() {
    // 只接受数字，字符串金额落到下一个候选键
    let raw = json!({ "total_amount": "5000", "amount": 4000 });
    assert_eq!(first_u64(&raw, AMOUNT_KEYS), Some(4000));
}

#[test]
fn invoice_candidates_resolve_in_order() {
    let raw = json!({ "invoice": "INV-2", "ref": "R-3" });
    assert_eq!(first_str(&raw, INVOICE_KEYS).as_deref(), Some("INV-2"));
}

#[test]
fn description_falls_back_to_service_name() {
    let raw = json!({ "service_name": "Pulsa", "title": "judul" });
    assert_eq!(first_str(&raw, DESCRIPTION_KEYS).as_deref(), Some("Pulsa"));
}

// =========================================================
// Timestamps
// =========================================================

#[test]
fn timestamp_takes_first_present_key() {
    let raw = json!({ "created_at": "2025-09-11T07:30:00Z", "date": "2020-01-01T00:00:00Z" });
    let ms = first_timestamp_ms(&raw, TIMESTAMP_KEYS).unwrap();
    assert_eq!(crate::date::format_datetime_id(ms).unwrap(), "11 Sep 2025 07:30");
}

#[test]
fn numeric_second_epoch_is_scaled() {
    let raw = json!({ "created_on": 1_700_000_000 });
    assert_eq!(
        first_timestamp_ms(&raw, TIMESTAMP_KEYS),
        Some(1_700_000_000_000)
    );
}

#[test]
fn unparseable_first_candidate_does_not_fall_through() {
    // 第一个命中的候选键解析失败时字段视为缺失，而不是继续尝试
    let raw = json!({ "created_on": "bukan tanggal", "created_at": "2025-01-01T00:00:00Z" });
    assert_eq!(first_timestamp_ms(&raw, TIMESTAMP_KEYS), None);
}

// =========================================================
// Body-level extraction
// =========================================================

#[test]
fn lenient_parse_substitutes_empty_object() {
    let body = parse_json_lenient("<html>502 Bad Gateway</html>");
    assert!(body.is_object());
    assert_eq!(extract_message(&body), None);
    let body = parse_json_lenient(r#"{"message":"ok"}"#);
    assert_eq!(extract_message(&body).as_deref(), Some("ok"));
}

#[test]
fn login_token_resolves_from_nested_data_first() {
    let body = json!({ "data": { "token": "abc123" }, "token": "shadow" });
    assert_eq!(extract_token(&body).as_deref(), Some("abc123"));
    let body = json!({ "access_token": "xyz" });
    assert_eq!(extract_token(&body).as_deref(), Some("xyz"));
    assert_eq!(extract_token(&json!({})), None);
}

#[test]
fn balance_reads_nested_then_top_level() {
    assert_eq!(extract_balance(&json!({ "data": { "balance": 50000 } })), Some(50000));
    assert_eq!(extract_balance(&json!({ "balance": 120 })), Some(120));
    assert_eq!(extract_balance(&json!({ "data": {} })), None);
}

#[test]
fn list_payload_is_searched_in_known_spots() {
    let direct = json!({ "data": [{ "a": 1 }] });
    assert_eq!(extract_array(&direct).unwrap().len(), 1);

    let nested = json!({ "data": { "records": [1, 2, 3] } });
    assert_eq!(extract_array(&nested).unwrap().len(), 3);

    let history = json!({ "data": { "history": [1] } });
    assert_eq!(extract_array(&history).unwrap().len(), 1);

    let top = json!({ "history": [1, 2] });
    assert_eq!(extract_array(&top).unwrap().len(), 2);

    assert_eq!(extract_array(&json!({ "data": { "items": [] } })), None);
}

#[test]
fn message_extraction_prefers_message_over_error() {
    let body = json!({ "message": "Saldo tidak cukup", "error": "lain" });
    assert_eq!(extract_message(&body).as_deref(), Some("Saldo tidak cukup"));
    let body = json!({ "error": "Token kadaluarsa" });
    assert_eq!(extract_message(&body).as_deref(), Some("Token kadaluarsa"));
    let body = json!("layanan sibuk");
    assert_eq!(extract_message(&body).as_deref(), Some("layanan sibuk"));
}

// =========================================================
// Item normalization
// =========================================================

#[test]
fn history_item_normalizes_mixed_shapes() {
    let raw = json!({
        "invoice": "INV-10239",
        "type": "payment",
        "note": "Listrik",
        "nominal": 1_250_000,
        "created": "2025-09-11T03:00:00Z"
    });
    let item = HistoryItem::from_value(&raw);
    assert_eq!(item.invoice_number.as_deref(), Some("INV-10239"));
    assert_eq!(item.transaction_type.as_deref(), Some("payment"));
    assert_eq!(item.description.as_deref(), Some("Listrik"));
    assert_eq!(item.total_amount, Some(1_250_000));
    assert!(item.created_ms.is_some());
}

#[test]
fn history_item_tolerates_empty_objects() {
    let item = HistoryItem::from_value(&json!({}));
    assert_eq!(item, HistoryItem::default());
}

#[test]
fn receipt_prefers_data_scope() {
    let body = json!({
        "data": { "invoice_number": "INV-1", "total_amount": 50000, "balance": 950000 }
    });
    let receipt = TransactionReceipt::from_value(&body);
    assert_eq!(receipt.invoice_number.as_deref(), Some("INV-1"));
    assert_eq!(receipt.total_amount, Some(50000));
    assert_eq!(receipt.balance, Some(950000));
}

#[test]
fn receipt_falls_back_to_top_level_fields() {
    let body = json!({ "balance": 10, "invoice_number": "X" });
    let receipt = TransactionReceipt::from_value(&body);
    assert_eq!(receipt.balance, Some(10));
    assert_eq!(receipt.invoice_number.as_deref(), Some("X"));
}

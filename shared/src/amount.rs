//! 金额输入与印尼盾格式化
//!
//! 金额一律是整数 Rupiah。输入框的每次击键都先经过
//! [`sanitize_digits`]，提交前再按各自页面的下限校验。

use crate::error::PosError;

/// 输入框允许的最大位数，超出部分直接截断
const MAX_DIGITS: usize = 12;

/// 充值下限
pub const MIN_TOP_UP: u64 = 10_000;
/// 支付下限
pub const MIN_PAYMENT: u64 = 1_000;

/// 充值与支付表单共用的快捷金额
pub const PRESETS: [u64; 6] = [10_000, 20_000, 50_000, 100_000, 200_000, 500_000];

/// 去掉所有非数字字符。该操作是幂等的：对已净化的串再净化
/// 得到同一个串。
pub fn sanitize_digits(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect()
}

/// 把净化后的数字串解析为金额，空串返回 None
pub fn parse_amount(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// 格式化为 "Rp 10.000"（点号做千分位，无小数）
pub fn format_idr(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    out.push_str("Rp ");
    let head = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - head) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// 充值金额校验（页面下限高于支付页）
pub fn validate_top_up(amount: u64) -> Result<(), PosError> {
    if amount < MIN_TOP_UP {
        return Err(PosError::validation("Minimal top up adalah Rp 10.000."));
    }
    Ok(())
}

/// 支付金额校验
pub fn validate_payment(amount: u64) -> Result<(), PosError> {
    if amount == 0 {
        return Err(PosError::validation("Nominal tidak valid."));
    }
    if amount < MIN_PAYMENT {
        return Err(PosError::validation("Minimal pembayaran Rp 1.000."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosErrorKind;

    #[test]
    fn sanitize_strips_everything_but_digits() {
        assert_eq!(sanitize_digits("Rp 10.000,-"), "10000");
        assert_eq!(sanitize_digits("abc"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_digits("1a2b3c4");
        assert_eq!(sanitize_digits(&once), once);
        assert_eq!(once, "1234");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "9".repeat(40);
        assert_eq!(sanitize_digits(&long).len(), 12);
    }

    #[test]
    fn parse_amount_handles_empty_input() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("5000"), Some(5000));
    }

    #[test]
    fn formats_idr_with_dot_separators() {
        assert_eq!(format_idr(0), "Rp 0");
        assert_eq!(format_idr(500), "Rp 500");
        assert_eq!(format_idr(10_000), "Rp 10.000");
        assert_eq!(format_idr(1_250_000), "Rp 1.250.000");
    }

    #[test]
    fn top_up_below_floor_is_rejected_client_side() {
        let err = validate_top_up(5_000).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::Validation);
        assert_eq!(err.message, "Minimal top up adalah Rp 10.000.");
        assert!(validate_top_up(10_000).is_ok());
    }

    #[test]
    fn payment_floor_is_lower_than_top_up_floor() {
        assert!(validate_payment(1_000).is_ok());
        assert!(validate_payment(999).is_err());
        assert!(validate_top_up(1_000).is_err());
    }
}

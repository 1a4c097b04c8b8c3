//! 领域错误类型
//!
//! 统一的「状态 + 消息」结构：`kind` 表达错误语义，供界面分支与
//! 测试断言使用；`message` 是面向用户的印尼语文案。所有错误都在
//! 页面内恢复为一条提示，绝不让页面崩溃。

use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosErrorKind {
    /// 客户端校验失败，阻断提交，不发起请求
    Validation,
    /// 缺少会话 token，在触网之前就被守卫拦下
    SessionExpired,
    /// 请求超过固定时限被客户端中止
    Timeout,
    /// 完全没有拿到响应（连接失败）
    Network,
    /// 服务器返回了非成功状态
    Server,
    /// 成功状态但响应里缺少预期的载荷字段
    Shape,
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PosError {
    pub kind: PosErrorKind,
    pub message: String,
}

impl PosError {
    pub fn new(kind: PosErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(PosErrorKind::Validation, message)
    }

    pub fn session_expired() -> Self {
        Self::new(
            PosErrorKind::SessionExpired,
            "Sesi login berakhir. Silakan masuk kembali.",
        )
    }

    pub fn timeout() -> Self {
        Self::new(PosErrorKind::Timeout, "Permintaan waktu habis. Coba lagi.")
    }

    pub fn network() -> Self {
        Self::new(
            PosErrorKind::Network,
            "Tidak bisa menghubungi server. Periksa koneksi Anda.",
        )
    }

    /// 服务器报错：优先采用响应体里的消息，否则用兜底文案加状态码
    pub fn server(status: u16, message: Option<String>, fallback: &str) -> Self {
        let message = message.unwrap_or_else(|| {
            format!("{} (status {}).", fallback.trim_end_matches('.'), status)
        });
        Self::new(PosErrorKind::Server, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(PosErrorKind::Shape, message)
    }
}

impl fmt::Display for PosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PosError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_distinct_from_network_message() {
        let timeout = PosError::timeout();
        let network = PosError::network();
        assert_ne!(timeout.message, network.message);
        assert_ne!(timeout.kind, network.kind);
        assert_eq!(timeout.message, "Permintaan waktu habis. Coba lagi.");
    }

    #[test]
    fn server_error_prefers_body_message() {
        let err = PosError::server(500, Some("Saldo tidak cukup".into()), "Pembayaran gagal.");
        assert_eq!(err.message, "Saldo tidak cukup");
    }

    #[test]
    fn server_error_falls_back_with_status() {
        let err = PosError::server(503, None, "Gagal memuat riwayat.");
        assert_eq!(err.message, "Gagal memuat riwayat (status 503).");
    }
}

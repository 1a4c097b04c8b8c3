//! Kasirin POS 共享领域核心
//!
//! 与平台无关的业务层：领域模型、端点协议、响应归一化、金额与
//! 分页逻辑。本 crate 不依赖任何浏览器 API，全部逻辑可在本机
//! 直接 `cargo test`。

use serde::{Deserialize, Serialize};

pub mod amount;
pub mod cache;
pub mod date;
pub mod error;
pub mod normalize;
pub mod paging;
pub mod protocol;
pub mod validate;

pub use error::{PosError, PosErrorKind};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 远程 API 根地址。唯一的配置点，端点路径见 [`protocol`] 模块。
pub const API_BASE: &str = "https://take-home-test-api.nutech-integrasi.com";

/// 客户端请求超时（毫秒），超过即中止请求
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// LocalStorage 键名。可缓存的值统一包在 [`cache::CacheEntry`] 里。
pub mod storage_keys {
    pub const AUTH_TOKEN: &str = "auth_token";
    pub const AUTH_USER: &str = "auth_user";
    pub const BALANCE: &str = "balance";
    pub const SERVICE_CATALOG: &str = "service_catalog";
    pub const BANNER_LIST: &str = "banner_list";
    pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录响应中附带的用户显示对象（任意字段都可能缺失）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    /// 拼出用于问候语的显示名，两个字段都缺失时返回 None
    pub fn display_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// 会话：不透明的 Bearer token 加可选的用户对象。
/// 没有过期时间追踪，也没有刷新逻辑，直到注销或 token 丢失为止。
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<AuthUser>,
}

impl Session {
    /// 会话守卫：缺少 token 时立即判定会话过期。
    /// 调用方保证在任何网络请求发出之前执行本检查。
    pub fn require(token: Option<&str>) -> Result<&str, PosError> {
        match token {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(PosError::session_expired()),
        }
    }
}

/// 用户资料，整页编辑后整体覆盖（最后写入者胜）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// 服务目录项。`service_tariff` 存在时该服务的金额锁定为固定资费。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub service_code: Option<String>,
    pub service_name: Option<String>,
    pub service_icon: Option<String>,
    pub service_tariff: Option<u64>,
}

/// 促销横幅，仅展示用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub banner_name: Option<String>,
    pub banner_image: Option<String>,
    pub description: Option<String>,
}

/// 交易历史条目。字段值由候选键列表归一化而来（见 [`normalize`]），
/// 没有任何候选键命中的字段保持 None，界面上渲染为 "-"。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub invoice_number: Option<String>,
    pub transaction_type: Option<String>,
    pub description: Option<String>,
    pub total_amount: Option<u64>,
    /// 解析后的创建时间（Unix 毫秒）
    pub created_ms: Option<i64>,
}

/// 充值 / 支付成功后的回执载荷
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionReceipt {
    pub invoice_number: Option<String>,
    pub total_amount: Option<u64>,
    pub balance: Option<u64>,
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let name = [first, last]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_guard_rejects_missing_token() {
        let err = Session::require(None).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::SessionExpired);
    }

    #[test]
    fn session_guard_rejects_empty_token() {
        let err = Session::require(Some("")).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::SessionExpired);
    }

    #[test]
    fn session_guard_passes_token_through() {
        assert_eq!(Session::require(Some("abc123")).unwrap(), "abc123");
    }

    #[test]
    fn display_name_skips_missing_parts() {
        let user = AuthUser {
            first_name: Some("Budi".into()),
            last_name: None,
            email: None,
        };
        assert_eq!(user.display_name().as_deref(), Some("Budi"));
        assert_eq!(AuthUser::default().display_name(), None);
    }
}

//! API endpoint protocol.
//!
//! Every remote endpoint is declared exactly once: path, method, auth
//! requirement, a canned fallback message, and a decoder that lifts the
//! defensively-parsed JSON body into its typed payload. Paths are explicit
//! configuration; there is no multi-endpoint fallback guessing.

use crate::error::PosError;
use crate::normalize;
use crate::{AuthUser, Banner, HistoryItem, Profile, ServiceItem, Session, TransactionReceipt};
use serde::Serialize;
use serde_json::Value;

/// HTTP methods used by the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// A trait that binds a request payload to its endpoint metadata and
/// response decoding policy.
pub trait ApiRequest: Serialize {
    /// The decoded payload type.
    type Response;
    /// The URL path relative to the API base.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries the Bearer token. Requests on
    /// authenticated endpoints fail before any I/O when no token is held.
    const REQUIRES_AUTH: bool = true;
    /// Canned message used when the server gives none.
    const FALLBACK_MESSAGE: &'static str;

    /// Query string pairs appended to the path (GET endpoints only).
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Decode the expected payload out of the parsed body. A success
    /// status whose body lacks the expected payload is a failure.
    fn decode(body: &Value) -> Result<Self::Response, PosError>;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = Session;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
    const FALLBACK_MESSAGE: &'static str = "Username atau password salah.";

    fn decode(body: &Value) -> Result<Session, PosError> {
        let token = normalize::extract_token(body).ok_or_else(|| {
            PosError::shape("Login berhasil, tapi token tidak ditemukan di respons.")
        })?;
        let user = normalize::data_object(body)
            .and_then(|d| d.get("user"))
            .and_then(|u| serde_json::from_value::<AuthUser>(u.clone()).ok());
        Ok(Session { token, user })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl ApiRequest for RegistrationRequest {
    type Response = ();
    const PATH: &'static str = "/registration";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
    const FALLBACK_MESSAGE: &'static str = "Registrasi gagal. Periksa kembali data Anda.";

    fn decode(_body: &Value) -> Result<(), PosError> {
        Ok(())
    }
}

// =========================================================
// Profile
// =========================================================

#[derive(Debug, Serialize)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Response = Profile;
    const PATH: &'static str = "/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = "Gagal memuat profil.";

    fn decode(body: &Value) -> Result<Profile, PosError> {
        profile_from_body(body, Self::FALLBACK_MESSAGE)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = Profile;
    const PATH: &'static str = "/profile/update";
    const METHOD: HttpMethod = HttpMethod::Put;
    const FALLBACK_MESSAGE: &'static str = "Gagal memperbarui profil.";

    fn decode(body: &Value) -> Result<Profile, PosError> {
        profile_from_body(body, Self::FALLBACK_MESSAGE)
    }
}

/// The avatar upload is multipart, not JSON, so it lives outside the
/// [`ApiRequest`] machinery; the client special-cases it with these consts.
pub const PROFILE_IMAGE_PATH: &str = "/profile/image";
pub const PROFILE_IMAGE_FALLBACK: &str = "Gagal memperbarui gambar.";

/// Shared decoder for every endpoint that answers with a profile object.
pub fn profile_from_body(body: &Value, fallback: &'static str) -> Result<Profile, PosError> {
    let data = normalize::data_object(body).ok_or_else(|| PosError::shape(fallback))?;
    Ok(serde_json::from_value(data.clone()).unwrap_or_default())
}

// =========================================================
// Balance / top up
// =========================================================

#[derive(Debug, Serialize)]
pub struct GetBalance;

impl ApiRequest for GetBalance {
    type Response = u64;
    const PATH: &'static str = "/balance";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = "Gagal memuat saldo.";

    fn decode(body: &Value) -> Result<u64, PosError> {
        normalize::extract_balance(body).ok_or_else(|| PosError::shape(Self::FALLBACK_MESSAGE))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopUpRequest {
    pub top_up_amount: u64,
}

impl ApiRequest for TopUpRequest {
    type Response = TransactionReceipt;
    const PATH: &'static str = "/topup";
    const METHOD: HttpMethod = HttpMethod::Post;
    const FALLBACK_MESSAGE: &'static str = "Top up gagal. Coba beberapa saat lagi.";

    fn decode(body: &Value) -> Result<TransactionReceipt, PosError> {
        let receipt = TransactionReceipt::from_value(body);
        // 充值的预期载荷是新的余额，缺失即视为失败
        if receipt.balance.is_none() {
            return Err(PosError::shape(Self::FALLBACK_MESSAGE));
        }
        Ok(receipt)
    }
}

// =========================================================
// Catalog / banners
// =========================================================

#[derive(Debug, Serialize)]
pub struct GetServices;

impl ApiRequest for GetServices {
    type Response = Vec<ServiceItem>;
    const PATH: &'static str = "/service";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = "Data layanan tidak ditemukan.";

    fn decode(body: &Value) -> Result<Vec<ServiceItem>, PosError> {
        let raw = normalize::extract_array(body)
            .ok_or_else(|| PosError::shape(Self::FALLBACK_MESSAGE))?;
        Ok(raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }
}

#[derive(Debug, Serialize)]
pub struct GetBanners;

impl ApiRequest for GetBanners {
    type Response = Vec<Banner>;
    const PATH: &'static str = "/banner";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = "Gagal memuat banner.";

    fn decode(body: &Value) -> Result<Vec<Banner>, PosError> {
        let raw = normalize::extract_array(body)
            .ok_or_else(|| PosError::shape(Self::FALLBACK_MESSAGE))?;
        Ok(raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }
}

// =========================================================
// Transactions
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub service_code: String,
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tariff: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_no: Option<String>,
}

impl ApiRequest for TransactionRequest {
    type Response = TransactionReceipt;
    const PATH: &'static str = "/transaction";
    const METHOD: HttpMethod = HttpMethod::Post;
    const FALLBACK_MESSAGE: &'static str = "Pembayaran gagal.";

    fn decode(body: &Value) -> Result<TransactionReceipt, PosError> {
        // 回执字段都是展示用的，缺了哪个都不算失败
        Ok(TransactionReceipt::from_value(body))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest {
    pub offset: u32,
    pub limit: u32,
}

impl ApiRequest for HistoryRequest {
    type Response = Vec<HistoryItem>;
    const PATH: &'static str = "/transaction/history";
    const METHOD: HttpMethod = HttpMethod::Get;
    const FALLBACK_MESSAGE: &'static str = "Gagal memuat riwayat.";

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }

    fn decode(body: &Value) -> Result<Vec<HistoryItem>, PosError> {
        // 历史端点对缺失的列表宽容处理：当成空页
        let raw = normalize::extract_array(body).unwrap_or_default();
        Ok(raw.iter().map(HistoryItem::from_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PosErrorKind;
    use serde_json::json;

    #[test]
    fn login_decodes_nested_token() {
        let body = json!({ "data": { "token": "abc123" } });
        let session = LoginRequest::decode(&body).unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.user, None);
    }

    #[test]
    fn login_picks_up_the_optional_user_object() {
        let body = json!({
            "data": { "token": "abc123", "user": { "first_name": "Budi", "last_name": "Santoso" } }
        });
        let session = LoginRequest::decode(&body).unwrap();
        let user = session.user.unwrap();
        assert_eq!(user.display_name().as_deref(), Some("Budi Santoso"));
    }

    #[test]
    fn login_without_token_is_a_shape_error() {
        let err = LoginRequest::decode(&json!({ "data": {} })).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::Shape);
    }

    #[test]
    fn login_serializes_the_documented_payload() {
        let req = LoginRequest {
            email: "user@test.com".into(),
            password: "secret1".into(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({ "email": "user@test.com", "password": "secret1" }));
    }

    #[test]
    fn balance_decode_requires_a_numeric_balance() {
        assert_eq!(GetBalance::decode(&json!({ "data": { "balance": 75000 } })).unwrap(), 75000);
        let err = GetBalance::decode(&json!({ "data": { "balance": "75000" } })).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::Shape);
    }

    #[test]
    fn top_up_without_new_balance_is_a_failure() {
        let err = TopUpRequest::decode(&json!({ "data": {} })).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::Shape);
        let ok = TopUpRequest::decode(&json!({ "data": { "balance": 110000 } })).unwrap();
        assert_eq!(ok.balance, Some(110000));
    }

    #[test]
    fn top_up_serializes_the_documented_field_name() {
        let body = serde_json::to_value(TopUpRequest { top_up_amount: 50000 }).unwrap();
        assert_eq!(body, json!({ "top_up_amount": 50000 }));
    }

    #[test]
    fn services_decode_rejects_bodies_without_a_list() {
        let err = GetServices::decode(&json!({ "data": "bukan list" })).unwrap_err();
        assert_eq!(err.kind, PosErrorKind::Shape);
        let list = GetServices::decode(&json!({ "data": [
            { "service_code": "PLN", "service_name": "Listrik", "service_tariff": 10000 }
        ] }))
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].service_tariff, Some(10000));
    }

    #[test]
    fn history_decode_treats_missing_list_as_empty_page() {
        assert!(HistoryRequest::decode(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn history_query_carries_limit_and_offset() {
        let req = HistoryRequest { offset: 5, limit: 5 };
        assert_eq!(
            req.query(),
            vec![("limit", "5".to_string()), ("offset", "5".to_string())]
        );
    }

    #[test]
    fn transaction_payload_skips_absent_optionals() {
        let req = TransactionRequest {
            service_code: "PLN".into(),
            amount: 10000,
            service_tariff: None,
            customer_no: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({ "service_code": "PLN", "amount": 10000 }));
    }
}

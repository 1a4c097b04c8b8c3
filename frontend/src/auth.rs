//! 认证状态管理
//!
//! token 与用户对象持久化在 LocalStorage，认证状态经 Context 信号
//! 共享；路由服务注入认证信号，会话过期的跳转在一处统一处理。

use crate::api::KasirinApi;
use gloo_storage::{LocalStorage, Storage};
use kasirin_shared::protocol::{LoginRequest, RegistrationRequest};
use kasirin_shared::{AuthUser, PosError, storage_keys, validate};
use leptos::prelude::*;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 已认证时的 API 客户端
    pub api: Option<KasirinApi>,
    /// 登录响应附带的用户显示对象
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
}

/// 认证上下文，经 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证状态信号，注入给路由服务做守卫
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时从 LocalStorage 恢复会话
pub fn init_auth(ctx: &AuthContext) {
    let token: Option<String> = LocalStorage::get(storage_keys::AUTH_TOKEN).ok();
    let user: Option<AuthUser> = LocalStorage::get(storage_keys::AUTH_USER).ok();
    if let Some(token) = token {
        ctx.set_state.update(|state| {
            state.api = Some(KasirinApi::with_token(token));
            state.user = user;
            state.is_authenticated = true;
        });
    }
}

/// 登录：客户端校验、请求、持久化、发布状态。
/// 成功后的跳转由路由服务监听认证信号自动完成。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), PosError> {
    validate::validate_login(&email, &password)?;

    let session = KasirinApi::anonymous()
        .execute(&LoginRequest { email, password })
        .await?;

    let _ = LocalStorage::set(storage_keys::AUTH_TOKEN, &session.token);
    if let Some(user) = &session.user {
        let _ = LocalStorage::set(storage_keys::AUTH_USER, user);
    }

    ctx.set_state.update(|state| {
        state.api = Some(KasirinApi::with_token(session.token.clone()));
        state.user = session.user.clone();
        state.is_authenticated = true;
    });
    Ok(())
}

/// 注册新账号。字段在提交前去掉首尾空白。
pub async fn register(
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<(), PosError> {
    validate::validate_registration(&first_name, &last_name, &email, &password)?;

    KasirinApi::anonymous()
        .execute(&RegistrationRequest {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            password,
        })
        .await
}

/// 注销：清掉会话与所有数据缓存（侧边栏折叠偏好保留）。
/// 跳转同样交给路由服务处理。
pub fn logout(ctx: &AuthContext) {
    for key in [
        storage_keys::AUTH_TOKEN,
        storage_keys::AUTH_USER,
        storage_keys::BALANCE,
        storage_keys::SERVICE_CATALOG,
        storage_keys::BANNER_LIST,
    ] {
        LocalStorage::delete(key);
    }
    ctx.set_state.update(|state| {
        state.api = None;
        state.user = None;
        state.is_authenticated = false;
    });
}

//! Kasirin POS 前端应用
//!
//! Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，统一认证守卫）
//! - `auth`: 认证状态管理
//! - `store`: 跨页面共享的数据存储（余额 / 资料 / 服务目录）
//! - `api`: 统一的请求生命周期
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    pub mod edit_profile;
    pub mod history;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod payment;
    pub mod register;
    pub mod topup;
}
mod store;

pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::edit_profile::EditProfilePage;
use crate::components::history::HistoryPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::payment::PaymentPage;
use crate::components::register::RegisterPage;
use crate::components::topup::TopUpPage;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 私有页面统一套上外壳（侧边栏 + 顶栏）
fn with_shell(inner: AnyView) -> AnyView {
    view! { <AppShell>{inner}</AppShell> }.into_any()
}

/// 路由匹配函数：根据 AppRoute 返回对应的视图
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => with_shell(view! { <DashboardPage /> }.into_any()),
        AppRoute::TopUp => with_shell(view! { <TopUpPage /> }.into_any()),
        AppRoute::Payment => with_shell(view! { <PaymentPage /> }.into_any()),
        AppRoute::History => with_shell(view! { <HistoryPage /> }.into_any()),
        AppRoute::Profile => with_shell(view! { <EditProfilePage /> }.into_any()),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Halaman tidak ditemukan"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 2. 共享存储：余额 / 资料 / 服务目录（含缓存恢复）
    store::provide_stores();

    // 3. 认证信号注入路由服务，守卫集中在一处
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

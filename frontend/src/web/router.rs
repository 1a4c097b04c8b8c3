//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，所有对 window.history 的操作都集中在此。
//! 认证守卫只在这里评估一次：导航、popstate、认证状态变化三个
//! 入口共用同一个 [`resolve_target`]，各页面不再自带跳转逻辑。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 用于重定向，不在历史里留下被拦截的页面
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 守卫决策：目标路由按认证状态解析成实际加载的路由。
/// 返回 `(route, redirected)`，redirected 为 true 时应使用 replace。
fn resolve_target(target: AppRoute, is_auth: bool) -> (AppRoute, bool) {
    if target.requires_auth() && !is_auth {
        return (AppRoute::auth_failure_redirect(), true);
    }
    if target.should_redirect_when_authenticated() && is_auth {
        return (AppRoute::auth_success_redirect(), true);
    }
    (target, false)
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；认证检查信号由外部注入，与认证系统
/// 解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航入口：请求 -> 守卫 -> 写 History -> 更新信号
    pub fn navigate(&self, route: AppRoute) {
        let is_auth = self.is_authenticated.get_untracked();
        let (resolved, redirected) = resolve_target(route, is_auth);
        if redirected {
            web_sys::console::log_1(
                &format!("[Router] {} blocked, redirecting to {}", route, resolved).into(),
            );
            replace_history_state(resolved.to_path());
        } else {
            push_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 浏览器前进 / 后退也要过守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let (resolved, redirected) =
                resolve_target(target, is_authenticated.get_untracked());
            if redirected {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向：登录后离开登录页，注销后离开
    /// 受保护页面。页面组件不各自处理跳转。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let (resolved, redirected) = resolve_target(route, is_auth);
            if redirected {
                web_sys::console::log_1(
                    &format!("[Router] auth changed, redirecting to {}", resolved).into(),
                );
                push_history_state(resolved.to_path());
                set_route.set(resolved);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口：根据当前路由状态渲染对应的视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击走路由服务，href 保留给右键和中键
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() on:click=on_click>
            {children()}
        </a>
    }
}

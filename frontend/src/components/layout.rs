//! 私有页面的外壳：侧边栏 + 顶栏
//!
//! 侧边栏折叠状态持久化在 LocalStorage，刷新后保持。

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::store::use_stores;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use gloo_storage::{LocalStorage, Storage};
use kasirin_shared::storage_keys;
use leptos::prelude::*;

#[component]
fn NavItem(
    to: AppRoute,
    label: &'static str,
    collapsed: ReadSignal<bool>,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let is_active = move || router.current_route().get() == to;

    view! {
        <li>
            <a
                class=move || if is_active() { "active" } else { "" }
                on:click=move |_| router.navigate(to)
            >
                {children()}
                <Show when=move || !collapsed.get()>
                    <span>{label}</span>
                </Show>
            </a>
        </li>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let stores = use_stores();

    let (collapsed, set_collapsed) = signal(
        LocalStorage::get::<bool>(storage_keys::SIDEBAR_COLLAPSED).unwrap_or(false),
    );
    let toggle_collapse = move |_| {
        let next = !collapsed.get_untracked();
        let _ = LocalStorage::set(storage_keys::SIDEBAR_COLLAPSED, &next);
        set_collapsed.set(next);
    };

    // 顶栏头像用资料的首字母，资料没来得及加载时退回登录响应里的用户对象
    let initial = move || {
        stores
            .profile
            .profile
            .get()
            .and_then(|p| p.first_name)
            .or_else(|| auth.state.get().user.and_then(|u| u.first_name))
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    };

    let on_logout = move |_| {
        // 跳转交给路由服务的认证监听
        logout(&auth);
    };

    view! {
        <div class="min-h-screen bg-base-200 flex">
            <aside class=move || {
                if collapsed.get() {
                    "bg-base-100 border-r border-base-300 w-16 transition-all"
                } else {
                    "bg-base-100 border-r border-base-300 w-56 transition-all"
                }
            }>
                <div class="flex items-center gap-2 p-4">
                    <StoreLogo attr:class="h-6 w-6 text-primary shrink-0" />
                    <Show when=move || !collapsed.get()>
                        <span class="font-bold text-lg">"Kasirin POS"</span>
                    </Show>
                </div>
                <ul class="menu px-2 gap-1">
                    <NavItem to=AppRoute::Dashboard label="Dashboard" collapsed=collapsed>
                        <StoreLogo attr:class="h-5 w-5" />
                    </NavItem>
                    <NavItem to=AppRoute::TopUp label="Top Up" collapsed=collapsed>
                        <PlusCircle attr:class="h-5 w-5" />
                    </NavItem>
                    <NavItem to=AppRoute::Payment label="Pembayaran" collapsed=collapsed>
                        <CreditCard attr:class="h-5 w-5" />
                    </NavItem>
                    <NavItem to=AppRoute::History label="Riwayat" collapsed=collapsed>
                        <Clock attr:class="h-5 w-5" />
                    </NavItem>
                    <NavItem to=AppRoute::Profile label="Profile Settings" collapsed=collapsed>
                        <UserRound attr:class="h-5 w-5" />
                    </NavItem>
                </ul>
                <div class="px-2 mt-2">
                    <button on:click=toggle_collapse class="btn btn-ghost btn-sm w-full justify-start gap-2">
                        <ChevronsLeft attr:class=move || {
                            if collapsed.get() { "h-4 w-4 rotate-180" } else { "h-4 w-4" }
                        } />
                        <Show when=move || !collapsed.get()>
                            <span>"Ciutkan"</span>
                        </Show>
                    </button>
                </div>
            </aside>

            <main class="flex-1 min-w-0">
                <header class="navbar bg-base-100 border-b border-base-300 sticky top-0 z-30 px-4">
                    <div class="flex-1">
                        <button on:click=toggle_collapse class="btn btn-ghost btn-square md:hidden">
                            <Menu attr:class="h-5 w-5" />
                        </button>
                    </div>
                    <div class="flex-none gap-2">
                        <button
                            on:click=move |_| router.navigate(AppRoute::TopUp)
                            class="btn btn-sm btn-outline hidden sm:inline-flex gap-1"
                        >
                            <PlusCircle attr:class="h-4 w-4" /> "Top Up"
                        </button>
                        <button on:click=on_logout class="btn btn-sm btn-outline btn-error gap-1">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                        <div class="avatar placeholder">
                            <div class="bg-neutral text-neutral-content w-9 rounded-xl">
                                <span>{initial}</span>
                            </div>
                        </div>
                    </div>
                </header>
                <div class="p-4 sm:p-6">{children()}</div>
            </main>
        </div>
    }
}

use crate::auth::use_auth;
use crate::components::icons::{Eye, EyeOff, RefreshCw, Wallet};
use crate::store::use_stores;
use kasirin_shared::amount::format_idr;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let stores = use_stores();
    let balance = stores.balance;
    let profile = stores.profile;
    let catalog = stores.catalog;

    let (show_balance, set_show_balance) = signal(false);

    // 初始加载：资料与余额各自独立，横幅与服务目录按顺序拉取。
    // 存储自带合并守卫，重复进入不会叠加请求。
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_authenticated {
            return;
        }
        let Some(api) = state.api else { return };
        {
            let api = api.clone();
            spawn_local(async move { profile.refresh(&api).await });
        }
        {
            let api = api.clone();
            spawn_local(async move { balance.refresh(&api).await });
        }
        spawn_local(async move {
            catalog.refresh_banners(&api).await;
            catalog.refresh_services(&api).await;
        });
    });

    let greeting = move || {
        profile
            .profile
            .get()
            .and_then(|p| p.display_name())
            .or_else(|| auth.state.get().user.and_then(|u| u.display_name()))
            .unwrap_or_else(|| "Guest".to_string())
    };

    let balance_text = move || match balance.value.get() {
        Some(value) if show_balance.get() => format_idr(value),
        Some(_) => "Rp ••••••".to_string(),
        None => "-".to_string(),
    };

    let refresh_balance = move |_| {
        if let Some(api) = auth.state.get_untracked().api {
            spawn_local(async move { balance.refresh(&api).await });
        }
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Selamat Datang, " {greeting}</h1>
                <p class="text-sm text-base-content/60">"Ringkasan akun Anda hari ini"</p>
            </div>

            // 余额卡片
            <div class="card bg-primary text-primary-content shadow-xl">
                <div class="card-body flex-row items-center justify-between py-5">
                    <div>
                        <div class="flex items-center gap-2">
                            <Wallet attr:class="h-5 w-5" />
                            <span class="text-sm opacity-80">"Saldo Anda"</span>
                        </div>
                        <div class="text-3xl font-bold mt-1">{balance_text}</div>
                        <Show when=move || balance.error.get().is_some()>
                            <p class="text-xs mt-1 opacity-80">
                                {move || balance.error.get().unwrap_or_default()}
                            </p>
                        </Show>
                    </div>
                    <div class="flex gap-1">
                        <button
                            on:click=move |_| set_show_balance.update(|s| *s = !*s)
                            class="btn btn-ghost btn-circle btn-sm"
                        >
                            <Show
                                when=move || show_balance.get()
                                fallback=|| view! { <Eye attr:class="h-4 w-4" /> }
                            >
                                <EyeOff attr:class="h-4 w-4" />
                            </Show>
                        </button>
                        <button
                            on:click=refresh_balance
                            disabled=move || balance.loading.get()
                            class="btn btn-ghost btn-circle btn-sm"
                        >
                            <RefreshCw attr:class=move || {
                                if balance.loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                            } />
                        </button>
                    </div>
                </div>
            </div>

            // 横幅
            <Show when=move || !catalog.banners.get().is_empty()>
                <div class="flex gap-4 overflow-x-auto pb-1">
                    <For
                        each={move || catalog.banners.get().into_iter().enumerate().collect::<Vec<_>>()}
                        key=|(i, b)| format!("{}-{i}", b.banner_name.clone().unwrap_or_default())
                        children=move |(_, banner)| {
                            view! {
                                <div class="card bg-base-100 shadow min-w-64">
                                    {banner.banner_image.clone().map(|src| view! {
                                        <figure><img src=src alt="banner" class="h-28 w-full object-cover" /></figure>
                                    })}
                                    <div class="card-body py-3 px-4">
                                        <span class="font-semibold text-sm">
                                            {banner.banner_name.clone().unwrap_or_else(|| "-".into())}
                                        </span>
                                        {banner.description.clone().map(|d| view! {
                                            <p class="text-xs text-base-content/60">{d}</p>
                                        })}
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            // 服务目录
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title text-base">"Layanan"</h3>
                    <Show when=move || catalog.notice.get().is_some()>
                        <div class="alert alert-warning text-sm py-2">
                            <span>{move || catalog.notice.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <Show
                        when=move || !catalog.services.get().is_empty()
                        fallback=move || view! {
                            <p class="text-sm text-base-content/50 py-4 text-center">
                                {move || if catalog.loading.get() { "Memuat…" } else { "Belum ada layanan." }}
                            </p>
                        }
                    >
                        <div class="grid grid-cols-3 sm:grid-cols-4 lg:grid-cols-6 gap-3">
                            <For
                                each={move || catalog.services.get().into_iter().enumerate().collect::<Vec<_>>()}
                                key=|(i, s)| format!("{}-{i}", s.service_code.clone().unwrap_or_default())
                                children=move |(_, service)| {
                                    let name = service
                                        .service_name
                                        .clone()
                                        .or_else(|| service.service_code.clone())
                                        .unwrap_or_else(|| "-".into());
                                    view! {
                                        <div class="flex flex-col items-center gap-2 p-3 rounded-xl hover:bg-base-200 transition">
                                            {match service.service_icon.clone() {
                                                Some(src) => view! {
                                                    <img src=src alt="" class="w-10 h-10 object-contain" />
                                                }.into_any(),
                                                None => view! {
                                                    <div class="w-10 h-10 rounded-xl bg-base-300 flex items-center justify-center font-semibold">
                                                        {name.chars().next().map(|c| c.to_string()).unwrap_or_default()}
                                                    </div>
                                                }.into_any(),
                                            }}
                                            <span class="text-xs text-center">{name.clone()}</span>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

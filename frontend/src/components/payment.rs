use crate::auth::use_auth;
use crate::components::icons::RefreshCw;
use crate::store::use_stores;
use kasirin_shared::amount::{PRESETS, format_idr, parse_amount, sanitize_digits, validate_payment};
use kasirin_shared::error::PosError;
use kasirin_shared::protocol::TransactionRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn PaymentPage() -> impl IntoView {
    let auth = use_auth();
    let stores = use_stores();
    let catalog = stores.catalog;

    let (service_code, set_service_code) = signal(String::new());
    let (customer_ref, set_customer_ref) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (loading_pay, set_loading_pay) = signal(false);
    let (api_error, set_api_error) = signal(Option::<String>::None);
    let (toast, set_toast) = signal(Option::<String>::None);

    // 进入页面拉取服务目录；缓存命中的内容已经在渲染了
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_authenticated {
            return;
        }
        if let Some(api) = state.api {
            spawn_local(async move { catalog.refresh_services(&api).await });
        }
    });

    let selected = Signal::derive(move || {
        let code = service_code.get();
        if code.is_empty() {
            return None;
        }
        catalog
            .services
            .get()
            .into_iter()
            .find(|s| s.service_code.as_deref() == Some(code.as_str()))
    });

    // 资费锁定：服务自带固定资费时金额跟随资费，禁用手动输入
    let amount_locked = move || selected.get().and_then(|s| s.service_tariff).is_some();
    Effect::new(move |_| {
        match selected.get() {
            Some(service) => {
                if let Some(tariff) = service.service_tariff {
                    set_amount.set(tariff.to_string());
                }
            }
            None => set_amount.set(String::new()),
        }
    });

    let parsed = move || parse_amount(&amount.get()).unwrap_or(0);
    let can_submit =
        move || !service_code.get().is_empty() && parsed() > 0 && !loading_pay.get();

    let refresh_services = move |_| {
        if let Some(api) = auth.state.get_untracked().api {
            spawn_local(async move { catalog.refresh_services(&api).await });
        }
    };

    let on_change_amount = move |ev| {
        set_api_error.set(None);
        set_amount.set(sanitize_digits(&event_target_value(&ev)));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        let value = parsed();
        if let Err(err) = validate_payment(value) {
            set_api_error.set(Some(err.to_string()));
            return;
        }
        let Some(api) = auth.state.get_untracked().api else {
            set_api_error.set(Some(PosError::session_expired().to_string()));
            return;
        };

        let customer = customer_ref.get_untracked().trim().to_string();
        let request = TransactionRequest {
            service_code: service_code.get_untracked(),
            amount: value,
            service_tariff: selected.get_untracked().and_then(|s| s.service_tariff),
            customer_no: if customer.is_empty() { None } else { Some(customer) },
        };

        set_loading_pay.set(true);
        set_api_error.set(None);
        spawn_local(async move {
            match api.execute(&request).await {
                Ok(receipt) => {
                    if let Some(balance) = receipt.balance {
                        stores.balance.apply(balance);
                    }
                    let mut message = "Pembayaran berhasil".to_string();
                    if let Some(total) = receipt.total_amount {
                        message.push_str(&format!(": {}", format_idr(total)));
                    }
                    if let Some(invoice) = &receipt.invoice_number {
                        message.push_str(&format!(" (Invoice {invoice})"));
                    }
                    message.push_str(" 🎉");
                    set_toast.set(Some(message));
                    set_amount.set(String::new());
                    set_service_code.set(String::new());
                    set_customer_ref.set(String::new());
                    set_timeout(move || set_toast.set(None), Duration::from_millis(2200));
                }
                Err(err) => set_api_error.set(Some(err.to_string())),
            }
            set_loading_pay.set(false);
        });
    };

    view! {
        <div class="space-y-6 max-w-2xl">
            <div>
                <h1 class="text-2xl font-bold">
                    {move || match selected.get().and_then(|s| s.service_name) {
                        Some(name) => format!("Pembayaran: {name}"),
                        None => "Pembayaran".to_string(),
                    }}
                </h1>
                <p class="text-sm text-base-content/60">
                    "Pilih layanan, isi nominal, lalu bayar"
                </p>
            </div>

            <div class="stats shadow bg-base-100 w-full">
                <div class="stat">
                    <div class="stat-title">"Total"</div>
                    <div class="stat-value text-primary text-2xl">
                        {move || if parsed() > 0 { format_idr(parsed()) } else { "Rp 0".to_string() }}
                    </div>
                    <div class="stat-desc">
                        {move || match selected.get().and_then(|s| s.service_code) {
                            Some(code) => format!("Kode: {code}"),
                            None => "Tarif otomatis terisi bila disediakan oleh layanan.".to_string(),
                        }}
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-4" on:submit=on_submit novalidate>
                    <div class="flex items-center justify-between">
                        <h2 class="card-title text-base">"Form Pembayaran"</h2>
                        <button
                            type="button"
                            on:click=refresh_services
                            disabled=move || catalog.loading.get()
                            class="btn btn-ghost btn-sm gap-1"
                        >
                            <RefreshCw attr:class=move || {
                                if catalog.loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" }
                            } />
                            "Refresh Layanan"
                        </button>
                    </div>

                    <Show when=move || catalog.notice.get().is_some()>
                        <div class="alert alert-warning text-sm py-2">
                            <span>{move || catalog.notice.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <Show when=move || api_error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || api_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="service">
                            <span class="label-text">"Pilih Layanan"</span>
                        </label>
                        <select
                            id="service"
                            class="select select-bordered"
                            prop:value=service_code
                            on:change=move |ev| {
                                set_api_error.set(None);
                                set_service_code.set(event_target_value(&ev));
                            }
                        >
                            <option value="">"— pilih layanan —"</option>
                            <For
                                each={move || catalog.services.get().into_iter().enumerate().collect::<Vec<_>>()}
                                key=|(i, s)| format!("{}-{i}", s.service_code.clone().unwrap_or_default())
                                children=move |(_, service)| {
                                    let label = {
                                        let name = service
                                            .service_name
                                            .clone()
                                            .or_else(|| service.service_code.clone())
                                            .unwrap_or_default();
                                        match service.service_tariff {
                                            Some(tariff) => format!("{name} ({})", format_idr(tariff)),
                                            None => name,
                                        }
                                    };
                                    view! {
                                        <option value=service.service_code.clone().unwrap_or_default()>
                                            {label}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    <div class="form-control">
                        <label class="label" for="customer_no">
                            <span class="label-text">"Nomor Pelanggan (opsional)"</span>
                        </label>
                        <input
                            id="customer_no"
                            type="text"
                            placeholder="Contoh: 0812xxxxxxx"
                            on:input=move |ev| set_customer_ref.set(event_target_value(&ev))
                            prop:value=customer_ref
                            class="input input-bordered"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="amount">
                            <span class="label-text">"Nominal"</span>
                        </label>
                        <input
                            id="amount"
                            inputmode="numeric"
                            placeholder=move || {
                                if amount_locked() {
                                    "Nominal mengikuti tarif layanan"
                                } else {
                                    "Contoh: 100000"
                                }
                            }
                            on:input=on_change_amount
                            prop:value=amount
                            disabled=amount_locked
                            class="input input-bordered"
                        />
                        <Show when=move || !amount_locked()>
                            <p class="text-xs text-base-content/50 mt-1">
                                "Minimal Rp 1.000. Hanya angka (tanpa titik/koma)."
                            </p>
                        </Show>
                    </div>

                    <Show when=move || !amount_locked()>
                        <div class="flex flex-wrap gap-2">
                            <For
                                each={|| PRESETS}
                                key=|v| *v
                                children=move |value| {
                                    view! {
                                        <button
                                            type="button"
                                            class="btn btn-sm btn-outline"
                                            on:click=move |_| {
                                                set_api_error.set(None);
                                                set_amount.set(value.to_string());
                                            }
                                        >
                                            {format_idr(value)}
                                        </button>
                                    }
                                }
                            />
                            <button
                                type="button"
                                class="btn btn-sm btn-ghost"
                                on:click=move |_| set_amount.set(String::new())
                            >
                                "Reset"
                            </button>
                        </div>
                    </Show>

                    <div class="form-control pt-2">
                        <button class="btn btn-primary" disabled=move || !can_submit()>
                            {move || if loading_pay.get() {
                                view! { <span class="loading loading-spinner"></span> "Memproses…" }.into_any()
                            } else {
                                "Bayar Sekarang".into_any()
                            }}
                        </button>
                    </div>

                    <Show when=move || toast.get().is_some()>
                        <div class="alert alert-success text-sm py-2">
                            <span>{move || toast.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                </form>
            </div>
        </div>
    }
}

use crate::auth::use_auth;
use crate::store::use_stores;
use kasirin_shared::amount::{PRESETS, format_idr, parse_amount, sanitize_digits, validate_top_up};
use kasirin_shared::error::PosError;
use kasirin_shared::protocol::TopUpRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn TopUpPage() -> impl IntoView {
    let auth = use_auth();
    let stores = use_stores();

    // 金额一律以净化后的数字串存放
    let (amount, set_amount) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (api_error, set_api_error) = signal(Option::<String>::None);
    let (toast, set_toast) = signal(Option::<String>::None);

    let parsed = move || parse_amount(&amount.get()).unwrap_or(0);
    let can_submit = move || parsed() > 0 && !loading.get();

    let on_change = move |ev| {
        set_api_error.set(None);
        set_amount.set(sanitize_digits(&event_target_value(&ev)));
    };

    let pick_preset = move |value: u64| {
        set_api_error.set(None);
        set_amount.set(value.to_string());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        let value = parsed();
        if let Err(err) = validate_top_up(value) {
            set_api_error.set(Some(err.to_string()));
            return;
        }
        let Some(api) = auth.state.get_untracked().api else {
            set_api_error.set(Some(PosError::session_expired().to_string()));
            return;
        };

        set_loading.set(true);
        set_api_error.set(None);
        spawn_local(async move {
            match api.execute(&TopUpRequest { top_up_amount: value }).await {
                Ok(receipt) => {
                    // 回执带回新余额，直接发布给所有订阅页面
                    if let Some(balance) = receipt.balance {
                        stores.balance.apply(balance);
                    }
                    set_toast.set(Some(format!("Top up berhasil: {} 🎉", format_idr(value))));
                    set_amount.set(String::new());
                    set_timeout(move || set_toast.set(None), Duration::from_millis(2000));
                }
                Err(err) => set_api_error.set(Some(err.to_string())),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="space-y-6 max-w-2xl">
            <div>
                <h1 class="text-2xl font-bold">"Top Up Saldo"</h1>
                <p class="text-sm text-base-content/60">"Isi jumlah lalu tekan Top Up"</p>
            </div>

            <div class="stats shadow bg-base-100 w-full">
                <div class="stat">
                    <div class="stat-title">"Nominal Top Up"</div>
                    <div class="stat-value text-primary text-2xl">
                        {move || if parsed() > 0 { format_idr(parsed()) } else { "Rp 0".to_string() }}
                    </div>
                    <div class="stat-desc">"Minimal Rp 10.000. Hanya angka (tanpa titik/koma)."</div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h2 class="card-title text-base">"Form Top Up"</h2>

                    <Show when=move || api_error.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || api_error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="amount">
                            <span class="label-text">"Nominal Top Up"</span>
                        </label>
                        <input
                            id="amount"
                            inputmode="numeric"
                            placeholder="Contoh: 100000"
                            on:input=on_change
                            prop:value=amount
                            class="input input-bordered"
                        />
                    </div>

                    <div>
                        <p class="text-sm font-medium mb-2">"Pilih Cepat"</p>
                        <div class="flex flex-wrap gap-2">
                            <For
                                each={|| PRESETS}
                                key=|v| *v
                                children=move |value| {
                                    view! {
                                        <button
                                            type="button"
                                            class="btn btn-sm btn-outline"
                                            on:click=move |_| pick_preset(value)
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
                    </div>

                    <div class="form-control pt-2">
                        <button class="btn btn-primary" disabled=move || !can_submit()>
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Memproses…" }.into_any()
                            } else {
                                "Top Up Sekarang".into_any()
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

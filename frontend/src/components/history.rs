use crate::auth::use_auth;
use kasirin_shared::amount::format_idr;
use kasirin_shared::date::format_datetime_id;
use kasirin_shared::error::PosError;
use kasirin_shared::paging::{HISTORY_PAGE_SIZE, Pager, sort_history_desc};
use kasirin_shared::protocol::HistoryRequest;
use kasirin_shared::HistoryItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let auth = use_auth();

    let (rows, set_rows) = signal(Vec::<HistoryItem>::new());
    let (pager, set_pager) = signal(Pager::default());
    let (loading, set_loading) = signal(false);
    let (loading_more, set_loading_more) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 单一的取页入口：append 为 false 时替换列表，为 true 时拼接。
    // 同类请求在途时直接忽略重复触发。
    let fetch_page = move |offset: u32, append: bool| {
        let busy = if append {
            loading_more.get_untracked()
        } else {
            loading.get_untracked()
        };
        if busy {
            return;
        }

        let state = auth.state.get_untracked();
        let Some(api) = state.api else {
            set_error_msg.set(Some(PosError::session_expired().to_string()));
            return;
        };

        if append {
            set_loading_more.set(true);
        } else {
            set_loading.set(true);
        }
        set_error_msg.set(None);

        spawn_local(async move {
            let request = HistoryRequest {
                offset,
                limit: HISTORY_PAGE_SIZE,
            };
            match api.execute(&request).await {
                Ok(page) => {
                    let returned = page.len();
                    set_rows.update(|rows| {
                        if append {
                            rows.extend(page);
                        } else {
                            *rows = page;
                        }
                        // 合并后全量重排，跨页顺序全局一致
                        sort_history_desc(rows);
                    });
                    set_pager.update(|p| p.record(offset, returned));
                }
                Err(err) => {
                    if !append {
                        set_rows.set(Vec::new());
                    }
                    set_pager.update(|p| p.halt());
                    set_error_msg.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
            set_loading_more.set(false);
        });
    };

    // 初始加载第一页
    Effect::new(move |_| {
        if auth.state.get().is_authenticated {
            fetch_page(0, false);
        }
    });

    let on_refresh = move |_| {
        set_pager.update(|p| p.reset());
        fetch_page(0, false);
    };

    let on_show_more = move |_| {
        let offset = pager.get_untracked().next_offset();
        fetch_page(offset, true);
    };

    let row_count = move || rows.with(|r| r.len());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-2xl font-bold">"Riwayat Transaksi"</h1>
                    <p class="text-sm text-base-content/60">
                        "Menampilkan " {row_count} " item"
                    </p>
                </div>
                <button
                    on:click=on_refresh
                    disabled=move || loading.get() || loading_more.get()
                    class="btn btn-sm btn-outline"
                >
                    {move || if loading.get() { "Memuat…" } else { "Refresh" }}
                </button>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Invoice"</th>
                                    <th>"Tipe"</th>
                                    <th class="hidden md:table-cell">"Deskripsi"</th>
                                    <th>"Jumlah"</th>
                                    <th>"Tanggal"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Memuat…"
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !loading.get() && row_count() == 0>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "Belum ada transaksi."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each={move || rows.get().into_iter().enumerate().collect::<Vec<_>>()}
                                    key=|(i, r)| format!("{}-{i}", r.invoice_number.clone().unwrap_or_default())
                                    children=move |(_, row)| {
                                        let tanggal = row
                                            .created_ms
                                            .and_then(format_datetime_id)
                                            .unwrap_or_else(|| "-".to_string());
                                        let jumlah = row
                                            .total_amount
                                            .map(format_idr)
                                            .unwrap_or_else(|| "-".to_string());
                                        view! {
                                            <tr>
                                                <td class="font-mono text-sm">
                                                    {row.invoice_number.clone().unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="capitalize text-sm">
                                                    {row.transaction_type.clone().unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="hidden md:table-cell text-sm opacity-70">
                                                    {row.description.clone().unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="text-sm">{jumlah}</td>
                                                <td class="text-sm opacity-60">{tanggal}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <Show when=move || {
                        !loading.get() && row_count() > 0 && pager.get().has_more
                    }>
                        <div class="flex justify-center p-4">
                            <button
                                on:click=on_show_more
                                disabled=move || loading_more.get()
                                class="btn btn-sm btn-outline"
                            >
                                {move || if loading_more.get() { "Memuat…" } else { "Show more" }}
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

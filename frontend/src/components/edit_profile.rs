use crate::auth::use_auth;
use crate::store::use_stores;
use kasirin_shared::error::PosError;
use kasirin_shared::protocol::{GetProfile, UpdateProfileRequest};
use kasirin_shared::validate::{is_valid_email, validate_profile_image};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::File;

/// 服务器没给头像时的占位图
const DUMMY_PROFILE_IMAGE: &str =
    "https://fisika.uad.ac.id/wp-content/uploads/blank-profile-picture-973460_1280.png";

#[component]
pub fn EditProfilePage() -> impl IntoView {
    let auth = use_auth();
    let stores = use_stores();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());

    // 加载时的快照，用于脏检查和取消编辑
    let (initial, set_initial) = signal((String::new(), String::new(), String::new()));

    let (avatar_url, set_avatar_url) = signal(Option::<String>::None);
    let (avatar_preview, set_avatar_preview) = signal(Option::<String>::None);
    // File 是 JS 句柄，放本线程信号里；脏检查走旁边的布尔信号
    let avatar_file = RwSignal::new_local(Option::<File>::None);
    let (has_new_avatar, set_has_new_avatar) = signal(false);

    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let dirty = Signal::derive(move || {
        let (f, l, e) = initial.get();
        first_name.get().trim() != f
            || last_name.get().trim() != l
            || email.get().trim() != e
            || has_new_avatar.get()
    });

    // 初始加载资料
    Effect::new(move |_| {
        let state = auth.state.get();
        if !state.is_authenticated {
            return;
        }
        let Some(api) = state.api else { return };
        set_loading.set(true);
        spawn_local(async move {
            match api.execute(&GetProfile).await {
                Ok(profile) => {
                    let f = profile.first_name.clone().unwrap_or_default();
                    let l = profile.last_name.clone().unwrap_or_default();
                    let e = profile.email.clone().unwrap_or_default();
                    set_first_name.set(f.clone());
                    set_last_name.set(l.clone());
                    set_email.set(e.clone());
                    set_initial.set((f, l, e));
                    set_avatar_url.set(Some(
                        profile
                            .profile_image
                            .clone()
                            .unwrap_or_else(|| DUMMY_PROFILE_IMAGE.to_string()),
                    ));
                    stores.profile.apply(profile);
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_loading.set(false);
        });
    });

    let revoke_preview = move || {
        if let Some(old) = avatar_preview.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        set_avatar_preview.set(None);
    };

    let on_pick_image = move |ev: leptos::ev::Event| {
        set_error_msg.set(None);
        set_success_msg.set(None);
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else {
            return;
        };
        if let Err(err) = validate_profile_image(&file.type_(), file.size() as u64) {
            set_error_msg.set(Some(err.to_string()));
            input.set_value("");
            return;
        }
        revoke_preview();
        if let Ok(url) = web_sys::Url::create_object_url_with_blob(&file) {
            set_avatar_preview.set(Some(url));
        }
        avatar_file.set(Some(file));
        set_has_new_avatar.set(true);
    };

    let on_cancel = move |_| {
        let (f, l, e) = initial.get_untracked();
        set_first_name.set(f);
        set_last_name.set(l);
        set_email.set(e);
        revoke_preview();
        avatar_file.set(None);
        set_has_new_avatar.set(false);
        set_error_msg.set(None);
        set_success_msg.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() || !dirty.get_untracked() {
            return;
        }

        let f = first_name.get_untracked().trim().to_string();
        let l = last_name.get_untracked().trim().to_string();
        let e = email.get_untracked().trim().to_string();
        if f.is_empty() {
            set_error_msg.set(Some("First name wajib diisi.".to_string()));
            return;
        }
        if l.is_empty() {
            set_error_msg.set(Some("Last name wajib diisi.".to_string()));
            return;
        }
        if !is_valid_email(&e) {
            set_error_msg.set(Some("Format email tidak valid.".to_string()));
            return;
        }
        let Some(api) = auth.state.get_untracked().api else {
            set_error_msg.set(Some(PosError::session_expired().to_string()));
            return;
        };

        set_saving.set(true);
        set_error_msg.set(None);
        set_success_msg.set(None);

        spawn_local(async move {
            let (init_f, init_l, init_e) = initial.get_untracked();
            let text_changed = f != init_f || l != init_l || e != init_e;
            let mut latest = None;

            if text_changed {
                let request = UpdateProfileRequest {
                    first_name: f.clone(),
                    last_name: l.clone(),
                    email: e.clone(),
                };
                match api.execute(&request).await {
                    Ok(profile) => latest = Some(profile),
                    Err(err) => {
                        set_error_msg.set(Some(err.to_string()));
                        set_saving.set(false);
                        return;
                    }
                }
            }

            if let Some(file) = avatar_file.get_untracked() {
                match api.update_profile_image(&file).await {
                    Ok(profile) => {
                        revoke_preview();
                        avatar_file.set(None);
                        set_has_new_avatar.set(false);
                        latest = Some(profile);
                    }
                    Err(err) => {
                        set_error_msg.set(Some(err.to_string()));
                        set_saving.set(false);
                        return;
                    }
                }
            }

            if let Some(profile) = latest {
                if let Some(image) = profile.profile_image.clone() {
                    set_avatar_url.set(Some(image));
                }
                // 发布给订阅方，仪表盘问候语同步更新
                stores.profile.apply(profile);
            }
            set_initial.set((f, l, e));
            set_success_msg.set(Some("Profil berhasil diperbarui".to_string()));
            set_timeout(
                move || set_success_msg.set(None),
                Duration::from_millis(2500),
            );
            set_saving.set(false);
        });
    };

    let display_name = move || {
        let (f, l, _) = initial.get();
        let name = format!("{f} {l}");
        let name = name.trim().to_string();
        if name.is_empty() { "Profil".to_string() } else { name }
    };

    view! {
        <div class="flex flex-col items-center">
            <div class="w-full max-w-xl space-y-4">
                <div class="flex flex-col items-center">
                    <div class="avatar">
                        <div class="w-24 rounded-full ring ring-base-300 ring-offset-2">
                            <img
                                src=move || {
                                    avatar_preview
                                        .get()
                                        .or_else(|| avatar_url.get())
                                        .unwrap_or_else(|| DUMMY_PROFILE_IMAGE.to_string())
                                }
                                alt="Avatar"
                                on:error=move |_| {
                                    set_avatar_url.set(Some(DUMMY_PROFILE_IMAGE.to_string()))
                                }
                            />
                        </div>
                    </div>
                    <label for="avatar" class="btn btn-xs btn-outline mt-2 cursor-pointer">
                        "Ubah foto"
                    </label>
                    <input
                        id="avatar"
                        type="file"
                        accept="image/*"
                        class="hidden"
                        on:change=on_pick_image
                    />
                    <h2 class="mt-2 text-xl font-semibold">
                        {move || if loading.get() { "Memuat…".to_string() } else { display_name() }}
                    </h2>
                    <Show when=move || avatar_preview.get().is_some()>
                        <p class="text-xs text-base-content/50 mt-1">
                            "Gambar baru dipilih (≤ 100 KB). Klik Simpan untuk mengunggah."
                        </p>
                    </Show>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                <Show when=move || success_msg.get().is_some()>
                    <div class="alert alert-success text-sm py-2">
                        <span>{move || success_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <form class="card bg-base-100 shadow-xl" on:submit=on_submit novalidate>
                    <div class="card-body space-y-3">
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="email@contoh.com"
                                on:input=move |ev| {
                                    set_error_msg.set(None);
                                    set_success_msg.set(None);
                                    set_email.set(event_target_value(&ev));
                                }
                                prop:value=email
                                disabled=move || loading.get()
                                class="input input-bordered"
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="first_name">
                                <span class="label-text">"Nama Depan"</span>
                            </label>
                            <input
                                id="first_name"
                                type="text"
                                placeholder="Nama depan"
                                on:input=move |ev| {
                                    set_error_msg.set(None);
                                    set_success_msg.set(None);
                                    set_first_name.set(event_target_value(&ev));
                                }
                                prop:value=first_name
                                disabled=move || loading.get()
                                class="input input-bordered"
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="last_name">
                                <span class="label-text">"Nama Belakang"</span>
                            </label>
                            <input
                                id="last_name"
                                type="text"
                                placeholder="Nama belakang"
                                on:input=move |ev| {
                                    set_error_msg.set(None);
                                    set_success_msg.set(None);
                                    set_last_name.set(event_target_value(&ev));
                                }
                                prop:value=last_name
                                disabled=move || loading.get()
                                class="input input-bordered"
                            />
                        </div>

                        <div class="pt-2 flex gap-3">
                            <Show
                                when=move || dirty.get()
                                fallback=|| view! {
                                    <button type="button" disabled class="btn btn-disabled w-full">
                                        "Tidak ada perubahan"
                                    </button>
                                }
                            >
                                <button
                                    type="submit"
                                    disabled=move || saving.get() || loading.get()
                                    class="btn btn-primary flex-1"
                                >
                                    {move || if saving.get() { "Menyimpan…" } else { "Simpan" }}
                                </button>
                                <button
                                    type="button"
                                    on:click=on_cancel
                                    disabled=move || saving.get() || loading.get()
                                    class="btn btn-outline"
                                >
                                    "Batal"
                                </button>
                            </Show>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}

use crate::auth::register;
use crate::components::icons::{Eye, EyeOff, UserRound};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let router = use_router();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_pwd, set_show_pwd) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (toast, set_toast) = signal(Option::<String>::None);

    let clear_error = move || set_error_msg.set(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = register(
                first_name.get_untracked(),
                last_name.get_untracked(),
                email.get_untracked(),
                password.get_untracked(),
            )
            .await;
            match result {
                Ok(()) => {
                    set_toast.set(Some(
                        "Registrasi berhasil! Mengarahkan ke halaman login…".to_string(),
                    ));
                    set_timeout(
                        move || {
                            set_toast.set(None);
                            router.navigate(AppRoute::Login);
                        },
                        Duration::from_millis(1200),
                    );
                }
                Err(err) => set_error_msg.set(Some(err.to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserRound attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Buat Akun"</h1>
                        <p class="text-base-content/70">"Daftar untuk mulai memakai Kasirin POS"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || toast.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || toast.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="grid grid-cols-2 gap-3">
                            <div class="form-control">
                                <label class="label" for="first_name">
                                    <span class="label-text">"Nama Depan"</span>
                                </label>
                                <input
                                    id="first_name"
                                    type="text"
                                    placeholder="Nama depan"
                                    on:input=move |ev| {
                                        clear_error();
                                        set_first_name.set(event_target_value(&ev));
                                    }
                                    prop:value=first_name
                                    class="input input-bordered w-full"
                                    required
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
                                        clear_error();
                                        set_last_name.set(event_target_value(&ev));
                                    }
                                    prop:value=last_name
                                    class="input input-bordered w-full"
                                    required
                                />
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="nama@email.com"
                                on:input=move |ev| {
                                    clear_error();
                                    set_email.set(event_target_value(&ev));
                                }
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_pwd.get() { "text" } else { "password" }
                                    placeholder="Minimal 6 karakter"
                                    on:input=move |ev| {
                                        clear_error();
                                        set_password.set(event_target_value(&ev));
                                    }
                                    prop:value=password
                                    class="input input-bordered join-item w-full"
                                    required
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    on:click=move |_| set_show_pwd.update(|s| *s = !*s)
                                >
                                    <Show
                                        when=move || show_pwd.get()
                                        fallback=|| view! { <Eye attr:class="h-4 w-4" /> }
                                    >
                                        <EyeOff attr:class="h-4 w-4" />
                                    </Show>
                                </button>
                            </div>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Memproses..." }.into_any()
                                } else {
                                    "Daftar".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            "Sudah punya akun? "
                            <Link to=AppRoute::Login>
                                <span class="link link-primary font-semibold">"Masuk"</span>
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

use crate::auth::{login, use_auth};
use crate::components::icons::{Eye, EyeOff, StoreLogo};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_pwd, set_show_pwd) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 校验失败和请求失败都落到同一条提示；登录成功后的
            // 跳转由路由服务监听认证信号完成
            if let Err(err) = login(&auth, email.get_untracked(), password.get_untracked()).await {
                set_error_msg.set(Some(err.to_string()));
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
                            <StoreLogo attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Masuk"</h1>
                        <p class="text-base-content/70">"Kasirin POS, selamat datang"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="nama@email.com"
                                on:input=move |ev| {
                                    set_error_msg.set(None);
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
                                        set_error_msg.set(None);
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
                            <p class="text-xs text-base-content/50 mt-1">"Minimal 6 karakter."</p>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Memproses..." }.into_any()
                                } else {
                                    "Masuk".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            "Belum punya akun? "
                            <Link to=AppRoute::Register>
                                <span class="link link-primary font-semibold">"Daftar"</span>
                            </Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

//! 页面间共享的数据存储
//!
//! 信号订阅取代一次性广播事件：余额、资料、服务目录的更新同步
//! 发布给所有已挂载的订阅者，并带时间戳写入 LocalStorage 缓存。
//! 页面进入时先用未过期的缓存立即渲染，再发起网络刷新；正在
//! 刷新时重复触发会被合并（直接忽略）。

use crate::api::KasirinApi;
use gloo_storage::{LocalStorage, Storage};
use kasirin_shared::cache::{BALANCE_TTL_MS, CATALOG_TTL_MS, CacheEntry};
use kasirin_shared::protocol::{GetBalance, GetBanners, GetProfile, GetServices};
use kasirin_shared::{Banner, Profile, ServiceItem, storage_keys};
use leptos::prelude::*;

/// 当前时刻的 Unix 毫秒，用作缓存条目的写入时间
fn now_ms() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

// =========================================================
// 余额
// =========================================================

#[derive(Clone, Copy)]
pub struct BalanceStore {
    pub value: RwSignal<Option<u64>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl BalanceStore {
    fn new() -> Self {
        Self {
            value: RwSignal::new(None),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// 从缓存快速恢复，只接受未过期的条目
    fn hydrate(&self) {
        if let Ok(entry) = LocalStorage::get::<CacheEntry<u64>>(storage_keys::BALANCE) {
            if let Some(balance) = entry.fresh_value(now_ms(), BALANCE_TTL_MS) {
                self.value.set(Some(balance));
            }
        }
    }

    /// 重新拉取。已有请求在途时合并。
    pub async fn refresh(&self, api: &KasirinApi) {
        if self.loading.get_untracked() {
            return;
        }
        self.loading.set(true);
        self.error.set(None);
        match api.execute(&GetBalance).await {
            Ok(balance) => self.apply(balance),
            Err(err) => self.error.set(Some(err.to_string())),
        }
        self.loading.set(false);
    }

    /// 发布新的余额：写缓存并同步通知所有订阅者。充值或支付成功
    /// 后由页面直接调用，不存在错过失效通知的窗口。
    pub fn apply(&self, balance: u64) {
        let _ = LocalStorage::set(
            storage_keys::BALANCE,
            &CacheEntry::new(balance, now_ms()),
        );
        self.value.set(Some(balance));
    }
}

// =========================================================
// 资料
// =========================================================

#[derive(Clone, Copy)]
pub struct ProfileStore {
    pub profile: RwSignal<Option<Profile>>,
    pub loading: RwSignal<bool>,
}

impl ProfileStore {
    fn new() -> Self {
        Self {
            profile: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    pub async fn refresh(&self, api: &KasirinApi) {
        if self.loading.get_untracked() {
            return;
        }
        self.loading.set(true);
        if let Ok(profile) = api.execute(&GetProfile).await {
            self.profile.set(Some(profile));
        }
        self.loading.set(false);
    }

    /// 编辑页保存成功后发布新资料，问候语等订阅方立即更新
    pub fn apply(&self, profile: Profile) {
        self.profile.set(Some(profile));
    }
}

// =========================================================
// 服务目录与横幅
// =========================================================

#[derive(Clone, Copy)]
pub struct CatalogStore {
    pub services: RwSignal<Vec<ServiceItem>>,
    pub banners: RwSignal<Vec<Banner>>,
    pub loading: RwSignal<bool>,
    /// 目录加载的提示（网络失败、退回缓存等），不阻塞页面
    pub notice: RwSignal<Option<String>>,
}

impl CatalogStore {
    fn new() -> Self {
        Self {
            services: RwSignal::new(Vec::new()),
            banners: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            notice: RwSignal::new(None),
        }
    }

    fn hydrate(&self) {
        if let Ok(entry) =
            LocalStorage::get::<CacheEntry<Vec<ServiceItem>>>(storage_keys::SERVICE_CATALOG)
        {
            if let Some(services) = entry.fresh_value(now_ms(), CATALOG_TTL_MS) {
                self.services.set(services);
            }
        }
        if let Ok(entry) = LocalStorage::get::<CacheEntry<Vec<Banner>>>(storage_keys::BANNER_LIST) {
            if let Some(banners) = entry.fresh_value(now_ms(), CATALOG_TTL_MS) {
                self.banners.set(banners);
            }
        }
    }

    /// 拉取服务目录。网络失败时退回最近一次成功的缓存（即使已
    /// 过期），并给出明确提示。
    pub async fn refresh_services(&self, api: &KasirinApi) {
        if self.loading.get_untracked() {
            return;
        }
        self.loading.set(true);
        self.notice.set(None);
        match api.execute(&GetServices).await {
            Ok(services) => {
                let _ = LocalStorage::set(
                    storage_keys::SERVICE_CATALOG,
                    &CacheEntry::new(services.clone(), now_ms()),
                );
                self.services.set(services);
            }
            Err(err) => {
                let cached: Option<Vec<ServiceItem>> =
                    LocalStorage::get::<CacheEntry<Vec<ServiceItem>>>(storage_keys::SERVICE_CATALOG)
                        .ok()
                        .map(|entry| entry.value);
                match cached {
                    Some(services) if !services.is_empty() => {
                        self.services.set(services);
                        self.notice.set(Some("Data layanan dari cache.".to_string()));
                    }
                    _ => self.notice.set(Some(err.to_string())),
                }
            }
        }
        self.loading.set(false);
    }

    /// 横幅每次进入仪表盘拉一次，失败只提示不回退
    pub async fn refresh_banners(&self, api: &KasirinApi) {
        match api.execute(&GetBanners).await {
            Ok(banners) => {
                let _ = LocalStorage::set(
                    storage_keys::BANNER_LIST,
                    &CacheEntry::new(banners.clone(), now_ms()),
                );
                self.banners.set(banners);
            }
            Err(err) => {
                web_sys::console::warn_1(&format!("[Catalog] banner: {err}").into());
            }
        }
    }
}

// =========================================================
// 汇总
// =========================================================

#[derive(Clone, Copy)]
pub struct Stores {
    pub balance: BalanceStore,
    pub profile: ProfileStore,
    pub catalog: CatalogStore,
}

/// 在应用根部创建并注入所有存储，同时完成缓存恢复
pub fn provide_stores() {
    let stores = Stores {
        balance: BalanceStore::new(),
        profile: ProfileStore::new(),
        catalog: CatalogStore::new(),
    };
    stores.balance.hydrate();
    stores.catalog.hydrate();
    provide_context(stores);
}

pub fn use_stores() -> Stores {
    use_context::<Stores>().expect("Stores should be provided")
}

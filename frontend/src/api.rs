//! 远程 API 客户端
//!
//! 所有页面共用的请求生命周期：会话守卫、10 秒定时中止、宽容 JSON
//! 解析、统一的错误消息提取。端点元数据与解码策略声明在
//! `kasirin-shared` 的 protocol 模块，这里只负责把请求真正发出去。

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use kasirin_shared::error::PosError;
use kasirin_shared::normalize;
use kasirin_shared::protocol::{
    ApiRequest, HttpMethod, PROFILE_IMAGE_FALLBACK, PROFILE_IMAGE_PATH, profile_from_body,
};
use kasirin_shared::{API_BASE, Profile, REQUEST_TIMEOUT_MS, Session};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{AbortController, AbortSignal, File, FormData};

#[derive(Clone, Debug, PartialEq)]
pub struct KasirinApi {
    base_url: String,
    token: Option<String>,
}

impl KasirinApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// 认证后的客户端
    pub fn with_token(token: String) -> Self {
        Self::new(API_BASE, Some(token))
    }

    /// 登录 / 注册用的匿名客户端
    pub fn anonymous() -> Self {
        Self::new(API_BASE, None)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url<R: ApiRequest>(&self, req: &R) -> String {
        let mut url = format!("{}{}", self.base_url, R::PATH);
        let query = req.query();
        if !query.is_empty() {
            let qs = query
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&qs);
        }
        url
    }

    /// 发送一个协议请求并解码响应
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> Result<R::Response, PosError> {
        // 会话守卫：缺 token 立即失败，绝不触网
        let token = if R::REQUIRES_AUTH {
            Some(Session::require(self.token())?.to_string())
        } else {
            None
        };

        let url = self.url(req);
        let guard = AbortGuard::arm()?;

        let mut builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
        }
        .abort_signal(Some(&guard.signal()));
        if let Some(token) = &token {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let sent = match R::METHOD {
            // GET 不携带请求体
            HttpMethod::Get => builder.send().await,
            _ => match builder.json(req) {
                Ok(request) => request.send().await,
                Err(err) => return Err(guard.classify(err)),
            },
        };
        let response = match sent {
            Ok(response) => response,
            Err(err) => return Err(guard.classify(err)),
        };

        let status = response.status();
        let ok = response.ok();
        let text = response.text().await.unwrap_or_default();
        let body = normalize::parse_json_lenient(&text);

        if !ok {
            let message = normalize::extract_message(&body);
            web_sys::console::warn_1(
                &format!("[Api] {} {} -> {}", R::METHOD.as_str(), R::PATH, status).into(),
            );
            return Err(PosError::server(status, message, R::FALLBACK_MESSAGE));
        }

        R::decode(&body)
    }

    /// 上传头像。multipart 表单不走 JSON 协议，单独处理。
    pub async fn update_profile_image(&self, file: &File) -> Result<Profile, PosError> {
        let token = Session::require(self.token())?.to_string();
        let url = format!("{}{}", self.base_url, PROFILE_IMAGE_PATH);
        let guard = AbortGuard::arm()?;

        let form = FormData::new().map_err(|_| PosError::network())?;
        form.append_with_blob("file", file)
            .map_err(|_| PosError::network())?;

        let sent = match Request::put(&url)
            .abort_signal(Some(&guard.signal()))
            .header("Authorization", &format!("Bearer {token}"))
            .body(form)
        {
            Ok(request) => request.send().await,
            Err(err) => return Err(guard.classify(err)),
        };
        let response = match sent {
            Ok(response) => response,
            Err(err) => return Err(guard.classify(err)),
        };

        let status = response.status();
        let ok = response.ok();
        let text = response.text().await.unwrap_or_default();
        let body = normalize::parse_json_lenient(&text);

        if !ok {
            let message = normalize::extract_message(&body);
            return Err(PosError::server(status, message, PROFILE_IMAGE_FALLBACK));
        }
        profile_from_body(&body, PROFILE_IMAGE_FALLBACK)
    }
}

// =========================================================
// 超时中止
// =========================================================

/// 固定时限的中止装置：定时器到点触发 AbortController，fetch 的
/// 拒绝原因由 [`AbortGuard::classify`] 区分成「超时」或「连接失败」。
/// 请求正常结束后 guard 随作用域销毁，定时器一并取消。
struct AbortGuard {
    controller: AbortController,
    timed_out: Rc<Cell<bool>>,
    _timer: Timeout,
}

impl AbortGuard {
    fn arm() -> Result<Self, PosError> {
        let controller = AbortController::new().map_err(|_| PosError::network())?;
        let timed_out = Rc::new(Cell::new(false));
        let timer = {
            let controller = controller.clone();
            let timed_out = Rc::clone(&timed_out);
            Timeout::new(REQUEST_TIMEOUT_MS, move || {
                timed_out.set(true);
                controller.abort();
            })
        };
        Ok(Self {
            controller,
            timed_out,
            _timer: timer,
        })
    }

    fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    /// 定时器已经打过标记的中止是超时，其余一律按网络故障处理
    fn classify(&self, err: gloo_net::Error) -> PosError {
        web_sys::console::error_1(&format!("[Api] fetch error: {err}").into());
        if self.timed_out.get() {
            PosError::timeout()
        } else {
            PosError::network()
        }
    }
}

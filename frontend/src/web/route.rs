//! 路由定义模块 - 领域模型
//!
//! 纯业务层，不依赖 DOM 或 web_sys。定义应用的所有路由及其
//! 守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页（默认路由）
    #[default]
    Login,
    /// 注册页
    Register,
    /// 仪表盘（需要认证）
    Dashboard,
    /// 余额充值（需要认证）
    TopUp,
    /// 服务缴费（需要认证）
    Payment,
    /// 交易历史（需要认证）
    History,
    /// 资料编辑（需要认证）
    Profile,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 把 URL path 解析为路由
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/topup" => Self::TopUp,
            "/payment" => Self::Payment,
            "/history" => Self::History,
            "/profile" => Self::Profile,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::TopUp => "/topup",
            Self::Payment => "/payment",
            Self::History => "/history",
            Self::Profile => "/profile",
            Self::NotFound => "/404",
        }
    }

    /// 守卫逻辑：该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::TopUp | Self::Payment | Self::History | Self::Profile
        )
    }

    /// 已认证用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::TopUp,
            AppRoute::Payment,
            AppRoute::History,
            AppRoute::Profile,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/apa-ini"), AppRoute::NotFound);
    }

    #[test]
    fn private_routes_demand_auth() {
        assert!(AppRoute::History.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Register.should_redirect_when_authenticated());
    }
}

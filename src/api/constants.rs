//! API 模块常量定义

/// 会话 Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "shortly_session";

/// 未登录访问受保护页面时的跳转目标
pub const LOGIN_PATH: &str = "/login";

pub const SIGNUP_PATH: &str = "/signup";

/// 登录/注册成功后的跳转目标
pub const HOME_PATH: &str = "/";

//! 页面标题抓取
//!
//! 创建短链接时顺带抓取目标页面的 `<title>`，仅用于展示。
//! 任何网络或解析失败都只返回 `None`，不影响链接创建。

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};
use ureq::Agent;

use crate::config::LinksConfig;

/// 最多读取的响应体字节数
const MAX_BODY_BYTES: u64 = 512 * 1024;
/// 存储的标题最大字符数
const MAX_TITLE_CHARS: usize = 512;

#[async_trait]
pub trait TitleFetcher: Send + Sync {
    /// 抓取 `url` 的页面标题，失败返回 `None`
    async fn fetch_title(&self, url: &str) -> Option<String>;
}

/// 根据配置选择抓取实现
pub fn title_fetcher_from_config(config: &LinksConfig) -> Arc<dyn TitleFetcher> {
    if config.fetch_titles {
        Arc::new(HttpTitleFetcher::new(Duration::from_secs(
            config.title_fetch_timeout_secs,
        )))
    } else {
        debug!("Title fetching disabled");
        Arc::new(NoopTitleFetcher)
    }
}

/// 基于 ureq 的抓取实现（阻塞 IO 放在 spawn_blocking 中执行）
pub struct HttpTitleFetcher {
    agent: Agent,
}

impl HttpTitleFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }

    fn fetch_sync(agent: &Agent, url: &str) -> Option<String> {
        let resp = match agent
            .get(url)
            .header("User-Agent", concat!("shortly/", env!("CARGO_PKG_VERSION")))
            .header("Accept", "text/html,application/xhtml+xml")
            .call()
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Title fetch for \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let mut buf = Vec::new();
        if let Err(e) = resp
            .into_body()
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut buf)
        {
            warn!("Title fetch for \"{}\" could not read body: {}", url, e);
            return None;
        }

        let title = extract_title(&String::from_utf8_lossy(&buf));
        trace!("Title for \"{}\": {:?}", url, title);
        title
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Option<String> {
        let agent = self.agent.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .unwrap_or_else(|e| {
                warn!("Title fetch task failed: {}", e);
                None
            })
    }
}

/// 不抓取任何内容
pub struct NoopTitleFetcher;

#[async_trait]
impl TitleFetcher for NoopTitleFetcher {
    async fn fetch_title(&self, _url: &str) -> Option<String> {
        None
    }
}

/// 从 HTML 中提取第一个 `<title>` 的文本
///
/// 标签名大小写不敏感，允许带属性；解码常见实体，合并空白。
pub fn extract_title(html: &str) -> Option<String> {
    // ASCII 小写不改变字节偏移，可以直接用来切原文
    let lower = html.to_ascii_lowercase();

    let mut from = 0;
    let tag_end = loop {
        let idx = lower[from..].find("<title")? + from;
        let after = idx + "<title".len();
        match lower.as_bytes().get(after)? {
            b'>' | b' ' | b'\t' | b'\n' | b'\r' => break after,
            _ => from = after,
        }
    };

    let content_start = lower[tag_end..].find('>')? + tag_end + 1;
    let content_end = lower[content_start..].find("</title")? + content_start;

    let decoded = decode_entities(&html[content_start..content_end]);
    let title: String = decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect();

    if title.is_empty() { None } else { Some(title) }
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

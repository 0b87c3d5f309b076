//! Link service
//!
//! Turns submitted URLs into short codes and resolves codes back to URLs.
//! Shared by the HTTP handlers and the `list` CLI command.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::LinksConfig;
use crate::errors::{Result, ShortlyError};
use crate::services::title_fetcher::TitleFetcher;
use crate::storage::{Link, LinkInsertOutcome, NewLink, SeaOrmStorage};
use crate::utils::url_validator::{validate_url, validation_error_message};
use crate::utils::{MAX_CODE_LENGTH, generate_random_code, is_reserved_code, is_valid_short_code};

/// Short code generation settings
#[derive(Debug, Clone, Copy)]
pub struct LinkSettings {
    pub code_length: usize,
    /// How many fresh codes to try before giving up
    pub max_code_attempts: u32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            code_length: 6,
            max_code_attempts: 8,
        }
    }
}

impl From<&LinksConfig> for LinkSettings {
    fn from(config: &LinksConfig) -> Self {
        Self {
            code_length: config.code_length.clamp(1, MAX_CODE_LENGTH),
            max_code_attempts: config.max_code_attempts.max(1),
        }
    }
}

/// Result of `create_or_get_link`
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: Link,
    /// false when the URL was already shortened
    pub created: bool,
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    title_fetcher: Arc<dyn TitleFetcher>,
    settings: LinkSettings,
}

impl LinkService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        title_fetcher: Arc<dyn TitleFetcher>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            storage,
            title_fetcher,
            settings,
        }
    }

    /// Return the existing link for `url`, or create one with a fresh code.
    ///
    /// Invalid URLs fail with `InvalidUrl` and leave storage untouched.
    /// Links are stored and looked up by the normalized URL, which is plain
    /// ASCII and always usable as a `Location` header.
    #[instrument(skip(self), fields(created = tracing::field::Empty))]
    pub async fn create_or_get_link(&self, url: &str, base_url: &str) -> Result<LinkCreateResult> {
        let url = match validate_url(url) {
            Ok(parsed) => String::from(parsed),
            Err(e) => {
                debug!("Rejected URL {:?}: {}", url, e);
                return Err(ShortlyError::invalid_url(format!(
                    "{}: {}",
                    validation_error_message(&e),
                    url.trim()
                )));
            }
        };
        let url = url.as_str();

        if let Some(link) = self.storage.find_link_by_url(url).await? {
            debug!("URL already shortened as {}", link.code);
            tracing::Span::current().record("created", false);
            return Ok(LinkCreateResult {
                link,
                created: false,
            });
        }

        let title = self.title_fetcher.fetch_title(url).await.unwrap_or_default();

        for attempt in 1..=self.settings.max_code_attempts {
            let code = generate_random_code(self.settings.code_length);
            if is_reserved_code(&code) {
                debug!("Generated code {} shadows a fixed route (attempt {})", code, attempt);
                continue;
            }
            if self.storage.code_exists(&code).await? {
                debug!("Generated code {} already taken (attempt {})", code, attempt);
                continue;
            }

            let new_link = NewLink {
                url: url.to_string(),
                code,
                title: title.clone(),
                base_url: base_url.trim_end_matches('/').to_string(),
            };

            match self.storage.insert_link(&new_link).await? {
                LinkInsertOutcome::Inserted(link) => {
                    info!("Created short link {} for {}", link.code, link.url);
                    tracing::Span::current().record("created", true);
                    return Ok(LinkCreateResult {
                        link,
                        created: true,
                    });
                }
                LinkInsertOutcome::UrlTaken => {
                    // 并发提交了同一个 URL，返回先写入的那条
                    let link = self.storage.find_link_by_url(url).await?.ok_or_else(|| {
                        ShortlyError::database_operation(format!(
                            "URL conflict reported but no link found for {}",
                            url
                        ))
                    })?;
                    tracing::Span::current().record("created", false);
                    return Ok(LinkCreateResult {
                        link,
                        created: false,
                    });
                }
                LinkInsertOutcome::CodeTaken => {
                    debug!("Code {} lost an insert race (attempt {})", new_link.code, attempt);
                }
            }
        }

        warn!(
            "No free short code after {} attempts",
            self.settings.max_code_attempts
        );
        Err(ShortlyError::database_operation(format!(
            "Could not generate a unique short code after {} attempts",
            self.settings.max_code_attempts
        )))
    }

    /// Resolve a code to its URL and count the visit.
    ///
    /// A failed counter update is logged; the redirect still succeeds.
    #[instrument(skip(self))]
    pub async fn resolve_code(&self, code: &str) -> Result<String> {
        if !is_valid_short_code(code) {
            return Err(ShortlyError::not_found(format!("Unknown short code: {}", code)));
        }

        let link = self
            .storage
            .get_link(code)
            .await?
            .ok_or_else(|| ShortlyError::not_found(format!("Unknown short code: {}", code)))?;

        match self.storage.increment_visits(code).await {
            Ok(true) => {}
            Ok(false) => debug!("Link {} vanished before its visit was counted", code),
            Err(e) => warn!("Failed to count visit for {}: {}", code, e),
        }

        Ok(link.url)
    }

    /// All links, newest first
    pub async fn list_links(&self) -> Result<Vec<Link>> {
        self.storage.list_links().await
    }

    pub async fn get_link(&self, code: &str) -> Result<Option<Link>> {
        if !is_valid_short_code(code) {
            return Ok(None);
        }
        self.storage.get_link(code).await
    }
}

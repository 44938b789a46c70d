use std::time::Duration;

use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use tokio::time::sleep;

use crate::{
    Error, Res,
    types::{Message, RateLimitBody, SearchResponse},
    utils, warning,
};

/// Results per search page. Fixed by Discord.
pub const PAGE_SIZE: u64 = 25;

/// Requests per page before a run of 429 responses becomes fatal.
pub const MAX_ATTEMPTS: u32 = 15;

/// Wait used when a 429 body carries no usable `retry_after`.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(5);

/// Client for `GET /guilds/{id}/messages/search`.
pub struct SearchClient {
    client: Client,
    api_url: String,
    token: String,
}

impl SearchClient {
    /// Creates a search client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] when `token` is `None`. No request
    /// is made in that case.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Res<Self> {
        let token = token.ok_or(Error::MissingCredential("DISCORD_BEARER_TOKEN"))?;
        let api_url = api_url.into().trim_end_matches('/').to_string();

        Ok(SearchClient {
            client: utils::http_client()?,
            api_url,
            token,
        })
    }

    /// Returns every message of `server_id` matching `query`, across all pages.
    ///
    /// Pages are requested one after another in ascending offset order and
    /// their messages are concatenated in that order.
    pub async fn search(&self, server_id: &str, query: &str) -> Res<Vec<Message>> {
        let first = self.fetch_page(server_id, query, 0).await?;
        let total = first.total_results;
        let mut messages = messages_from_page(first);

        let offsets: Vec<u64> = page_offsets(total).collect();
        if offsets.is_empty() {
            return Ok(messages);
        }

        let pages_total = offsets.len() + 1;
        let pb = utils::spinner(format!("Searching messages (1/{})", pages_total));

        for (index, offset) in offsets.into_iter().enumerate() {
            let page = match self.fetch_page(server_id, query, offset).await {
                Ok(page) => page,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            };
            messages.extend(messages_from_page(page));
            pb.set_message(format!(
                "Searching messages ({page}/{pages_total}), {count} found",
                page = index + 2,
                count = messages.len(),
            ));
        }

        pb.finish_and_clear();
        Ok(messages)
    }

    /// Requests one page, sleeping and retrying the same offset on 429.
    async fn fetch_page(&self, server_id: &str, query: &str, offset: u64) -> Res<SearchResponse> {
        let url = format!(
            "{uri}/guilds/{server_id}/messages/search",
            uri = self.api_url,
            server_id = server_id
        );
        let offset_param = offset.to_string();

        let mut attempt: u32 = 1;
        loop {
            let response = self
                .client
                .get(&url)
                .header(AUTHORIZATION, &self.token)
                .query(&[("content", query), ("offset", offset_param.as_str())])
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt >= MAX_ATTEMPTS {
                    return Err(Error::RateLimitExhausted {
                        offset,
                        attempts: attempt,
                    });
                }

                let body = response.text().await.unwrap_or_default();
                let delay = retry_delay(&body);
                warning!(
                    "Rate limited on attempt {} for offset {}, retrying after {:.2} seconds...",
                    attempt,
                    offset,
                    delay.as_secs_f64()
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                return Err(Error::from_response(response).await);
            }

            return Ok(response.json::<SearchResponse>().await?);
        }
    }
}

/// Offsets of the pages following the first one: `25, 50, ...` below `total`.
pub fn page_offsets(total: u64) -> impl Iterator<Item = u64> {
    (PAGE_SIZE..total).step_by(PAGE_SIZE as usize)
}

/// How long to wait after a 429 with the given body.
///
/// Falls back to [`DEFAULT_RETRY_AFTER`] when the body is not JSON, has no
/// `retry_after`, or the value is negative or not finite.
pub fn retry_delay(body: &str) -> Duration {
    serde_json::from_str::<RateLimitBody>(body)
        .ok()
        .and_then(|b| b.retry_after)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

/// Unwraps the single-element groups Discord nests each hit in.
fn messages_from_page(page: SearchResponse) -> Vec<Message> {
    page.messages
        .into_iter()
        .filter_map(|group| group.into_iter().next())
        .filter_map(|raw| match Message::from_raw(raw) {
            Ok(message) => Some(message),
            Err(e) => {
                warning!("Skipping malformed search result: {}", e);
                None
            }
        })
        .collect()
}

//! # Discord Integration Module
//!
//! Read-only access to Discord's guild message search, the only Discord
//! endpoint spotsync needs.
//!
//! The search endpoint is not part of the documented bot API and only
//! accepts a personal user token, which is sent verbatim in the
//! `Authorization` header.
//!
//! ## Pagination
//!
//! Search results come in fixed pages of 25. The first response reports
//! `total_results`, from which the remaining offsets (`25, 50, ...`) are
//! computed up front.
//!
//! ## Rate Limiting
//!
//! Discord answers bursts of search requests with `429 Too Many Requests`
//! and a JSON body carrying `retry_after` in (fractional) seconds. The client
//! sleeps for that long and repeats the same page, up to
//! [`search::MAX_ATTEMPTS`] requests per page. Any other failure status ends
//! the search immediately.

pub mod search;

pub use search::SearchClient;

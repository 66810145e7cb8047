// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Blocking HTTP client for the earthquake feed.

use super::{parse_feed, FeedError, FeedSource, FeedSummary};
use log::info;
use std::time::Duration;

/// Fetches one feed. There is no retry. The default client has no timeout
/// (reqwest's own 30 s default is switched off), so a request that never
/// completes simply never yields a result.
#[derive(Debug)]
pub struct FeedClient {
    http: reqwest::blocking::Client,
    source: FeedSource,
    timeout: Option<Duration>,
}

impl FeedClient {
    pub fn new(source: FeedSource) -> Result<Self, FeedError> {
        Self::with_timeout(source, None)
    }

    /// Client whose whole request is bounded by `timeout`, or unbounded for `None`.
    pub fn with_timeout(
        source: FeedSource,
        timeout: Option<Duration>,
    ) -> Result<Self, FeedError> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            source,
            timeout,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Perform the GET and parse the body.
    pub fn fetch(&self) -> Result<FeedSummary, FeedError> {
        let url = self.source.url();
        info!("Fetching earthquake feed: {url}");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text()?;
        let summary = parse_feed(&body)?;

        info!(
            "Earthquake feed loaded: {} events ({} skipped)",
            summary.len(),
            summary.skipped
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_refused_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let source = FeedSource::Url("http://127.0.0.1:9/all_day.geojson".to_string());
        let client = FeedClient::new(source).unwrap();
        let result = client.fetch();
        assert!(matches!(result, Err(FeedError::Network(_))));
    }

    #[test]
    fn test_client_keeps_source() {
        let client = FeedClient::new(FeedSource::all_day()).unwrap();
        assert_eq!(client.source(), &FeedSource::all_day());
    }

    #[test]
    fn test_default_client_has_no_timeout() {
        let client = FeedClient::new(FeedSource::all_day()).unwrap();
        assert_eq!(client.timeout(), None);
    }

    #[test]
    fn test_timeout_applies_to_silent_server() {
        use std::net::TcpListener;
        use std::time::Instant;

        // Accepts connections but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        std::thread::spawn(move || {
            let _held: Vec<_> = listener.incoming().take(1).collect();
            std::thread::sleep(Duration::from_secs(5));
        });

        let source = FeedSource::Url(format!("http://127.0.0.1:{port}/all_day.geojson"));
        let client = FeedClient::with_timeout(source, Some(Duration::from_millis(300))).unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_millis(300)));

        let started = Instant::now();
        let result = client.fetch();
        assert!(matches!(result, Err(FeedError::Network(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later

use dotenvy::var;
use std::{sync::OnceLock, time::Duration};

// NOTE - if these values change make sure the documentation in
// `.env.template` matches...
const DEFAULT_API_VERSION: &str = "v9.2";
const DEFAULT_SETTLE_TIMEOUT_MS: &str = "5000";
const DEFAULT_SETTLE_INTERVAL_MS: &str = "400";
const DEFAULT_LOOKUP_BATCH_LEN: &str = "10";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "60";

static CONFIG: OnceLock<Config> = OnceLock::new();
/// This crate's configuration Singleton.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// A structure that provides the current configuration settings.
#[derive(Debug)]
pub struct Config {
    /// Web API version segment used when building endpoint URLs.
    pub api_version: String,
    /// How long to keep polling the form-document endpoint after a language
    /// switch before giving up (best effort).
    pub settle_timeout: Duration,
    /// Pause between two settle-poll probes.
    pub settle_interval: Duration,
    /// Upper bound on concurrent side-lookups (user names, display names).
    pub lookup_batch_len: usize,
    /// Overall per-request timeout handed to the HTTP client.
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let api_version = var("DVL_API_VERSION").unwrap_or(DEFAULT_API_VERSION.to_string());

        let settle_timeout = Duration::from_millis(
            var("DVL_SETTLE_TIMEOUT_MS")
                .unwrap_or(DEFAULT_SETTLE_TIMEOUT_MS.to_string())
                .parse()
                .expect("Failed parsing DVL_SETTLE_TIMEOUT_MS"),
        );
        let settle_interval = Duration::from_millis(
            var("DVL_SETTLE_INTERVAL_MS")
                .unwrap_or(DEFAULT_SETTLE_INTERVAL_MS.to_string())
                .parse()
                .expect("Failed parsing DVL_SETTLE_INTERVAL_MS"),
        );

        let lookup_batch_len: usize = var("DVL_LOOKUP_BATCH_LEN")
            .unwrap_or(DEFAULT_LOOKUP_BATCH_LEN.to_string())
            .parse()
            .expect("Failed parsing DVL_LOOKUP_BATCH_LEN");
        // ensure it's greater than 0 justin case...
        assert!(lookup_batch_len > 0, "DVL_LOOKUP_BATCH_LEN must be greater than 0");

        let http_timeout = Duration::from_secs(
            var("DVL_HTTP_TIMEOUT_SECS")
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .expect("Failed parsing DVL_HTTP_TIMEOUT_SECS"),
        );

        Self {
            api_version,
            settle_timeout,
            settle_interval,
            lookup_batch_len,
            http_timeout,
        }
    }
}

impl Config {
    /// Construct the Web API root for a given org base URL; e.g.
    /// `https://org.crm.dynamics.com` -> `https://org.crm.dynamics.com/api/data/v9.2`.
    pub fn api_root(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        format!("{}/api/data/{}", base, self.api_version)
    }
}

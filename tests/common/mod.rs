//! Common test utilities and logging infrastructure
//!
//! Integration tests share one tracing subscriber. The library logs through
//! the `log` facade; `try_init` also installs the `log` bridge, so construction
//! diagnostics (anchors, padding, span clipping) show up next to the test's
//! own tracing output.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=tabmark::row=trace` - Module-specific tracing
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing

#![allow(dead_code)]

pub mod assertions;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Idempotent; output goes to the test writer, so it is captured unless
/// `--nocapture` is passed.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tabmark=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A test span guard that logs entry.
///
/// ```rust,ignore
/// let _setup = test_phase("setup");
/// // setup code...
/// drop(_setup);
///
/// let _verify = test_phase("verify");
/// ```
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Log test context information.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

/// Text between `>` and `<` for every rendered HTML cell of every row.
///
/// Rows are split on `<tr>`; the wrapping `<table>` line is dropped.
pub fn html_cell_texts(html: &str) -> Vec<Vec<String>> {
    let row_split = regex::Regex::new(r"<\s*tr\s*>").expect("valid regex");
    let cell_text = regex::Regex::new(r"<t[dh][^>]*>(.*?)</t[dh]>").expect("valid regex");
    row_split
        .split(html)
        .skip(1)
        .map(|row| {
            cell_text
                .captures_iter(row)
                .map(|caps| caps[1].to_string())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_html_cell_texts() {
        let html = "<table>\n<tr><th>a</th><td colspan=\"2\"> 1</td></tr>\n</table>";
        assert_eq!(html_cell_texts(html), vec![vec!["a", " 1"]]);
    }
}

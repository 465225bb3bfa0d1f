//! Tracing setup for the binary.
//!
//! Logs go to stderr so stdout carries only the JSON reply.
//!
//! Environment variables:
//!   RUST_LOG    - filter directives (default: `regolo=info,regolo_cli=info,regolo_core=warn`)
//!   LOG_FORMAT  - "json" or "text" (default: "text")

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "regolo=info,regolo_cli=info,regolo_core=warn";

pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

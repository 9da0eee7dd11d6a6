// src/lib.rs
// =============================================================================
// seo-guardian: an SEO health checker plus the small scheduling and analytics
// helpers it is built with.
//
// Modules:
// - checker: robots.txt / sitemap.xml / page metadata checks and scoring
// - crawl: picks the sample pages to check
// - report: the health report and its text, CSV, HTML and JSON renderers
// - scheduler: defer, idle callbacks, debounce, throttle, chunked work
// - analytics: event tracker fanning out to injected providers
// - cli / logging: the command-line front end
// =============================================================================

#![forbid(unsafe_code)]

pub mod analytics;
pub mod checker;
pub mod cli;
pub mod crawl;
pub mod logging;
pub mod report;
pub mod scheduler;

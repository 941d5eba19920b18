// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl traversal: fetch a page, record it,
// extract and classify its links, then descend into the accepted ones.
//
// How it works:
// 1. Start with the root URL on a work stack
// 2. Pop a URL; skip it if already visited, otherwise mark it visited
// 3. Fetch the page (failures log and abandon that branch only)
// 4. Record a PageRecord for the page - even one with zero outgoing links
// 5. Classify every extracted link; push accepted ones in reverse so the
//    stack visits them in document order
//
// The explicit stack replaces native recursion (no unbounded call-stack
// growth on deep sites) but visits pages in the same depth-first order a
// recursive descent would: a link's whole subtree is explored before its
// next sibling.
//
// The visited set means each URL is fetched at most once, so link cycles
// terminate. The set is keyed on the normalized absolute URL (trailing '/'
// stripped), the same form the records use.
// =============================================================================

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use url::Url;

use crate::crawl::fetch::PageFetcher;
use crate::links::{classify, extract_links, Classification};
use crate::run_log::RunLog;

// One successfully fetched page, destined for the sitemap
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Absolute URL in canonical form (no trailing slash)
    pub url: String,
    /// Wall-clock time the fetch completed
    pub discovered_at: DateTime<Local>,
    /// Advisory change-frequency hint for search engines
    pub change_frequency: ChangeFrequency,
}

// The <changefreq> vocabulary from the sitemap schema
//
// Current policy assigns Daily to every page; the other variants exist so
// the sitemap vocabulary is spelled out in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    // The lower-case form the XML schema expects
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

// Drives one crawl and owns all of its state
//
// Everything the traversal needs travels in this struct: the fetcher
// capability, the log sink, the cancellation flag, the visited set and the
// growing record collection. No globals.
pub struct Crawler<'a, F: PageFetcher> {
    fetcher: &'a F,
    root: Url,
    log: &'a mut RunLog,
    cancelled: &'a AtomicBool,
    visited: HashSet<String>,
    records: Vec<PageRecord>,
}

impl<'a, F: PageFetcher> Crawler<'a, F> {
    pub fn new(
        fetcher: &'a F,
        root: Url,
        log: &'a mut RunLog,
        cancelled: &'a AtomicBool,
    ) -> Self {
        Self {
            fetcher,
            root,
            log,
            cancelled,
            visited: HashSet::new(),
            records: Vec::new(),
        }
    }

    // Runs the traversal to completion and hands back the records
    //
    // The crawl never fails as a whole: fetch errors cost their branch,
    // classification rejects cost a log line, and cancellation stops the
    // traversal without touching the records already collected.
    pub async fn crawl(mut self) -> Vec<PageRecord> {
        let mut pending = vec![normalize(&self.root)];

        while let Some(url) = pending.pop() {
            // Cooperative cancellation, checked before every fetch
            if self.cancelled.load(Ordering::Relaxed) {
                self.log.log("Crawl cancelled, stopping traversal.");
                break;
            }

            // At most one fetch per URL - this is what makes cycles terminate
            if !self.visited.insert(url.clone()) {
                continue;
            }

            self.log.log(&format!("Crawling {url}"));

            let html = match self.fetcher.fetch_page(&url).await {
                Ok(html) => html,
                Err(e) => {
                    self.log.error(&format!("Error crawling {url} - {e:#}"));
                    continue;
                }
            };

            // Extraction parses the HTML in one synchronous pass; the parsed
            // tree never lives across an await point
            let links = dedup_preserving_order(extract_links(&html));

            // A successful fetch always produces a record, even for a page
            // with zero outgoing links
            self.records.push(PageRecord {
                url: url.clone(),
                discovered_at: Local::now(),
                change_frequency: ChangeFrequency::Daily,
            });

            // The visited set only holds URLs this same code normalized,
            // so they re-parse; if one somehow doesn't, its links are lost
            // but the record above stands
            let Ok(page_url) = Url::parse(&url) else {
                continue;
            };

            let mut accepted = Vec::new();
            for link in links {
                match classify(&link, &page_url, &self.root) {
                    Classification::Accepted(next) => {
                        if !self.visited.contains(&next) {
                            accepted.push(next);
                        }
                    }
                    Classification::Rejected(reason) => {
                        self.log
                            .log(&format!("Skipping link '{link}' because {}", reason.describe()));
                    }
                }
            }

            // Reversed so the stack pops them in document order - the visit
            // order matches a depth-first recursive descent
            for next in accepted.into_iter().rev() {
                pending.push(next);
            }
        }

        self.records
    }
}

// Canonical form shared by the visited set and the records
fn normalize(url: &Url) -> String {
    url.to_string().trim_end_matches('/').to_string()
}

// Exact-string dedup that keeps the first occurrence in place
fn dedup_preserving_order(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links.into_iter().filter(|link| seen.insert(link.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use anyhow::anyhow;
    use async_trait::async_trait;

    // Serves canned pages from a map; anything else is a 404
    struct FakeFetcher {
        pages: HashMap<String, String>,
    }

    impl FakeFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch_page(&self, url: &str) -> anyhow::Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP 404 Not Found"))
        }
    }

    async fn crawl_fake(root: &str, pages: &[(&str, &str)]) -> Vec<PageRecord> {
        let fetcher = FakeFetcher::new(pages);
        let mut log = RunLog::new();
        let cancelled = AtomicBool::new(false);
        let root = Url::parse(root).unwrap();
        Crawler::new(&fetcher, root, &mut log, &cancelled).crawl().await
    }

    fn urls(records: &[PageRecord]) -> Vec<&str> {
        records.iter().map(|r| r.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_out_of_scope_links_are_skipped() {
        // Seed page links to a same-host page and a foreign host; only the
        // first is followed
        let records = crawl_fake(
            "https://site.test/",
            &[
                (
                    "https://site.test",
                    r#"<a href="/a.html">a</a><a href="https://other.test/x">x</a>"#,
                ),
                ("https://site.test/a.html", "<p>leaf</p>"),
            ],
        )
        .await;

        assert_eq!(urls(&records), vec!["https://site.test", "https://site.test/a.html"]);
    }

    #[tokio::test]
    async fn test_page_with_no_links_yields_its_own_record() {
        let records = crawl_fake("https://site.test/", &[("https://site.test", "<p>hi</p>")]).await;
        assert_eq!(urls(&records), vec!["https://site.test"]);
    }

    #[tokio::test]
    async fn test_link_cycles_terminate() {
        let records = crawl_fake(
            "https://site.test/",
            &[
                ("https://site.test", r#"<a href="/a">a</a>"#),
                ("https://site.test/a", r#"<a href="/">root</a><a href="https://site.test/">root</a>"#),
            ],
        )
        .await;

        // "/" is rejected outright; the absolute self-reference hits the
        // visited set. Either way the crawl ends with exactly two records.
        assert_eq!(urls(&records), vec!["https://site.test", "https://site.test/a"]);
    }

    #[tokio::test]
    async fn test_traversal_is_depth_first_in_document_order() {
        let records = crawl_fake(
            "https://site.test/",
            &[
                ("https://site.test", r#"<a href="/a">a</a><a href="/b">b</a>"#),
                ("https://site.test/a", r#"<a href="/a/child">child</a>"#),
                ("https://site.test/a/child", "<p>leaf</p>"),
                ("https://site.test/b", "<p>leaf</p>"),
            ],
        )
        .await;

        // a's subtree is exhausted before b is visited
        assert_eq!(
            urls(&records),
            vec![
                "https://site.test",
                "https://site.test/a",
                "https://site.test/a/child",
                "https://site.test/b",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_abandons_only_that_branch() {
        let records = crawl_fake(
            "https://site.test/",
            &[
                (
                    "https://site.test",
                    r#"<a href="/missing">gone</a><a href="/b">b</a>"#,
                ),
                ("https://site.test/b", "<p>leaf</p>"),
            ],
        )
        .await;

        // /missing 404s: no record for it, but /b is still crawled
        assert_eq!(urls(&records), vec!["https://site.test", "https://site.test/b"]);
    }

    #[tokio::test]
    async fn test_cancellation_stops_before_the_first_fetch() {
        let fetcher = FakeFetcher::new(&[("https://site.test", "<p>hi</p>")]);
        let mut log = RunLog::new();
        let cancelled = AtomicBool::new(true);
        let root = Url::parse("https://site.test/").unwrap();

        let records = Crawler::new(&fetcher, root, &mut log, &cancelled).crawl().await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_records_carry_the_daily_policy() {
        let records = crawl_fake("https://site.test/", &[("https://site.test", "")]).await;
        assert_eq!(records[0].change_frequency, ChangeFrequency::Daily);
    }
}

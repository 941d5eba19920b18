// src/sitemap/writer.rs
// =============================================================================
// This module assembles and writes sitemap.xml.
//
// Steps:
// 1. Deduplicate the records by URL - stable, first occurrence wins, so the
//    output order is deterministic
// 2. Resolve where the file goes: "." (or nothing) means the current
//    directory; anything else must be a directory that already exists.
//    Resolution failure is a hard failure for this step and happens before
//    a single byte is written
// 3. Serialize with quick-xml: declaration, <urlset> under the sitemaps.org
//    namespace, one <url> with <loc>/<lastmod>/<changefreq> per record
// 4. Write the whole rendered document in one call
//
// The crawl's records live in memory either way - a failed write loses the
// file, never the crawl.
// =============================================================================

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::crawl::PageRecord;
use crate::run_log::RunLog;

const SITEMAP_XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const SITEMAP_FILE_NAME: &str = "sitemap.xml";

// Assembles the records into sitemap.xml at the hinted location
//
// Parameters:
//   records: everything the crawl collected (may contain duplicate URLs)
//   path_hint: directory to write into; None/""/"." = current directory
//
// Returns the path of the written file, or the error that stopped us.
pub async fn write_sitemap(
    records: &[PageRecord],
    path_hint: Option<&str>,
    log: &mut RunLog,
) -> Result<PathBuf> {
    let entries = dedup_by_url(records);
    let path = resolve_output_path(path_hint)?;

    log.log(&format!("Saving sitemap to file {}", path.display()));

    let xml = render(&entries)?;
    tokio::fs::write(&path, xml)
        .await
        .with_context(|| format!("could not write {}", path.display()))?;

    Ok(path)
}

// Stable dedup: keeps the first record for each URL, in insertion order
fn dedup_by_url(records: &[PageRecord]) -> Vec<&PageRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.url.as_str()))
        .collect()
}

// Turns the path hint into <dir>/sitemap.xml
//
// The directory must already exist - we refuse to create it, because a
// typo'd --path silently creating directories is worse than failing.
fn resolve_output_path(hint: Option<&str>) -> Result<PathBuf> {
    let dir = match hint {
        None | Some("") | Some(".") => {
            env::current_dir().context("could not determine the current directory")?
        }
        Some(dir) => {
            let dir = PathBuf::from(dir.trim_end_matches('/'));
            if !dir.is_dir() {
                bail!("sitemap path '{}' is not an existing directory", dir.display());
            }
            dir
        }
    };
    Ok(dir.join(SITEMAP_FILE_NAME))
}

// Renders the full XML document into a byte buffer
fn render(entries: &[&PageRecord]) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_XMLNS));
    writer.write_event(Event::Start(urlset))?;

    for record in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        text_element(&mut writer, "loc", &record.url)?;
        text_element(
            &mut writer,
            "lastmod",
            &record.discovered_at.format("%Y-%m-%d").to_string(),
        )?;
        text_element(&mut writer, "changefreq", record.change_frequency.as_str())?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    Ok(writer.into_inner())
}

// Writes <tag>text</tag>; quick-xml escapes the text for us
fn text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

//! Markdown-backed informational pages (about, returns, privacy).
//!
//! Pages live under `content/pages/*.md` with YAML frontmatter and are
//! loaded once at startup; editing a page means editing a markdown file
//! and restarting, the same workflow as the image catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Frontmatter for a static page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// A rendered page with metadata and HTML content.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// In-memory store of every loaded page, keyed by slug.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Load all pages from `content_dir/pages`.
    ///
    /// A missing directory loads as an empty store; a page that fails to
    /// parse is logged and skipped rather than blocking startup.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let dir = content_dir.join("pages");
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(Self {
                pages: Arc::new(pages),
            });
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| ContentError::Io(e.to_string()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}", page.slug);
                        pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_owned()))?
            .to_owned();

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PageMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_owned()))?;

        let content_html = render_markdown(&parsed.content);

        Ok(Page {
            slug,
            meta,
            content_html,
        })
    }

    /// Get a page by slug.
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }
}

/// Render markdown to HTML with a conservative option set.
fn render_markdown(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(markdown, &options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = "---\ntitle: Returns\ndescription: Our returns policy\nupdated_at: 2025-06-01\n---\n\n## All sales final\n\nHijabs are personal garments, so we cannot accept returns.\n";

    fn write_pages(dir: &Path, files: &[(&str, &str)]) {
        let pages = dir.join("pages");
        std::fs::create_dir_all(&pages).unwrap();
        for (name, body) in files {
            std::fs::write(pages.join(name), body).unwrap();
        }
    }

    #[test]
    fn test_load_page_with_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        write_pages(dir.path(), &[("returns.md", SAMPLE)]);

        let store = ContentStore::load(dir.path()).unwrap();
        let page = store.get_page("returns").unwrap();
        assert_eq!(page.meta.title, "Returns");
        assert_eq!(
            page.meta.updated_at,
            Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
        assert!(page.content_html.contains("<h2>"));
    }

    #[test]
    fn test_missing_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::load(&dir.path().join("nope")).unwrap();
        assert!(store.get_page("about").is_none());
    }

    #[test]
    fn test_broken_page_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_pages(
            dir.path(),
            &[("about.md", SAMPLE), ("broken.md", "no frontmatter here")],
        );

        let store = ContentStore::load(dir.path()).unwrap();
        assert!(store.get_page("about").is_some());
        assert!(store.get_page("broken").is_none());
    }
}

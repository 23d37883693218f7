use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    render::escape_html,
};

/// The four regions the app writes into: the category select control, the
/// results container, the error container and the busy overlay.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub category_options: String,
    pub results: String,
    /// plain text, escaped when the document is built
    pub error: String,
    pub busy: bool,
    pub selector_focused: bool,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn focus_selector(&mut self) {
        self.selector_focused = true;
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn to_html(&self) -> String {
        let overlay = if self.busy { "overlay active" } else { "overlay" };
        let autofocus = if self.selector_focused {
            " autofocus"
        } else {
            ""
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>Cat Gallery</title>
</head>
<body>
<form class="search">
<select class="search--category--select" name="category"{autofocus}>{options}</select>
</form>
<div class="error--container">{error}</div>
<main class="cat-card-container">{results}</main>
<div class="{overlay}"></div>
</body>
</html>
"#,
            options = self.category_options,
            error = escape_html(&self.error),
            results = self.results,
        )
    }

    pub async fn save(&self, path: &Path) -> AppResult<()> {
        tokio::fs::write(path, self.to_html())
            .await
            .map_err(|e| AppError::Storage(format!("fail to write page {}: {e}", path.display())))?;
        log::debug!("saved page to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_overlay_class() {
        let mut page = Page::new();
        assert!(page.to_html().contains(r#"<div class="overlay"></div>"#));
        page.set_busy(true);
        assert!(page.to_html().contains(r#"<div class="overlay active"></div>"#));
    }

    #[test]
    fn test_error_is_escaped() {
        let mut page = Page::new();
        page.error = "<b>bad</b>".to_string();
        let html = page.to_html();
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(page.has_error());
    }

    #[test]
    fn test_focus_marks_selector() {
        let mut page = Page::new();
        page.focus_selector();
        assert!(page.to_html().contains(r#"name="category" autofocus>"#));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_save_writes_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        Page::new().save(&path).await.unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.starts_with("<!DOCTYPE html>"));
    }
}

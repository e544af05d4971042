use super::field::{Locator, locate};
use crate::browser::Browser;
use indexmap::IndexMap;
use std::time::Duration;
use tracing::{info, warn};

/// Document links keyed by category, in anchor discovery order.
pub type Documents = IndexMap<String, Option<String>>;

/// Where a site keeps the attached documents of a listing.
#[derive(Debug, Clone, Copy)]
pub struct DocumentLayout {
    /// Affordance that reveals the documents; `None` when they are inline.
    pub trigger: Option<Locator>,
    /// Container that holds the document anchors once revealed.
    pub container: &'static str,
    pub anchors: &'static str,
    /// Leading anchors in the container that are not documents.
    pub skip: usize,
    pub categories: &'static [&'static str],
}

/// Zips anchors onto category names by position.
///
/// Anchors past the end of `categories` are named `Documento {n}` after
/// their 1-based position; categories without an anchor are left out.
pub fn assign_categories(hrefs: Vec<Option<String>>, categories: &[&str]) -> Documents {
    hrefs
        .into_iter()
        .enumerate()
        .map(|(i, href)| {
            let name = match categories.get(i) {
                Some(name) => name.to_string(),
                None => format!("Documento {}", i + 1),
            };
            (name, href)
        })
        .collect()
}

/// Opens the documents affordance (if the site has one) and maps the
/// anchors it reveals onto the layout's categories.
///
/// Never fails: a missing trigger or container yields an empty mapping.
pub async fn resolve<B: Browser>(browser: &B, layout: &DocumentLayout, wait: Duration) -> Documents {
    if let Some(trigger) = &layout.trigger {
        let button = match locate(browser, trigger).await {
            Ok(button) => button,
            Err(e) => {
                info!("No documents affordance: {}", e);
                return Documents::new();
            }
        };
        if let Err(e) = browser.click(&button).await {
            warn!("Could not open documents: {}", e);
            return Documents::new();
        }
    }

    let container = match browser.wait_for(layout.container, wait).await {
        Ok(container) => container,
        Err(e) => {
            warn!("Documents container never appeared: {}", e);
            return Documents::new();
        }
    };
    let anchors = match browser.find_all_in(&container, layout.anchors).await {
        Ok(anchors) => anchors,
        Err(e) => {
            warn!("Could not list document links: {}", e);
            return Documents::new();
        }
    };

    let mut hrefs = Vec::with_capacity(anchors.len());
    for anchor in anchors.iter().skip(layout.skip) {
        let href = browser.attr(anchor, "href").await.ok().flatten();
        hrefs.push(href.filter(|h| !h.trim().is_empty()));
    }
    let documents = assign_categories(hrefs, layout.categories);
    for (name, href) in &documents {
        info!("  {:30}: {}", name, href.as_deref().unwrap_or("-"));
    }
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::SnapshotBrowser;
    use pretty_assertions::assert_eq;

    const URL: &str = "https://site.test/lote";

    const MODAL: DocumentLayout = DocumentLayout {
        trigger: Some(Locator::TextContains { css: "a, button", needle: "documentos" }),
        container: ".modal-body-doc",
        anchors: "a",
        skip: 0,
        categories: &["Matrícula", "Laudo"],
    };

    async fn page(html: &str) -> SnapshotBrowser {
        let mut browser = SnapshotBrowser::new().with_page(URL, html);
        browser.goto(URL).await.unwrap();
        browser
    }

    fn docs(pairs: &[(&str, Option<&str>)]) -> Documents {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_positional_assignment_with_overflow() {
        let hrefs = vec![Some("A".into()), Some("B".into()), Some("C".into())];

        let mapped = assign_categories(hrefs, &["X", "Y"]);

        assert_eq!(
            mapped,
            docs(&[("X", Some("A")), ("Y", Some("B")), ("Documento 3", Some("C"))])
        );
        assert_eq!(
            mapped.keys().collect::<Vec<_>>(),
            vec!["X", "Y", "Documento 3"]
        );
    }

    #[test]
    fn test_missing_anchors_leave_categories_out() {
        let mapped = assign_categories(vec![Some("A".into())], &["X", "Y", "Z"]);

        assert_eq!(mapped, docs(&[("X", Some("A"))]));
        assert!(!mapped.contains_key("Y"));
    }

    #[tokio::test]
    async fn test_modal_documents() {
        let browser = page(
            r##"<a href="#">Ver Documentos</a>
               <div class="modal-body-doc">
                 <a href="/m.pdf">1</a><a href="/l.pdf">2</a><a>3</a><a href=" ">4</a>
               </div>"##,
        )
        .await;

        let mapped = resolve(&browser, &MODAL, Duration::ZERO).await;

        assert_eq!(
            mapped,
            docs(&[
                ("Matrícula", Some("https://site.test/m.pdf")),
                ("Laudo", Some("https://site.test/l.pdf")),
                ("Documento 3", None),
                ("Documento 4", None),
            ])
        );
    }

    #[tokio::test]
    async fn test_no_trigger_means_no_documents() {
        let browser = page(r#"<div class="modal-body-doc"><a href="/m.pdf">1</a></div>"#).await;

        assert!(resolve(&browser, &MODAL, Duration::ZERO).await.is_empty());
    }

    #[tokio::test]
    async fn test_container_missing_means_no_documents() {
        let browser = page(r#"<button>DOCUMENTOS</button>"#).await;

        assert!(resolve(&browser, &MODAL, Duration::ZERO).await.is_empty());
    }

    #[tokio::test]
    async fn test_inline_documents_skip_leading_anchor() {
        const INLINE: DocumentLayout = DocumentLayout {
            trigger: None,
            container: "div.docs",
            anchors: "a",
            skip: 1,
            categories: &["Edital", "Laudo de Avaliação", "Matricula"],
        };
        let browser = page(
            r#"<div class="docs"><a href="/fotos">Fotos</a><a href="/e.pdf">Edital</a><a href="/l.pdf">Laudo</a></div>"#,
        )
        .await;

        let mapped = resolve(&browser, &INLINE, Duration::ZERO).await;

        assert_eq!(
            mapped,
            docs(&[
                ("Edital", Some("https://site.test/e.pdf")),
                ("Laudo de Avaliação", Some("https://site.test/l.pdf")),
            ])
        );
    }
}

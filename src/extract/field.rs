use crate::browser::{Browser, BrowserError};
use crate::text::fold;
use thiserror::Error;

/// How to find one element on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// First element matching a CSS selector.
    Css(&'static str),
    /// First element matching `css` whose text contains `needle`,
    /// ignoring case and accents.
    TextContains {
        css: &'static str,
        needle: &'static str,
    },
}

/// What to read from a located element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Text,
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub locator: Locator,
    pub target: Target,
}

impl Strategy {
    pub const fn text(locator: Locator) -> Self {
        Self {
            locator,
            target: Target::Text,
        }
    }

    pub const fn attr(locator: Locator, name: &'static str) -> Self {
        Self {
            locator,
            target: Target::Attr(name),
        }
    }
}

/// Ordered fallback chain of strategies for one logical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub strategies: &'static [Strategy],
}

impl FieldSpec {
    pub const fn new(name: &'static str, strategies: &'static [Strategy]) -> Self {
        Self { name, strategies }
    }
}

/// No strategy of a field produced a value.
#[derive(Debug, Clone, Error)]
#[error("{field}: no value from {tried} strategies (last: {last})")]
pub struct FieldAbsent {
    pub field: &'static str,
    pub tried: usize,
    pub last: BrowserError,
}

/// Resolves a locator against the current page.
pub async fn locate<B: Browser>(browser: &B, locator: &Locator) -> Result<B::Element, BrowserError> {
    match *locator {
        Locator::Css(css) => browser.find(css).await,
        Locator::TextContains { css, needle } => {
            let needle = fold(needle);
            for element in browser.find_all(css).await? {
                if fold(&browser.text(&element).await?).contains(&needle) {
                    return Ok(element);
                }
            }
            Err(BrowserError::NotFound(format!("{css} containing '{needle}'")))
        }
    }
}

async fn attempt<B: Browser>(browser: &B, strategy: &Strategy) -> Result<String, BrowserError> {
    let element = locate(browser, &strategy.locator).await?;
    let value = match strategy.target {
        Target::Text => browser.text(&element).await?,
        Target::Attr(name) => browser
            .attr(&element, name)
            .await?
            .ok_or_else(|| BrowserError::NotFound(format!("@{name}")))?,
    };
    let value = value.trim();
    if value.is_empty() {
        return Err(BrowserError::NotFound(format!("{:?} (empty)", strategy.locator)));
    }
    Ok(value.to_string())
}

/// Tries each strategy once, in order, returning the first non-empty value.
pub async fn extract<B: Browser>(browser: &B, spec: &FieldSpec) -> Result<String, FieldAbsent> {
    let mut last = BrowserError::NotFound("no strategies".into());
    for (index, strategy) in spec.strategies.iter().enumerate() {
        match attempt(browser, strategy).await {
            Ok(value) => {
                if index > 0 {
                    tracing::debug!(field = spec.name, strategy = index + 1, "fallback matched");
                }
                return Ok(value);
            }
            Err(e) => last = e,
        }
    }
    Err(FieldAbsent {
        field: spec.name,
        tried: spec.strategies.len(),
        last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::SnapshotBrowser;
    use crate::browser::testing::CountingBrowser;

    const URL: &str = "https://site.test/lote";

    async fn page(html: &str) -> CountingBrowser<SnapshotBrowser> {
        let mut browser = SnapshotBrowser::new().with_page(URL, html);
        browser.goto(URL).await.unwrap();
        CountingBrowser::new(browser)
    }

    const CHAIN: FieldSpec = FieldSpec::new(
        "price",
        &[
            Strategy::text(Locator::Css(".line-through")),
            Strategy::text(Locator::Css("li.valor p")),
            Strategy::text(Locator::Css(".never-reached")),
        ],
    );

    #[tokio::test]
    async fn test_fallback_stops_at_first_match() {
        let browser = page(r#"<ul><li class="valor"><p> R$ 150.000,00 </p></li></ul><p class="never-reached">x</p>"#).await;

        let value = extract(&browser, &CHAIN).await.unwrap();

        assert_eq!(value, "R$ 150.000,00");
        assert_eq!(browser.count(".line-through"), 1);
        assert_eq!(browser.count("li.valor p"), 1);
        assert_eq!(browser.count(".never-reached"), 0);
    }

    #[tokio::test]
    async fn test_primary_wins_when_present() {
        let browser = page(r#"<s class="line-through">R$ 200.000,00</s><ul><li class="valor"><p>R$ 1</p></li></ul>"#).await;

        assert_eq!(extract(&browser, &CHAIN).await.unwrap(), "R$ 200.000,00");
        assert_eq!(browser.queries(), vec![".line-through".to_string()]);
    }

    #[tokio::test]
    async fn test_every_strategy_missing_is_absent() {
        let browser = page("<div>nothing here</div>").await;

        let err = extract(&browser, &CHAIN).await.unwrap_err();

        assert_eq!(err.field, "price");
        assert_eq!(err.tried, 3);
        assert_eq!(browser.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_text_falls_through() {
        let browser = page(r#"<s class="line-through">   </s><ul><li class="valor"><p>R$ 9</p></li></ul>"#).await;

        assert_eq!(extract(&browser, &CHAIN).await.unwrap(), "R$ 9");
    }

    #[tokio::test]
    async fn test_attribute_by_link_text_ignores_case_and_accents() {
        const NOTICE: FieldSpec = FieldSpec::new(
            "notice",
            &[Strategy::attr(Locator::TextContains { css: "a", needle: "edital" }, "href")],
        );
        let browser = page(r#"<a href="/a">Fotos</a><a href="/edital.pdf">Baixar ÉDITAL</a>"#).await;

        assert_eq!(
            extract(&browser, &NOTICE).await.unwrap(),
            "https://site.test/edital.pdf"
        );
    }

    #[tokio::test]
    async fn test_missing_attribute_is_absent() {
        const NOTICE: FieldSpec = FieldSpec::new(
            "notice",
            &[Strategy::attr(Locator::Css("a.edital"), "href")],
        );
        let browser = page(r#"<a class="edital">Edital</a>"#).await;

        assert!(extract(&browser, &NOTICE).await.is_err());
    }
}

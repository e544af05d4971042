use super::{ListingFields, Site, SiteLayout};
use crate::extract::documents::DocumentLayout;
use crate::extract::field::{FieldSpec, Locator, Strategy};
use crate::extract::status::CardLayout;
use std::time::Duration;

pub const DOCUMENTS: &[&str] = &["Edital", "Laudo de Avaliação", "Matricula"];

/// Strip of links under the lot: photos first, then the documents.
const DOCUMENT_STRIP: &str = "body > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(2)";

pub const LAYOUT: SiteLayout = SiteLayout {
    site: Site::Mega,
    search_url: "https://www.megaleiloes.com.br/imoveis?tov=igbr&valor_max=5000000&tipo%5B0%5D=1&pagina={page}",
    results_settle: Duration::from_secs(4),
    cards: CardLayout {
        card: r#"div[class*="col-sm-6 col-md-4 col-lg-3"]"#,
        status: r#"div[class*="card-status"]"#,
        link: r#"a[class*="card-title"]"#,
    },
    fields: ListingFields {
        title: FieldSpec::new(
            "title",
            &[Strategy::text(Locator::Css(r#"h1[class*="section-header"]"#))],
        ),
        auction_type: FieldSpec::new(
            "auction_type",
            &[Strategy::text(Locator::Css(r#"div[class*="batch-type"]"#))],
        ),
        process_number: FieldSpec::new(
            "process_number",
            &[Strategy::text(Locator::Css(
                "body > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(2) > div:nth-of-type(2) > div > div > div:nth-of-type(2) > div:nth-of-type(1) > div:nth-of-type(2) > a",
            ))],
        ),
        price: FieldSpec::new(
            "price",
            &[Strategy::text(Locator::Css(r#"div[class*="value"]"#))],
        ),
        notice: FieldSpec::new(
            "notice",
            &[
                Strategy::attr(
                    Locator::Css(
                        "body > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(3) > div:nth-of-type(2) > a:nth-of-type(2)",
                    ),
                    "href",
                ),
                Strategy::attr(Locator::TextContains { css: "a", needle: "edital" }, "href"),
            ],
        ),
        description: FieldSpec::new(
            "description",
            &[Strategy::text(Locator::Css(r#"div[class*="description"]"#))],
        ),
    },
    documents: DocumentLayout {
        trigger: None,
        container: DOCUMENT_STRIP,
        anchors: "a",
        skip: 1,
        categories: DOCUMENTS,
    },
};

use super::{ListingFields, Site, SiteLayout};
use crate::extract::documents::DocumentLayout;
use crate::extract::field::{FieldSpec, Locator, Strategy};
use crate::extract::status::CardLayout;
use std::time::Duration;

pub const DOCUMENTS: &[&str] = &[
    "Certidão de Matrícula",
    "Laudo de Avaliação",
    "Débitos Tributários",
    "Débito Exequendo/Condominial",
    "Manual de Participação",
];

pub const LAYOUT: SiteLayout = SiteLayout {
    site: Site::Alfa,
    search_url: "https://www.alfaleiloes.com/leiloes/?&page={page}&categoria=35&categoria=18&categoria=19&categoria=24&categoria=23&categoria=26&categoria=27&search=",
    results_settle: Duration::from_secs(5),
    cards: CardLayout {
        card: "div.cards-wrapper > div.home-leiloes-cards",
        status: ".card-status p",
        link: "a.btn-card",
    },
    fields: ListingFields {
        title: FieldSpec::new(
            "title",
            &[Strategy::text(Locator::Css(".title-lote-leiloes"))],
        ),
        auction_type: FieldSpec::new(
            "auction_type",
            &[Strategy::text(Locator::Css("#lotes > div:nth-of-type(1) > div > h1"))],
        ),
        // auction-house lots link the process; court lots print it in a paragraph
        process_number: FieldSpec::new(
            "process_number",
            &[
                Strategy::text(Locator::Css(
                    "#lotes > div:nth-of-type(1) > div > div:nth-of-type(4) > div:nth-of-type(1) > a",
                )),
                Strategy::text(Locator::Css(
                    "#lotes > div:nth-of-type(1) > div > div:nth-of-type(4) > div:nth-of-type(1) > p:nth-of-type(2)",
                )),
            ],
        ),
        price: FieldSpec::new(
            "price",
            &[
                Strategy::text(Locator::Css(".line-through")),
                Strategy::text(Locator::Css(
                    "body > div:nth-of-type(2) > section:nth-of-type(2) > div:nth-of-type(1) > div > div:nth-of-type(5) > ul > li:nth-of-type(3) > p",
                )),
            ],
        ),
        notice: FieldSpec::new(
            "notice",
            &[Strategy::attr(
                Locator::TextContains { css: "a", needle: "edital" },
                "href",
            )],
        ),
        description: FieldSpec::new("description", &[Strategy::text(Locator::Css(".content"))]),
    },
    documents: DocumentLayout {
        trigger: Some(Locator::TextContains { css: "a", needle: "documentos" }),
        container: ".modal-body-doc",
        anchors: "a",
        skip: 0,
        categories: DOCUMENTS,
    },
};

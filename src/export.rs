use crate::extract::ListingRecord;
use crate::sites::Site;
use crate::text::clean_cell;
use chrono::Local;
use clap::ValueEnum;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::Display;
use tracing::info;

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    #[default]
    Csv,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }
}

const COLUMNS: [&str; 10] = [
    "ID",
    "Site",
    "Título do Leilão",
    "Tipo de Leilão",
    "Número do Processo",
    "Valor do Imóvel",
    "Link do Edital",
    "Link do Imóvel",
    "Descrição do Lote",
    "Status",
];

/// `leiloes_<timestamp>.<ext>` inside `dir`.
pub fn default_path(dir: &Path, format: Format) -> PathBuf {
    dir.join(format!(
        "leiloes_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Document columns for the given sites, in site order, without repeats.
pub fn document_columns(sites: &[Site]) -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = Vec::new();
    for site in sites {
        for &name in site.layout().documents.categories {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }
    columns
}

fn cell(value: Option<&str>) -> String {
    value.map(clean_cell).unwrap_or_default()
}

/// Writes one row per record; missing values become empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    records: &[ListingRecord],
    documents: &[&str],
) -> color_eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = COLUMNS.to_vec();
    header.extend_from_slice(documents);
    wtr.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        let mut row = vec![
            format!("Imóvel {}", index + 1),
            record.site.to_string(),
            cell(record.title.as_deref()),
            cell(record.auction_type.as_deref()),
            cell(record.process_number.as_deref()),
            cell(record.price.as_deref()),
            cell(record.notice_url.as_deref()),
            cell(Some(&record.url)),
            cell(record.description.as_deref()),
            cell(Some(&record.status)),
        ];
        for name in documents {
            row.push(cell(record.documents.get(*name).and_then(|href| href.as_deref())));
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Saves `records` to `path` in the requested format.
pub fn save(
    path: &Path,
    format: Format,
    records: &[ListingRecord],
    sites: &[Site],
) -> color_eyre::Result<()> {
    let file = std::fs::File::create(path)?;
    match format {
        Format::Csv => write_csv(file, records, &document_columns(sites))?,
        Format::Json => serde_json::to_writer_pretty(file, records)?,
    }
    info!("Successfully saved {} listings to {}", records.len(), path.display());
    Ok(())
}

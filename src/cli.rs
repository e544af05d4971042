use crate::collect::PageLimit;
use crate::export::Format;
use crate::sites::Site;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Auction site to scrape; repeat to scrape several in order
    #[arg(short, long = "site", value_enum, required = true)]
    pub sites: Vec<Site>,

    /// Results pages per site, or `todas` for every page
    #[arg(short, long, value_name = "N|todas", default_value = "1")]
    pub pages: PageLimit,

    /// Output file [default: leiloes_<timestamp>.<format> in the output directory]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Log to stderr instead of drawing the terminal interface
    #[arg(long)]
    pub no_tui: bool,

    /// Scrape pages recorded in this directory instead of the live sites
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["leiloes", "--site", "alfa"]).unwrap();
        assert_eq!(cli.sites, vec![Site::Alfa]);
        assert_eq!(cli.pages, PageLimit::Pages(1));
        assert_eq!(cli.format, Format::Csv);
        assert!(cli.output.is_none());
        assert!(!cli.no_tui);
    }

    #[test]
    fn test_repeated_sites_and_all_pages() {
        let cli = Cli::try_parse_from([
            "leiloes", "-s", "mega", "-s", "alfa", "--pages", "todas", "-f", "json", "--no-tui",
        ])
        .unwrap();
        assert_eq!(cli.sites, vec![Site::Mega, Site::Alfa]);
        assert_eq!(cli.pages, PageLimit::All);
        assert_eq!(cli.format, Format::Json);
        assert!(cli.no_tui);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["leiloes"]).is_err());
        assert!(Cli::try_parse_from(["leiloes", "--site", "zuk"]).is_err());
        assert!(Cli::try_parse_from(["leiloes", "--site", "alfa", "--pages", "0"]).is_err());
    }
}

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::http_client::http_client;
use crate::matches::RawMatchRow;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("static row selector"));

/// Anything that can produce the results table for a country.
pub trait MatchSource {
    fn fetch(&self, country: &str) -> Result<Vec<RawMatchRow>, FetchError>;
}

/// Fetches a results page over HTTP and reads its table rows.
#[derive(Debug, Clone)]
pub struct HtmlTableSource {
    url_template: String,
    timeout_secs: u64,
}

impl HtmlTableSource {
    pub fn new(url_template: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url_template: url_template.into(),
            timeout_secs,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(cfg.scrape_url.clone(), cfg.http_timeout_secs)
    }

    pub fn url_for(&self, country: &str) -> String {
        let encoded = country.trim().replace(' ', "%20");
        self.url_template.replace("{country}", &encoded)
    }
}

impl MatchSource for HtmlTableSource {
    fn fetch(&self, country: &str) -> Result<Vec<RawMatchRow>, FetchError> {
        let url = self.url_for(country);
        let client =
            http_client(self.timeout_secs).map_err(|err| FetchError::Client(err.to_string()))?;

        info!(country, url = %url, "fetching results page");
        let resp = client.get(&url).send().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;

        let rows = parse_results_table(&body);
        debug!(rows = rows.len(), bytes = body.len(), "parsed results table");
        if rows.is_empty() {
            return Err(FetchError::EmptyTable { url });
        }
        Ok(rows)
    }
}

/// Every `<tr>` whose first four `<td>` children are date, home team,
/// score and away team. Header rows (`<th>`) and short rows are skipped.
pub fn parse_results_table(html: &str) -> Vec<RawMatchRow> {
    let document = Html::parse_document(html);
    let mut out = Vec::new();

    for row in document.select(&ROW_SELECTOR) {
        let cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .map(cell_text)
            .collect::<Vec<_>>();
        let [date, home_team, score, away_team, ..] = cells.as_slice() else {
            continue;
        };
        out.push(RawMatchRow::new(date, home_team, score, away_team));
    }

    out
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

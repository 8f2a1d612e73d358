use crate::phone_details::{clean_text, joined_text, SpecSheet};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Section name used for spec tables without a header cell.
pub const DEFAULT_SECTION: &str = "Other";

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
/// Everything extracted from a GSMArena phone page.
///
/// Use the `PhoneDetails::parse` method to build it from the page markup.
pub struct PhoneDetails {
    /// URL the page was served from, after redirects.
    pub url: String,
    /// Brand, usually the first word of the model name.
    pub brand: Option<String>,
    /// Full model name as shown in the page title.
    pub model: Option<String>,
    /// URL to the main product image.
    pub image_url: Option<String>,
    /// Specifications grouped by section.
    pub specs: SpecSheet,
}

impl PhoneDetails {
    /// Parses a phone page.
    ///
    /// Missing elements never fail the parse: they show up as `None` or as
    /// an empty spec sheet.
    ///
    /// ```rust
    /// use gsmarena_scraper::{PhoneDetails, Url};
    ///
    /// let url = Url::parse("https://www.gsmarena.com/xiaomi_13t_pro-12388.php").unwrap();
    /// let details = PhoneDetails::parse("<html></html>", &url);
    /// assert_eq!(details.brand.as_deref(), Some("xiaomi"));
    /// assert!(details.specs.is_empty());
    /// ```
    pub fn parse(html: &str, url: &Url) -> Self {
        let title_selector = &Selector::parse("h1.specs-phone-name-title").unwrap();
        let img_selector = &Selector::parse("div.specs-photo-main img").unwrap();
        let specs_list_selector = &Selector::parse("#specs-list").unwrap();
        let table_selector = &Selector::parse("table").unwrap();
        let th_selector = &Selector::parse("th").unwrap();
        let tr_selector = &Selector::parse("tr").unwrap();
        let ttl_selector = &Selector::parse("td.ttl").unwrap();
        let nfo_selector = &Selector::parse("td.nfo").unwrap();

        let document = Html::parse_document(html);

        let model = document
            .select(title_selector)
            .next()
            .map(|title| clean_text(&title.text().collect::<String>()))
            .filter(|name| !name.is_empty());

        let brand = match &model {
            Some(name) => name.split_whitespace().next().map(String::from),
            None => brand_from_url(url),
        };

        let image_url = document
            .select(img_selector)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(String::from);

        let mut specs = SpecSheet::new();
        if let Some(specs_list) = document.select(specs_list_selector).next() {
            for table in specs_list.select(table_selector) {
                let category = table
                    .select(th_selector)
                    .next()
                    .map(|th| clean_text(&th.text().collect::<String>()))
                    .unwrap_or_else(|| DEFAULT_SECTION.to_string());

                let section = specs.section_mut(&category);
                for row in table.select(tr_selector) {
                    if let Some((name, value)) = parse_row(row, ttl_selector, nfo_selector) {
                        section.insert(name, value);
                    }
                }
            }
        }
        debug!(url = %url, sections = specs.len(), "parsed phone page");

        PhoneDetails {
            url: url.to_string(),
            brand,
            model,
            image_url,
            specs,
        }
    }

    /// Whether the parsed model looks unrelated to the page URL.
    ///
    /// The expected brand is the URL slug up to the first underscore, so a
    /// brand spelled differently in the title (e.g. with a hyphen) is reported
    /// too. Only meant for a warning.
    pub fn model_mismatch(&self) -> bool {
        let expected = self
            .url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('_')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let model = self.model.as_deref().unwrap_or_default().to_lowercase();

        !expected.is_empty() && !model.is_empty() && !model.contains(&expected)
    }
}

/// Label and value of a spec row, if it has both cells and both are non-empty.
fn parse_row(
    row: ElementRef,
    ttl_selector: &Selector,
    nfo_selector: &Selector,
) -> Option<(String, String)> {
    let name = row.select(ttl_selector).next()?;
    let value = row.select(nfo_selector).next()?;

    let name = clean_text(&name.text().collect::<String>());
    let value = clean_text(&joined_text(value));
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value))
}

fn last_segment(url: &Url) -> Option<&str> {
    url.path_segments().and_then(|segments| segments.last())
}

/// `samsung_galaxy_s23_ultra-12024.php` -> `samsung`.
fn brand_from_url(url: &Url) -> Option<String> {
    last_segment(url)
        .and_then(|slug| slug.split_once('_'))
        .map(|(brand, _)| brand.to_string())
}

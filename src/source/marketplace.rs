//! Marketplace card page scraper
//!
//! Each seller offer on a card page is a table row opened by an
//! `onmouseover="omoEstoque(...)"` handler. The row's lines carry, in order,
//! the store, the edition, the price and the available quantity.

use super::ListingSource;
use crate::cache::PageCache;
use crate::error::{Error, Result};
use crate::io::parse_price;
use crate::models::Listing;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref LISTING_ROW: Regex =
        Regex::new(r#"(?s)onmouseover="omoEstoque(.*?)</tr>"#).expect("valid row regex");
    static ref STORE: Regex = Regex::new(r"title='([^']+)'").expect("valid store regex");
    static ref EDITION: Regex = Regex::new(r#"title="([^"]+)""#).expect("valid edition regex");
    static ref PRICE: Regex = Regex::new(r"<b>R\$\s*([^<]+)</b>").expect("valid price regex");
    static ref QUANTITY: Regex =
        Regex::new(r">\s*([0-9][0-9.,]*)\s*unid").expect("valid quantity regex");
    static ref ENTITY: Regex =
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex");
}

/// Decodes numeric character references and the named entities used on
/// Portuguese pages. Unknown entities are left as they are.
pub fn unescape_html(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                named_entity(entity)
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "aacute" => 'á',
        "acirc" => 'â',
        "atilde" => 'ã',
        "agrave" => 'à',
        "eacute" => 'é',
        "ecirc" => 'ê',
        "iacute" => 'í',
        "oacute" => 'ó',
        "ocirc" => 'ô',
        "otilde" => 'õ',
        "uacute" => 'ú',
        "ccedil" => 'ç',
        "Ccedil" => 'Ç',
        _ => return None,
    };
    Some(c)
}

fn parse_row(row: &str) -> Option<Listing> {
    let lines: Vec<&str> = row.split('\n').collect();
    // first and last pieces are the tail of the opening tag and the row end
    if lines.len() < 6 {
        return None;
    }
    let lines = &lines[1..lines.len() - 1];

    let store = unescape_html(STORE.captures(lines[0])?.get(1)?.as_str().trim());
    let edition = unescape_html(EDITION.captures(lines[1])?.get(1)?.as_str().trim());
    let unit_price = parse_price(PRICE.captures(lines[2])?.get(1)?.as_str())?;
    let available_quantity = QUANTITY
        .captures(lines[3])?
        .get(1)?
        .as_str()
        .replace(['.', ','], "")
        .parse()
        .ok()?;

    Some(Listing {
        store,
        edition,
        available_quantity,
        unit_price,
    })
}

/// Extracts every well-formed listing from a card page. Rows that don't
/// match the expected layout are skipped.
pub fn parse_listings(html: &str) -> Vec<Listing> {
    LISTING_ROW
        .captures_iter(html)
        .filter_map(|caps| {
            let row = caps.get(1)?.as_str();
            let listing = parse_row(row);
            if listing.is_none() {
                log::debug!("Skipping malformed listing row");
            }
            listing
        })
        .collect()
}

/// Scrapes listings from the marketplace's card pages
pub struct Marketplace {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    cache: Option<PageCache>,
}

impl Marketplace {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn card_url(&self, card: &str) -> String {
        format!(
            "{}/?view=cards/card&card={}",
            self.base_url,
            urlencoding::encode(card)
        )
    }

    /// Fetch the card page, `None` when the marketplace doesn't know the card
    async fn fetch_page(&self, card: &str) -> Result<Option<String>> {
        if let Some(html) = self.cache.as_ref().and_then(|cache| cache.get(card)) {
            return Ok(Some(html));
        }

        let url = self.card_url(card);
        log::debug!("Fetching card page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::HttpStatus(status));
        }

        let html = response.text().await?;
        if let Some(cache) = &self.cache {
            cache.insert(card, &html);
        }
        Ok(Some(html))
    }
}

impl ListingSource for Marketplace {
    async fn listings(&self, card: &str) -> Result<Option<Vec<Listing>>> {
        let Some(html) = self.fetch_page(card).await? else {
            return Ok(None);
        };
        let listings = parse_listings(&html);
        log::debug!("Found {} listings for {}", listings.len(), card);
        Ok(Some(listings))
    }
}

#[cfg(test)]
#[path = "marketplace_tests.rs"]
mod tests;

use std::sync::LazyLock;

use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};

use crate::calendar::Target;
use crate::error::MenuError;

// Week marker inside a PDF file name: "uge3", "week_12", "w-7".
static URL_WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:uge|week|w)[_\- ]?([0-9]+)").unwrap());

// Week heading somewhere in the page markup: "Uge 42", "Week 7".
static HEADING_WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:uge|week)\s*([0-9]+)").unwrap());

/// A PDF link for the target day together with the week it appears to belong to.
///
/// `week` is `None` when no week marker was found at all. A marker whose
/// number does not fit saturates to `u64::MAX`, so it stays a known week
/// that never equals a real one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub href: String,
    pub week: Option<u64>,
}

pub async fn fetch_listing(client: &Client, url: &str) -> Result<String, MenuError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(MenuError::transport(url))?;

    let status = resp.status();
    if status != StatusCode::OK {
        return Err(MenuError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().await.map_err(MenuError::transport(url))?;
    tracing::debug!(url, bytes = body.len(), "fetched menu listing");
    Ok(body)
}

/// Every PDF link on the page that mentions the target day, in document order.
pub fn candidates(html: &str, target: &Target) -> Vec<LinkCandidate> {
    let doc = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let markup = match doc.select(&body_selector).next() {
        Some(body) => body.inner_html(),
        None => html.to_string(),
    };
    let day = target.day.local_name.to_lowercase();

    let mut found = Vec::new();
    for element in doc.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href_lower = href.to_lowercase();
        if !href_lower.ends_with(".pdf") {
            continue;
        }

        let link_text = element.text().collect::<String>().to_lowercase();
        if !link_text.contains(&day) && !href_lower.contains(&day) {
            continue;
        }

        let week = match week_from_url(href) {
            Some(week) => Some(week),
            None => week_from_position(&markup, &element.html()),
        };

        tracing::debug!(href, ?week, "found menu link");
        found.push(LinkCandidate {
            href: href.to_string(),
            week,
        });
    }

    found
}

fn week_number(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

fn week_from_url(href: &str) -> Option<u64> {
    let caps = URL_WEEK.captures(href)?;
    Some(week_number(caps.get(1)?.as_str()))
}

/// Week of the last heading that precedes `anchor` in the page markup.
fn week_from_position(markup: &str, anchor: &str) -> Option<u64> {
    let position = markup.find(anchor)?;
    let caps = HEADING_WEEK.captures_iter(&markup[..position]).last()?;
    Some(week_number(caps.get(1)?.as_str()))
}

pub fn resolve_pdf_link(html: &str, target: &Target) -> Result<String, MenuError> {
    let mut found = candidates(html, target);

    if let Some(index) = found
        .iter()
        .position(|candidate| candidate.week == Some(u64::from(target.week)))
    {
        return Ok(found.swap_remove(index).href);
    }

    // A listing with a single, unweeked link for the day is taken as this
    // week's menu.
    if let [only] = found.as_slice() {
        if only.week.is_none() {
            tracing::debug!(href = %only.href, "using the only menu link on the page");
            return Ok(only.href.clone());
        }
    }

    Err(MenuError::PdfNotFound {
        day: target.day.local_name.to_string(),
        week: target.week,
    })
}

pub fn absolute_url(base: &str, href: &str) -> Result<Url, MenuError> {
    let invalid = |reason: String| MenuError::InvalidLink {
        href: href.to_string(),
        reason,
    };
    let base = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
    base.join(href).map_err(|err| invalid(err.to_string()))
}

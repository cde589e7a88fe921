pub mod calendar;
pub mod cli;
pub mod download;
pub mod error;
pub mod extract;
pub mod listing;
pub mod normalize;
pub mod report;

use reqwest::Client;

pub use calendar::{Target, WeekdayEntry, day_by_name, iso_week_number, resolve_target};
pub use error::MenuError;
pub use extract::ENGLISH_MENU_PAGE;
pub use listing::{LinkCandidate, resolve_pdf_link};

pub const DEFAULT_LISTING_URL: &str = "https://kantine.example.dk/frokostmenu/";
pub const USER_AGENT: &str = concat!("canteen-menu/", env!("CARGO_PKG_VERSION"));

/// Where to look for the menu and how to clean it up.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub listing_url: String,
    pub page: usize,
    pub strip_allergens: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            page: ENGLISH_MENU_PAGE,
            strip_allergens: false,
        }
    }
}

pub fn build_client() -> Result<Client, MenuError> {
    Client::builder()
        // Avoid macOS system proxy lookup that can panic in sandboxed contexts.
        .no_proxy()
        .user_agent(USER_AGENT)
        .build()
        .map_err(MenuError::transport("<client setup>"))
}

/// Runs listing fetch, link resolution, download and extraction for
/// `target`, returning the normalized menu text.
pub async fn fetch_menu(
    client: &Client,
    options: &MenuOptions,
    target: &Target,
) -> Result<String, MenuError> {
    println!("Fetching menu listing from {}", options.listing_url);
    let html = listing::fetch_listing(client, &options.listing_url).await?;

    let href = resolve_pdf_link(&html, target)?;
    let pdf_url = listing::absolute_url(&options.listing_url, &href)?;
    println!("Found menu PDF: {pdf_url}");

    println!("Downloading menu PDF...");
    let path = download::download_pdf(client, pdf_url.as_str()).await?;

    println!("Extracting page {}...", options.page);
    let extracted = extract::extract_page(&path, options.page);
    download::remove_temp_file(&path).await;

    Ok(normalize::normalize(&extracted?, options.strip_allergens))
}

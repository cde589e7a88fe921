use std::ffi::OsString;

use anyhow::Result;
use chrono::Local;
use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

use crate::{
    DEFAULT_LISTING_URL, ENGLISH_MENU_PAGE, MenuOptions, build_client, fetch_menu,
    report::render_report, resolve_target,
};

/// Print this week's canteen menu from the published PDF.
#[derive(Parser, Debug)]
#[command(name = "canteen-menu", version)]
pub struct Cli {
    /// ISO week to fetch (1-53), defaults to the current week
    #[arg(short, long, value_name = "WEEK")]
    pub week: Option<String>,

    /// Weekday to fetch, e.g. "mandag" or "monday", defaults to today
    #[arg(short, long, value_name = "DAY")]
    pub day: Option<String>,

    /// Strip allergen markers such as "(3,7,12,T)" (short form: -na)
    #[arg(long)]
    pub no_allergies: bool,

    /// Page listing the menu PDFs
    #[arg(long, value_name = "URL", default_value = DEFAULT_LISTING_URL)]
    pub url: String,

    /// PDF page holding the English menu
    #[arg(long, value_name = "N", default_value_t = ENGLISH_MENU_PAGE)]
    pub page: usize,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    fn options(&self) -> MenuOptions {
        MenuOptions {
            listing_url: self.url.clone(),
            page: self.page,
            strip_allergens: self.no_allergies,
        }
    }
}

/// clap short flags are one character, so the two-letter `-na` is mapped to
/// its long form before parsing.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-na" {
                OsString::from("--no-allergies")
            } else {
                arg
            }
        })
        .collect()
}

pub async fn run(cli: Cli) -> Result<()> {
    let today = Local::now().date_naive();
    let target = resolve_target(today, cli.week.as_deref(), cli.day.as_deref())?;
    tracing::info!(week = target.week, day = target.day.local_name, "resolved target");
    println!("Looking up the menu for {target}");

    let client = build_client()?;
    let text = fetch_menu(&client, &cli.options(), &target).await?;

    print!("{}", render_report(&target, &text));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let args = std::iter::once("canteen-menu")
            .chain(args.iter().copied())
            .map(OsString::from);
        Cli::try_parse_from(normalize_args(args)).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.week, None);
        assert_eq!(cli.day, None);
        assert!(!cli.no_allergies);
        assert_eq!(cli.url, DEFAULT_LISTING_URL);
        assert_eq!(cli.page, ENGLISH_MENU_PAGE);
        assert_eq!(cli.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn short_and_long_flags() {
        let cli = parse(&["-w", "12", "-d", "Onsdag", "-na"]);
        assert_eq!(cli.week.as_deref(), Some("12"));
        assert_eq!(cli.day.as_deref(), Some("Onsdag"));
        assert!(cli.no_allergies);

        let cli = parse(&["--week", "3", "--day", "friday", "--no-allergies", "-vv"]);
        assert_eq!(cli.week.as_deref(), Some("3"));
        assert!(cli.no_allergies);
        assert_eq!(cli.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn only_the_exact_na_flag_is_rewritten() {
        let args = ["canteen-menu", "-d", "-na", "--na"].map(OsString::from);
        assert_eq!(
            normalize_args(args),
            ["canteen-menu", "-d", "--no-allergies", "--na"].map(OsString::from)
        );
    }

    #[test]
    fn options_follow_flags() {
        let cli = parse(&["--url", "https://menu.example.dk/", "--page", "1", "-na"]);
        let options = cli.options();
        assert_eq!(options.listing_url, "https://menu.example.dk/");
        assert_eq!(options.page, 1);
        assert!(options.strip_allergens);
    }
}

use std::path::PathBuf;

use chrono::Weekday;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("no menu available on {0} (weekends are not served), pass --day to pick a weekday")]
    Weekend(Weekday),

    #[error("invalid week '{0}': expected a number between 1 and 53")]
    InvalidWeek(String),

    #[error("invalid day '{input}': valid days are {valid}")]
    InvalidDay { input: String, valid: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find PDF for {day} in week {week}")]
    PdfNotFound { day: String, week: u32 },

    #[error("invalid PDF link '{href}': {reason}")]
    InvalidLink { href: String, reason: String },

    #[error("could not read PDF {}", path.display())]
    Pdf {
        path: PathBuf,
        #[source]
        source: pdf_extract::OutputError,
    },

    #[error("could not read PDF {} (malformed document)", path.display())]
    PdfPanicked { path: PathBuf },

    #[error("PDF {} has {pages} page(s), page {page} does not exist", path.display())]
    MissingPage {
        path: PathBuf,
        page: usize,
        pages: usize,
    },
}

impl MenuError {
    pub(crate) fn transport(url: &str) -> impl FnOnce(reqwest::Error) -> Self + '_ {
        move |source| MenuError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

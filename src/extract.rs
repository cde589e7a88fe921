use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::MenuError;

/// 1-based page of the menu PDF that carries the English menu.
pub const ENGLISH_MENU_PAGE: usize = 2;

/// Text of every page in the PDF at `path`, in page order.
///
/// `pdf_extract` panics on some malformed documents instead of returning an
/// error, so the parse runs inside `catch_unwind`.
pub fn extract_pages(path: &Path) -> Result<Vec<String>, MenuError> {
    let bytes = std::fs::read(path).map_err(MenuError::io(path))?;
    let parsed = quietly(|| pdf_extract::extract_text_from_mem_by_pages(&bytes));

    let pages = match parsed {
        Ok(Ok(pages)) => pages,
        Ok(Err(source)) => {
            return Err(MenuError::Pdf {
                path: path.to_path_buf(),
                source,
            });
        }
        Err(_) => {
            return Err(MenuError::PdfPanicked {
                path: path.to_path_buf(),
            });
        }
    };
    tracing::debug!(path = %path.display(), pages = pages.len(), "parsed menu PDF");
    Ok(pages)
}

/// Runs `parse`, catching a panic without the default hook's report on
/// stderr. The panic message goes to the debug log instead.
fn quietly<T>(parse: impl FnOnce() -> T) -> std::thread::Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "PDF parser panicked");
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(parse));
    panic::set_hook(previous);
    result
}

pub fn extract_page(path: &Path, page: usize) -> Result<String, MenuError> {
    let mut pages = extract_pages(path)?;
    let count = pages.len();
    if page == 0 || page > count {
        return Err(MenuError::MissingPage {
            path: path.to_path_buf(),
            page,
            pages: count,
        });
    }
    Ok(pages.swap_remove(page - 1))
}

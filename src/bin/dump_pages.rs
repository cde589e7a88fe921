use std::path::PathBuf;

use anyhow::Result;
use canteen_menu::extract::extract_pages;
use clap::Parser;

/// Print every page of a menu PDF with page and line numbers, to find the
/// page that holds the English menu.
#[derive(Parser, Debug)]
#[command(name = "dump-pages", version)]
struct Args {
    /// Local PDF file
    pdf: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let pages = extract_pages(&args.pdf)?;

    for (index, text) in pages.iter().enumerate() {
        println!("=== PAGE {} of {} ===", index + 1, pages.len());
        for (i, line) in text.lines().enumerate() {
            if !line.trim().is_empty() {
                println!("{}: {:?}", i, line);
            }
        }
    }

    Ok(())
}

use biblio::config::BiblioConfig;
use biblio::error::Result;
use biblio::library::Library;
use biblio::model::Book;
use biblio::search::Criterion;
use biblio::store::fs::FileStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;

mod args;
use args::{Cli, Commands};

const LIBRARY_NAME: &str = "biblio";

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli);
    let config = BiblioConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir).with_config(&config);
    let mut library = Library::open(LIBRARY_NAME, store)?;

    match cli.command {
        Commands::Add {
            title,
            author,
            genre,
        } => {
            let book = library.add_book(&title, &author, &genre)?;
            println!("{} {}", "Added:".green().bold(), book);
        }
        Commands::Register { name, email } => {
            let borrower = library.add_borrower(&name, &email)?;
            println!("{} {}", "Registered:".green().bold(), borrower);
        }
        Commands::Checkout {
            book_id,
            borrower_id,
        } => {
            library.checkout(&book_id, &borrower_id)?;
            println!(
                "{} {} -> {}",
                "Checked out:".green().bold(),
                book_id,
                borrower_id
            );
        }
        Commands::Return {
            book_id,
            borrower_id,
        } => {
            library.return_book(&book_id, &borrower_id)?;
            println!(
                "{} {} <- {}",
                "Returned:".green().bold(),
                book_id,
                borrower_id
            );
        }
        Commands::List { borrowers } => {
            if borrowers {
                print_lines(library.borrowers().map(|b| b.to_string()), "No borrowers");
            } else {
                print_books(library.books(), "The catalog is empty");
            }
        }
        Commands::Available => {
            print_books(
                library.available_books().into_iter(),
                "No books available right now",
            );
        }
        Commands::Search {
            title,
            author,
            genre,
            available,
        } => {
            let criteria = build_criteria(title, author, genre, available);
            let found = library.search_books(&criteria)?;
            print_books(found.iter(), "No books matched");
        }
        Commands::Borrowed { borrower_id } => {
            let held = library.borrower_books(&borrower_id)?;
            print_books(held.into_iter(), "Nothing currently borrowed");
        }
        Commands::Stats => print_stats(&library),
        Commands::Doctor => {
            let report = library.verify();
            if report.is_clean() {
                println!("{}", "No integrity issues found".green());
            } else {
                for issue in &report.issues {
                    println!("{} {}", "Issue:".yellow().bold(), issue);
                }
            }
        }
    }
    Ok(())
}

fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    if let Some(dir) = std::env::var_os("BIBLIO_DATA") {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "biblio", "biblio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn build_criteria(
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    available: Option<bool>,
) -> Vec<Criterion> {
    let mut criteria = Vec::new();
    if let Some(title) = title {
        criteria.push(Criterion::new("title", title));
    }
    if let Some(author) = author {
        criteria.push(Criterion::new("author", author));
    }
    if let Some(genre) = genre {
        criteria.push(Criterion::new("genre", genre));
    }
    if let Some(available) = available {
        criteria.push(Criterion::new("available", available));
    }
    criteria
}

fn print_books<'a, I: Iterator<Item = &'a Book>>(books: I, empty_message: &str) {
    print_lines(books.map(|b| b.to_string()), empty_message);
}

fn print_lines<I: Iterator<Item = String>>(lines: I, empty_message: &str) {
    let mut any = false;
    for line in lines {
        any = true;
        println!("{}", line);
    }
    if !any {
        println!("{}", empty_message.dimmed());
    }
}

fn print_stats<S: biblio::store::DataStore>(library: &Library<S>) {
    let stats = library.statistics();
    println!("{}", "Library statistics".bold());
    println!("  Total books:     {}", stats.total_books);
    println!("  Available:       {}", stats.available_books);
    println!("  Checked out:     {}", stats.checked_out);
    println!("  Borrowers:       {}", stats.total_borrowers);
    println!("  By genre:");
    for (genre, count) in &stats.books_by_genre {
        println!("    {:<12} {}", format!("{}:", genre), count);
    }
}

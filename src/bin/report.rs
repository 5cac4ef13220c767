use std::{error::Error, fs, path::Path};

use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledger_report::{
    CategoryDirectory, CategoryFilter, CategoryRecord, ListState, PaginationIndicator,
    ReportConfig, TransactionKind, TransactionPage, TransactionRecord, YearReport,
    create_pagination_indicators, format_currency, month_label, parse_transactions,
};
use time::Month;

/// Yearly income and expense reports over exported transaction records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The canonical timezone that dates are read in, e.g. "Asia/Bangkok".
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// The symbol put in front of amounts in text output.
    #[arg(long)]
    currency_symbol: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare a year's income and expenses month by month and by category.
    Report {
        /// File path to a JSON array of transaction records.
        #[arg(long)]
        transactions: String,

        /// File path to a JSON array of category records.
        #[arg(long)]
        categories: Option<String>,

        /// The year to report on.
        #[arg(long)]
        year: i32,

        /// The year to compare against.
        #[arg(long)]
        compare_year: Option<i32>,
    },
    /// Print one page of transactions with totals for the filtered set.
    List {
        /// File path to a JSON array of transaction records.
        #[arg(long)]
        transactions: String,

        /// The page to show, starting at 1.
        #[arg(long)]
        page: Option<u64>,

        /// The number of transactions per page.
        #[arg(long)]
        page_size: Option<u64>,

        /// Only show transactions in this category.
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let mut config = ReportConfig::new(&args.timezone)?;
    if let Some(symbol) = &args.currency_symbol {
        config = config.currency_symbol(symbol);
    }

    match args.command {
        Command::Report {
            transactions,
            categories,
            year,
            compare_year,
        } => {
            let records: Vec<TransactionRecord> = read_json(Path::new(&transactions))?;
            let transactions = parse_transactions(&records, &config.timezone)?;
            let directory = match categories {
                Some(path) => {
                    let records: Vec<CategoryRecord> = read_json(Path::new(&path))?;
                    CategoryDirectory::from_records(records)
                }
                None => CategoryDirectory::default(),
            };

            let report =
                YearReport::build(&transactions, &directory, year, compare_year, &config.timezone)?;

            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_report(&report, &config.currency_symbol),
            }
        }
        Command::List {
            transactions,
            page,
            page_size,
            category,
        } => {
            let records: Vec<TransactionRecord> = read_json(Path::new(&transactions))?;
            let transactions = parse_transactions(&records, &config.timezone)?;
            let page_size = page_size.unwrap_or(config.pagination.default_page_size);

            let mut state = ListState::new();
            state.set_category_filter(CategoryFilter::from_query(category.as_deref()));
            state.go_to(page.unwrap_or(config.pagination.default_page), u64::MAX);
            let page = state.view(&transactions, page_size)?;

            let indicators = create_pagination_indicators(
                page.page_number,
                page.total_pages,
                config.pagination.max_pages,
            );

            match args.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "page": page,
                        "pagination": indicators,
                    }))?
                ),
                OutputFormat::Text => print_page(&page, &indicators, &config),
            }
        }
    }

    Ok(())
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    tracing::debug!("Reading {path:?}");

    let text = fs::read_to_string(path)
        .map_err(|error| format!("Could not read {}: {error}", path.display()))?;

    serde_json::from_str(&text)
        .map_err(|error| format!("Could not parse {}: {error}", path.display()).into())
}

fn print_report(report: &YearReport, symbol: &str) {
    let compare_label = report
        .compare_year
        .map_or_else(|| "-".to_owned(), |year| year.to_string());

    println!("Report for {} (compared with {compare_label})", report.primary_year);
    println!();
    println!(
        "{:<5} {:>14} {:>14} {:>14} {:>14}",
        "Month", "Income", "Expense", "Cmp income", "Cmp expense"
    );

    let mut month = Month::December;
    for (primary, compare) in report.primary_monthly.iter().zip(&report.compare_monthly) {
        month = month.next();
        println!(
            "{:<5} {:>14} {:>14} {:>14} {:>14}",
            month_label(month),
            format_currency(primary.income, symbol),
            format_currency(primary.expense, symbol),
            format_currency(compare.income, symbol),
            format_currency(compare.expense, symbol),
        );
    }

    println!(
        "{:<5} {:>14} {:>14} {:>14} {:>14}",
        "Total",
        format_currency(report.primary_totals.income, symbol),
        format_currency(report.primary_totals.expense, symbol),
        format_currency(report.compare_totals.income, symbol),
        format_currency(report.compare_totals.expense, symbol),
    );
    println!(
        "Balance: {} (compare {})",
        format_currency(report.primary_totals.balance, symbol),
        format_currency(report.compare_totals.balance, symbol),
    );

    println!();
    println!(
        "{:<20} {:>14} {:>14} {:>14} {:>14}",
        "Category", "Income", "Expense", "Cmp income", "Cmp expense"
    );
    for row in &report.rows {
        println!(
            "{:<20} {:>14} {:>14} {:>14} {:>14}",
            row.name,
            format_currency(row.primary_income, symbol),
            format_currency(row.primary_expense, symbol),
            format_currency(row.compare_income, symbol),
            format_currency(row.compare_expense, symbol),
        );
    }

    if !report.expense_ranking.is_empty() {
        println!();
        println!("Where the money went in {}:", report.primary_year);
        for share in &report.expense_ranking {
            println!(
                "{:<20} {:>14} {:>6.1}%",
                share.name,
                format_currency(share.expense, symbol),
                share.share * rust_decimal::Decimal::ONE_HUNDRED,
            );
        }
    }

    let options = report.compare_year_options();
    if !options.is_empty() {
        let options: Vec<String> = options.iter().map(i32::to_string).collect();
        println!();
        println!("Other years: {}", options.join(", "));
    }
}

fn print_page(page: &TransactionPage, indicators: &[PaginationIndicator], config: &ReportConfig) {
    let symbol = &config.currency_symbol;

    for transaction in &page.transactions {
        let sign = match transaction.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        let date = config.timezone.to_local(transaction.occurred_at).date();

        println!(
            "{date} {sign}{:>14} {:<16} {}",
            format_currency(transaction.amount.value(), symbol),
            transaction
                .category_id
                .as_ref()
                .map_or("", |category_id| category_id.as_ref()),
            transaction.note.as_deref().unwrap_or_default(),
        );
    }

    if page.transactions.is_empty() {
        println!("No transactions");
    }

    println!();
    println!(
        "{} transactions, income {}, expense {}, balance {}",
        page.filtered_count,
        format_currency(page.totals.income, symbol),
        format_currency(page.totals.expense, symbol),
        format_currency(page.totals.balance, symbol),
    );

    let bar: Vec<String> = indicators
        .iter()
        .map(|indicator| match indicator {
            PaginationIndicator::Page(page) => page.to_string(),
            PaginationIndicator::CurrPage(page) => format!("[{page}]"),
            PaginationIndicator::Ellipsis => "...".to_owned(),
            PaginationIndicator::NextButton(_) => ">".to_owned(),
            PaginationIndicator::BackButton(_) => "<".to_owned(),
        })
        .collect();

    if !bar.is_empty() {
        println!("{}", bar.join(" "));
    }
}

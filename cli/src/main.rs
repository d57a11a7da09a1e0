use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use owo_colors::OwoColorize;
use storefront_backend_client::BackendClient;
use storefront_core::BrowseSnapshot;
use storefront_core::DEFAULT_DEBOUNCE_WINDOW;
use storefront_core::PageToken;
use storefront_core::QueryOrchestrator;
use storefront_core::QueryState;
use storefront_core::SessionStore;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Browse the storefront catalog from the terminal"
)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(
        long,
        env = "STOREFRONT_BASE_URL",
        default_value = "http://localhost:8000"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all categories
    Categories,

    /// Run a one-shot product search
    Search(SearchArgs),

    /// Browse interactively: type to search, /cat <id>, /page <n>, /quit
    Browse(BrowseArgs),
}

#[derive(Debug, Parser)]
struct SearchArgs {
    /// Free-text query
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Filter by category id (ignored while QUERY is non-empty)
    #[arg(long)]
    category_id: Option<i64>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: i64,
}

#[derive(Debug, Parser)]
struct BrowseArgs {
    /// Initial URL query string to restore, e.g. "page=2&q=&category_id=7"
    #[arg(long, value_name = "QUERY_STRING")]
    restore: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client =
        BackendClient::new(cli.base_url.clone()).context("failed to build HTTP client")?;
    match cli.command {
        Command::Categories => run_categories(client).await,
        Command::Search(args) => run_search(client, args).await,
        Command::Browse(args) => run_browse(client, args).await,
    }
}

async fn run_categories(client: BackendClient) -> Result<()> {
    let categories = client
        .categories()
        .await
        .context("failed to load categories")?;
    for category in categories {
        match category.description.as_deref() {
            Some(description) if !description.is_empty() => {
                println!("{:>5}  {}  {}", category.id, category.name.bold(), description.dimmed());
            }
            _ => println!("{:>5}  {}", category.id, category.name.bold()),
        }
    }
    Ok(())
}

async fn run_search(client: BackendClient, args: SearchArgs) -> Result<()> {
    let state = QueryState {
        page: args.page.max(1).try_into().unwrap_or(u32::MAX),
        category_id: args.category_id,
        search: args.query.unwrap_or_default(),
    };
    let page = client
        .product_search(&state.to_request())
        .await
        .context("product search failed")?;

    println!(
        "showing {} of {} products (page {} of {})",
        page.results.len(),
        page.total,
        state.page,
        page.pages.max(1)
    );
    for product in &page.results {
        println!(
            "{:>7}  {}  ₹{:.2}  (stock {})",
            product.product_id,
            product.name.bold(),
            product.price,
            product.quantity
        );
    }
    if page.results.is_empty() {
        println!("{}", "No products found.".dimmed());
    }
    Ok(())
}

async fn run_browse(client: BackendClient, args: BrowseArgs) -> Result<()> {
    let session = SessionStore::new();
    let client = client.with_token_source(session.access_token_source());
    let orchestrator = QueryOrchestrator::new(client);

    let mut snapshots = orchestrator.subscribe();
    let session_view = session.clone();
    tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow().clone();
            if !snapshot.loading {
                render(&snapshot, &session_view);
            }
        }
    });

    orchestrator.start(args.restore.as_deref()).await;
    let search = orchestrator.search_input(DEFAULT_DEBOUNCE_WINDOW);

    println!(
        "{}",
        "type to search; /cat <id>, /all, /page <n>, /cats, /login <token>, /logout, /quit"
            .dimmed()
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("stdin closed unexpectedly")? {
        let line = line.trim();
        if line.is_empty() {
            search.observe("");
        } else if line == "/quit" || line == "/q" {
            break;
        } else if line == "/all" {
            orchestrator.clear_category();
        } else if line == "/cats" {
            let snapshot = orchestrator.snapshot();
            if let Some(banner) = &snapshot.categories_error {
                println!("{}", banner.red());
            }
            for category in snapshot.categories.list() {
                println!("{:>5}  {}", category.id, category.name);
            }
        } else if let Some(rest) = line.strip_prefix("/cat ") {
            match rest.trim().parse::<i64>() {
                Ok(id) => orchestrator.select_category(id),
                Err(_) => println!("usage: /cat <id>"),
            }
        } else if let Some(rest) = line.strip_prefix("/page ") {
            match rest.trim().parse::<i64>() {
                Ok(page) => orchestrator.set_page(page),
                Err(_) => println!("usage: /page <n>"),
            }
        } else if let Some(token) = line.strip_prefix("/login ") {
            session.sign_in(token.trim(), "");
        } else if line == "/logout" {
            session.sign_out();
        } else if line.starts_with('/') {
            println!("unknown command: {line}");
        } else {
            search.observe(line);
        }
    }
    Ok(())
}

fn render(snapshot: &BrowseSnapshot, session: &SessionStore) {
    let auth = if session.is_signed_in() {
        "signed in"
    } else {
        "anonymous"
    };
    println!();
    println!(
        "{} — showing {} of {} products ({auth})",
        snapshot.category_label.bold(),
        snapshot.products.len(),
        snapshot.total
    );
    if let Some(banner) = &snapshot.categories_error {
        println!("{}", banner.red());
    }
    if let Some(banner) = &snapshot.error {
        println!("{}", banner.red());
    }
    if snapshot.products.is_empty() && snapshot.error.is_none() {
        println!("No products found.");
    }
    for product in &snapshot.products {
        println!(
            "{:>7}  {}  ₹{:.2}  (stock {})",
            product.product_id,
            product.name.bold(),
            product.price,
            product.quantity
        );
    }
    if snapshot.total_pages > 1 {
        let strip: Vec<String> = snapshot
            .pagination
            .iter()
            .map(|token| match token {
                PageToken::Page(p) if *p == snapshot.query.page => format!("[{p}]"),
                PageToken::Page(p) => p.to_string(),
                PageToken::PrevEllipsis | PageToken::NextEllipsis => "…".to_string(),
            })
            .collect();
        println!("pages: {}", strip.join(" "));
    }
    println!("{}", format!("url: ?{}", snapshot.url_query).dimmed());
}

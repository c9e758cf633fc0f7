use hypercert_market_rs::controller::ListingSnapshot;
use hypercert_market_rs::manifest::MANIFEST_PATH;
use hypercert_market_rs::{
    export_catalog, CatalogConfig, CatalogExport, DetailController, DetailStatus, FrameManifest,
    HypercertsApi, ListingController,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_EXPORT_PATH: &str = "hypercerts.json";

#[derive(Serialize)]
struct PageExport<'a> {
    page: u32,
    total_pages: u64,
    total_count: u64,
    searching: Option<&'a str>,
    hypercerts: &'a [hypercert_market_rs::CertificateSummary],
}

fn print_usage(bin: &str) {
    eprintln!("Usage:");
    eprintln!("  {} <command> [args]", bin);
    eprintln!();
    eprintln!("  list [page]            → one page of the marketplace");
    eprintln!("  search <term> [page]   → search by name or id fragment");
    eprintln!("  detail <id>            → prices and availability for one hypercert");
    eprintln!("  export [path]          → write every hypercert to {}", DEFAULT_EXPORT_PATH);
    eprintln!("  manifest               → print the mini-app manifest");
    eprintln!();
    eprintln!("  Environment:");
    eprintln!("    NEXT_PUBLIC_ENVIRONMENT=production|staging (default: staging)");
    eprintln!("    HYPERCERTS_GRAPH_URL   override the GraphQL endpoint");
    eprintln!("    NEXT_PUBLIC_URL        public app URL for the manifest");
    eprintln!("    RUST_LOG               log filter (default: warn)");
    eprintln!();
    eprintln!("  Example:");
    eprintln!("    cargo run --release -- detail 8453-0x822f17a9a5eecfd66dbaff7946a8071c265d1d07-1234");
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn parse_page(arg: Option<&String>) -> anyhow::Result<u32> {
    match arg {
        None => Ok(1),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| anyhow::anyhow!("page must be a positive integer, got '{}'", raw)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();
    let raw_args: Vec<String> = std::env::args().collect();
    let bin = raw_args.first().map(String::as_str).unwrap_or("hypercert-market-rs");

    let Some(command) = raw_args.get(1) else {
        print_usage(bin);
        std::process::exit(1);
    };

    let config = CatalogConfig::from_env();

    match command.as_str() {
        "list" => {
            let page = parse_page(raw_args.get(2))?;
            let listing = ListingController::new(HypercertsApi::new(&config)?, config.items_per_page);
            eprintln!("Fetching page {} from {}...", page, listing.catalog().api_url());
            listing.load_page(page).await;
            print_page(&listing.snapshot().await)?;
        }
        "search" => {
            let Some(term) = raw_args.get(2) else {
                print_usage(bin);
                std::process::exit(1);
            };
            let page = parse_page(raw_args.get(3))?;
            let listing = ListingController::new(HypercertsApi::new(&config)?, config.items_per_page);
            eprintln!("Searching for '{}'...", term.trim());
            listing.search_page(term, page).await;
            print_page(&listing.snapshot().await)?;
        }
        "detail" => {
            let detail = DetailController::new(HypercertsApi::new(&config)?);
            let id = raw_args.get(2).map(String::as_str);
            detail.load(id).await;
            match detail.status().await {
                DetailStatus::Found(_) => {}
                DetailStatus::NoContent => eprintln!("No id given."),
                _ => eprintln!("Hypercert not found."),
            }
            println!("{}", serde_json::to_string_pretty(&detail.view().await)?);
        }
        "export" => {
            let path = raw_args.get(2).map(String::as_str).unwrap_or(DEFAULT_EXPORT_PATH);
            let api = HypercertsApi::new(&config)?;
            eprintln!("Fetching all hypercerts on chain {}...", api.chain_id());
            let export = CatalogExport::new(api.chain_id(), api.fetch_all().await?);
            export_catalog(&export, path)?;
            eprintln!("Exported {} hypercerts to {}", export.hypercerts.len(), path);
        }
        "manifest" => {
            eprintln!("Serve at {}", MANIFEST_PATH);
            println!("{}", FrameManifest::from_config(&config).to_json()?);
        }
        other => {
            eprintln!("Unknown command: '{}'.", other);
            print_usage(bin);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_page(snapshot: &ListingSnapshot) -> anyhow::Result<()> {
    if snapshot.certificates.is_empty() {
        eprintln!("No hypercerts found.");
    } else {
        eprintln!(
            "Page {}/{} ({} total).",
            snapshot.pagination.current_page,
            snapshot.pagination.total_pages(),
            snapshot.pagination.total_count
        );
    }
    let export = PageExport {
        page: snapshot.pagination.current_page,
        total_pages: snapshot.pagination.total_pages(),
        total_count: snapshot.pagination.total_count,
        searching: snapshot
            .search
            .is_searching
            .then_some(snapshot.search.search_term.as_str()),
        hypercerts: &snapshot.certificates,
    };
    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

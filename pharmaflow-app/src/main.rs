use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pharmaflow_core::aggregate;
use pharmaflow_core::catalog::ProcessCatalog;
use std::fs;

mod export;
mod plotting;
mod select;
mod view;

#[derive(Parser)]
#[command(
    name = "pharmaflow",
    version,
    about = "Explore and compare pharmaceutical manufacturing processes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every category and the products it contains.
    List,
    /// Show one process in full, with classified parameters and equipment.
    Show {
        /// Category the product is listed under, e.g. 'chemical-solid-dosage'.
        category: String,
        /// Product name, e.g. 'tablet'.
        product: String,
        /// Render charts and write report files to a run directory.
        #[arg(long)]
        charts: bool,
    },
    /// Compare processes side by side.
    Compare {
        /// Selectors of the form 'category/product', or 'category/*' for
        /// every product in a category.
        #[arg(required = true)]
        selectors: Vec<String>,
        /// Render charts and write report files to a run directory.
        #[arg(long)]
        charts: bool,
    },
    /// Summarize step statistics for every category.
    Overview {
        /// Render charts and write report files to a run directory.
        #[arg(long)]
        charts: bool,
    },
}

fn main() -> Result<()> {
    println!("--- Pharmaflow ---");

    let cli = Cli::parse();

    let catalog = ProcessCatalog::builtin().context("Failed to load the built-in catalog")?;
    println!(
        "[Catalog] Loaded {} processes across {} categories.",
        catalog.len(),
        catalog.list_categories().len()
    );

    match cli.command {
        Command::List => view::print_catalog(&catalog),
        Command::Show {
            category,
            product,
            charts,
        } => run_show(&catalog, &category, &product, charts)?,
        Command::Compare { selectors, charts } => run_compare(&catalog, &selectors, charts)?,
        Command::Overview { charts } => run_overview(&catalog, charts)?,
    }

    Ok(())
}

fn run_show(catalog: &ProcessCatalog, category: &str, product: &str, charts: bool) -> Result<()> {
    let definition = match catalog.get_process(category, product) {
        Some(definition) => definition,
        None => {
            println!("No process named '{}' in category '{}'.", product, category);
            view::print_category_hint(catalog, category);
            return Ok(());
        }
    };

    view::print_definition(definition);

    if charts {
        let output_dir = create_run_dir(&format!("show_{}", product))?;
        export::export_show(&output_dir, definition)?;
        plotting::render_show_charts(&output_dir, definition)?;
        println!("\nRun artifacts are in '{}'", output_dir);
    }

    Ok(())
}

fn run_compare(catalog: &ProcessCatalog, selectors: &[String], charts: bool) -> Result<()> {
    let selected = select::resolve_selectors(catalog, selectors)?;
    let comparison = aggregate::compare(selected);

    view::print_comparison(&comparison);

    if charts {
        let output_dir = create_run_dir("compare")?;
        export::export_comparison(&output_dir, &comparison)?;
        plotting::render_comparison_charts(&output_dir, &comparison)?;
        println!("\nRun artifacts are in '{}'", output_dir);
    }

    Ok(())
}

fn run_overview(catalog: &ProcessCatalog, charts: bool) -> Result<()> {
    let ordered = select::category_stats_in_catalog_order(catalog);
    view::print_overview(&ordered);

    if charts {
        let output_dir = create_run_dir("overview")?;
        export::export_overview(&output_dir, &ordered)?;
        plotting::render_overview_charts(&output_dir, &ordered, catalog)?;
        println!("\nRun artifacts are in '{}'", output_dir);
    }

    Ok(())
}

/// Creates a timestamped run directory under ./data/runs.
fn create_run_dir(label: &str) -> Result<String> {
    let output_dir = format!(
        "./data/runs/{}_{}",
        label,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;
    Ok(output_dir)
}

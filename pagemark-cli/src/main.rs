use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pagemark::seed::{plan, seed};
use pagemark::{
    build_tree, ArticleStore, ObjectRef, OutlineSource, PageLabelTable, SeedOptions,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "pagemark",
    about = "Split a reference PDF into articles by its outline and track reading progress",
    version,
    author
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every outline entry to a page range and store the articles
    Seed {
        /// PDF file whose outline objects are stored uncompressed
        source: PathBuf,

        /// Page label file, one label per physical page
        labels: PathBuf,

        /// Article database
        #[arg(short, long, required_unless_present = "dry_run")]
        db: Option<PathBuf>,

        /// Print the articles instead of storing them
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        source_args: SourceArgs,

        #[command(flatten)]
        resolver_args: ResolverArgs,
    },

    /// Print the outline tree
    Outline {
        /// PDF file whose outline objects are stored uncompressed
        source: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source_args: SourceArgs,
    },

    /// Show the next unread article
    Next {
        /// Article database
        #[arg(short, long)]
        db: PathBuf,
    },

    /// Mark an article as read
    MarkRead {
        /// Article database
        #[arg(short, long)]
        db: PathBuf,

        /// Article id
        id: i64,
    },

    /// Show how many articles have been read
    Status {
        /// Article database
        #[arg(short, long)]
        db: PathBuf,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// JSON file with seeding options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference of the outline root object (e.g. "1 0 R")
    #[arg(long)]
    root: Option<String>,

    /// Object number at which reading stops
    #[arg(long, conflicts_with = "no_sentinel")]
    sentinel: Option<u32>,

    /// Read every object in the source
    #[arg(long)]
    no_sentinel: bool,
}

#[derive(Args)]
struct ResolverArgs {
    /// Entries starting before this page are not stored
    #[arg(long)]
    toc_threshold: Option<u32>,

    /// Pages whose leading label number exceeds this continue the current article
    #[arg(long, allow_negative_numbers = true)]
    filler_threshold: Option<i64>,

    /// Last page the scan may reach (defaults to the number of labels)
    #[arg(long)]
    max_page: Option<u32>,
}

impl SourceArgs {
    fn to_options(&self) -> Result<SeedOptions> {
        let mut options = match &self.config {
            Some(path) => SeedOptions::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SeedOptions::default(),
        };

        if let Some(root) = &self.root {
            options.root = root.clone();
        }
        if self.no_sentinel {
            options.sentinel = None;
        } else if let Some(sentinel) = self.sentinel {
            options.sentinel = Some(sentinel);
        }
        Ok(options)
    }
}

impl ResolverArgs {
    fn apply(&self, options: &mut SeedOptions) {
        if let Some(page) = self.toc_threshold {
            options.resolver.toc_threshold = page;
        }
        if let Some(threshold) = self.filler_threshold {
            options.resolver.filler_threshold = threshold;
        }
        if let Some(page) = self.max_page {
            options.resolver.max_page = Some(page);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "pagemark=debug,pagemark_cli=debug"
    } else {
        "pagemark=info,pagemark_cli=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_source(path: &Path) -> Result<OutlineSource> {
    info!("Reading outline objects from {}", path.display());
    OutlineSource::open(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn open_store(path: &Path) -> Result<ArticleStore> {
    ArticleStore::new(path)
        .with_context(|| format!("Failed to open database {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Seed {
            source,
            labels,
            db,
            dry_run,
            source_args,
            resolver_args,
        } => {
            let mut options = source_args.to_options()?;
            resolver_args.apply(&mut options);

            let outline = open_source(&source)?;
            let labels = PageLabelTable::open(&labels)
                .with_context(|| format!("Failed to read page labels {}", labels.display()))?;

            match db {
                Some(db) if !dry_run => {
                    let mut store = open_store(&db)?;
                    let report = seed(&mut store, &outline, &labels, &options)
                        .context("Failed to seed articles")?;
                    println!(
                        "✓ Stored {} articles in {} ({} folders, {} front matter entries skipped)",
                        report.articles.len(),
                        db.display(),
                        report.structural,
                        report.front_matter
                    );
                }
                _ => {
                    let report = plan(&outline, &labels, &options)
                        .context("Failed to resolve articles")?;
                    for article in &report.articles {
                        println!(
                            "{:>5}-{:<5} {}",
                            article.start_page, article.end_page, article.title
                        );
                    }
                }
            }
        }

        Commands::Outline {
            source,
            json,
            source_args,
        } => {
            let options = source_args.to_options()?;
            let outline = open_source(&source)?;
            let index = outline.parse(options.sentinel)?;
            let tree = build_tree(&index, &ObjectRef::new(&options.root))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tree.flatten())?);
            } else {
                for entry in &tree {
                    println!("{}", entry);
                }
            }
        }

        Commands::Next { db } => {
            let store = open_store(&db)?;
            match store.next_unread()? {
                Some(article) => println!(
                    "#{} {} (pages {}-{})",
                    article.id, article.title, article.start_page, article.end_page
                ),
                None => println!("All articles read"),
            }
        }

        Commands::MarkRead { db, id } => {
            let store = open_store(&db)?;
            store
                .mark_read(id)
                .with_context(|| format!("Failed to mark article {} as read", id))?;
            println!("✓ Marked article {} as read", id);
        }

        Commands::Status { db } => {
            let store = open_store(&db)?;
            let progress = store.progress()?;
            println!("{} ({:.1}%)", progress, progress.ratio() * 100.0);
        }
    }

    Ok(())
}

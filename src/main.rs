use clap::{Parser, Subcommand};
use covergen::render::{Compositor, Quality, TemplateLibrary, TitleFont};
use covergen::types::CoverRecord;
use covergen::{batch, cache::CoverCache, config, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that touch the cover cache.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Ignore existing covers — force re-rendering
    #[arg(long)]
    no_cache: bool,
}

#[derive(Parser)]
#[command(name = "covergen")]
#[command(about = "Featured-image generator for blog posts")]
#[command(long_about = "\
Featured-image generator for blog posts

Given an article title and category, covergen derives a compact URL slug,
picks the category's background template, wraps the title against real font
metrics, composites it onto the template, and persists the result as lossy
WebP. Covers are content-addressed: the same (title, category) pair always
maps to the same file, and an existing file is never re-rendered.

Asset layout:

  templates/
  ├── blog-default.png             # Mandatory fallback background
  ├── blog-marketing.png           # One background per category
  └── blog-seo.png
  assets/title.ttf                 # Title font
  covers/                          # Cache of {slug}-{hash}.webp files

Run 'covergen gen-config' to generate a documented covergen.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "covergen.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render (or reuse) the cover for one title
    Render {
        /// Article title
        title: String,
        /// Category label for template selection
        #[arg(long, default_value = "geral")]
        category: String,
        #[command(flatten)]
        cache_args: CacheArgs,
    },
    /// Render all covers from a JSON manifest of {title, category} pairs
    Batch {
        /// Path to the requests manifest (JSON array)
        manifest: PathBuf,
        #[command(flatten)]
        cache_args: CacheArgs,
    },
    /// Validate configuration and startup assets without rendering
    Check,
    /// Print a stock covergen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Render {
            title,
            category,
            cache_args,
        } => {
            let cover_cache = open_cache(&config)?;
            let cached = !cache_args.no_cache && cover_cache.contains(&title, &category);
            let path = if cache_args.no_cache {
                cover_cache.refresh(&title, &category)?
            } else {
                cover_cache.get_or_create(&title, &category)?
            };
            output::print_render_result(&CoverRecord {
                title,
                category,
                path: path.display().to_string(),
                cached,
            });
        }
        Command::Batch {
            manifest,
            cache_args,
        } => {
            init_thread_pool(&config);
            let cover_cache = open_cache(&config)?;
            let requests = batch::load_requests(&manifest)?;
            println!("==> Rendering {} covers", requests.len());

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_batch_event(&event);
                }
            });
            let result = batch::run_batch(&cover_cache, &requests, cache_args.no_cache, Some(tx));
            printer.join().unwrap();

            let manifest_out = Path::new("covers-manifest.json");
            batch::write_manifest(manifest_out, &result.records)?;
            output::print_batch_summary(&result.stats);
            println!("==> Manifest: {}", manifest_out.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            TitleFont::load(Path::new(&config.font_path), config.font_size_px)?;
            let templates = TemplateLibrary::load(Path::new(&config.templates_dir))?;
            let categories: Vec<&str> = templates.category_names().collect();
            for line in output::format_check_report(
                &config.font_path,
                templates.len(),
                &categories,
                &config.cache_dir,
            ) {
                println!("{line}");
            }
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load startup assets and open the cover cache.
///
/// Font and template failures abort here, before any title is processed.
fn open_cache(config: &config::CoverConfig) -> Result<CoverCache<TitleFont>, Box<dyn std::error::Error>> {
    let font = TitleFont::load(Path::new(&config.font_path), config.font_size_px)?;
    let templates = TemplateLibrary::load(Path::new(&config.templates_dir))?;
    let compositor = Compositor::new(
        templates,
        config.geometry(),
        Quality::new(config.output_quality),
    );
    Ok(CoverCache::new(
        Path::new(&config.cache_dir),
        compositor,
        font,
    )?)
}

/// Initialize the rayon thread pool based on config.
///
/// Caps at the number of available CPU cores — user can constrain down,
/// not up.
fn init_thread_pool(config: &config::CoverConfig) {
    let threads = config::effective_threads(config);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

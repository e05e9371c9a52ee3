use clap::{Parser, Subcommand};
use lattice::config::{self, CONFIG_FILENAME};
use lattice::imaging::{self, RustBackend};
use lattice::slugs;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lattice")]
#[command(about = "Slug and thumbnail tools for content-managed sites")]
#[command(long_about = "\
Slug and thumbnail tools for content-managed sites

Settings are read from lattice.toml in the working directory (or the file
given with --config). Every key is optional; missing keys use the stock
defaults shown by 'lattice gen-config'.

Examples:

  lattice slugify \"Hello, World!\"                      # hello-world
  lattice slugify \"Hello, World!\" --taken hello-world  # hello-world-4821
  lattice crop uploads/dawn.jpg                         # crop to images.uploaded_img_size
  lattice crop uploads/dawn.jpg --width 400 --height 300 --anchor top

Set RUST_LOG (e.g. RUST_LOG=lattice=debug) for more detail.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the unique slug for a title
    Slugify {
        title: String,
        /// Slug already in use (repeatable)
        #[arg(long)]
        taken: Vec<String>,
    },
    /// Crop an image in place to fill a box
    Crop {
        path: PathBuf,
        /// Target width (defaults to images.uploaded_img_size)
        #[arg(long)]
        width: Option<u32>,
        /// Target height (defaults to images.uploaded_img_size)
        #[arg(long)]
        height: Option<u32>,
        /// top, middle or bottom (defaults to images.crop_anchor)
        #[arg(long)]
        anchor: Option<String>,
    },
    /// Validate the config file
    Check,
    /// Print a stock lattice.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Slugify { title, taken } => {
            let config = config::load_config(&cli.config)?;
            let taken: HashSet<String> = taken.into_iter().collect();
            let slug =
                slugs::generate_unique_slug(&title, |s| taken.contains(s), &config.slugs)?;
            println!("{slug}");
        }
        Command::Crop {
            path,
            width,
            height,
            anchor,
        } => {
            let config = config::load_config(&cli.config)?;
            let [default_w, default_h] = config.images.uploaded_img_size;
            let anchor = anchor.unwrap_or_else(|| config.images.crop_anchor.to_string());
            let backend = RustBackend::with_quality(config.images.quality());
            let dims = imaging::crop_file_with_anchor(
                &backend,
                &path,
                width.unwrap_or(default_w),
                height.unwrap_or(default_h),
                &anchor,
            )?;
            println!("{} → {}x{}", path.display(), dims.width, dims.height);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let config = config::load_config(&cli.config)?;
            let [w, h] = config.images.uploaded_img_size;
            println!(
                "    thumbnails {w}x{h} anchored {}, quality {}",
                config.images.crop_anchor, config.images.quality
            );
            println!("    current site {}", config.site.current_site);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lattice=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use clap::{Parser, Subcommand};
use conference_pages::{config, generate, output, render, site, validate};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "conference-pages")]
#[command(about = "Generate missing person, session, talk and day pages from site data")]
#[command(long_about = "\
Generate missing person, session, talk and day pages from site data

A page is generated for every entry of the data collections unless a page
already exists in the entry's directory. Hand-written pages always win.

Site structure:

  site/
  ├── config.toml                  # Optional, see 'gen-config'
  ├── _data/
  │   ├── people.yml               # alice: {name: ...}     → people/alice/
  │   ├── sessions.yml             # s1: {title, talks: []} → sessions/s1/
  │   │                            #   talk {speaker: bob}  → sessions/s1/bob/
  │   └── program.yml              # - {title, slots}       → program/day1/
  ├── _layouts/
  │   ├── person.wiki              # Required for person pages
  │   ├── session.wiki             # Required for session and talk pages
  │   ├── talk.wiki
  │   └── day_program.html         # Required for day pages
  └── people/alice/index.wiki      # Hand-written: alice is skipped

Layouts are Tera templates with `page` and `site` in scope and two extra
filters: select(key, value) and having(key, value).")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory for rendered pages (default: `destination` from config.toml)
    #[arg(long, global = true)]
    destination: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List declared pages, data collections and layouts
    Scan,
    /// Show the pages that would be generated, without writing anything
    Generate,
    /// Generate missing pages and render them into the destination
    Build,
    /// Validate the data collections
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let site = load_site(&cli.source)?;
            output::print_scan_output(&site);
        }
        Command::Generate => {
            let mut site = load_site(&cli.source)?;
            let report = generate::generate_all(&mut site)?;
            output::print_generate_output(&site, &report);
        }
        Command::Build => {
            let mut site = load_site(&cli.source)?;
            let destination = cli
                .destination
                .clone()
                .unwrap_or_else(|| cli.source.join(&site.config.destination));

            println!("==> Generating pages from {}", cli.source.display());
            let report = generate::generate_all(&mut site)?;
            output::print_generate_output(&site, &report);

            println!("==> Rendering into {}", destination.display());
            let rendered = render::render_generated(&site, &destination)?;
            output::print_build_output(&rendered);

            println!("==> Build complete: {}", destination.display());
        }
        Command::Check => {
            let site = load_site(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let issues = validate::validate(&site.data);
            output::print_check_output(&issues);
            if !issues.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Resolve the config and load the site rooted at `source`.
fn load_site(source: &Path) -> Result<site::Site, Box<dyn std::error::Error>> {
    let site_config = config::load_config(source)?;
    Ok(site::load(source, site_config)?)
}

use clap::{Parser, Subcommand};
use html2jsonp::{compile, config, output, resolve};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "html2jsonp")]
#[command(about = "Compiles text templates to JSONP-style JavaScript")]
#[command(long_about = "\
Compiles text templates to JSONP-style JavaScript

Each configured template file is embedded as a string literal passed to a
named callback invocation, ready to be loaded as a script:

  greeting.html              build/greeting.js
  ─────────────              ─────────────────────
  Hello,                     jsonpCallback(
    World!              →      'Hello,\\n' +
                                 '  World!'
                             )

Configuration lives in html2jsonp.toml:

  [options]
  quote_char = \"'\"            # Literal delimiter
  strip = false                # Collapse line breaks in content
  function_name = \"jsonpCallback\"

  [[files]]
  src = [\"templates/**/*.html\"] # Globs or literal paths
  dest = \"build/\"               # Directory, or an explicit file target

A directory destination collects outputs as <dir>/<name>.js; any other
destination writes each output alongside its source with a .js extension.
Missing sources are warned about and skipped; the batch continues.

Run 'html2jsonp gen-config' to print a documented html2jsonp.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "html2jsonp.toml", global = true)]
    config: PathBuf,

    /// Base directory that sources and destinations are resolved against
    #[arg(long, default_value = ".", global = true)]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile all configured templates
    Build,
    /// Resolve the file set and show the plan without writing
    Check {
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock html2jsonp.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let mappings = resolve::resolve_files(&config.files, &cli.base_dir)?;
            let result = compile::compile(&mappings, &config.options, &cli.base_dir)?;
            output::print_compile_output(&result);
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.config)?;
            let mappings = resolve::resolve_files(&config.files, &cli.base_dir)?;
            let plan = compile::plan(&mappings, &config.options, &cli.base_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan(&plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool from processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let workers = config::effective_workers(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .ok();
}

// src/main.rs
// Compile a scanner description and print each state's reconciled rules.
// Usage:
//   scanc c.txt                      # print canonical rules
//   scanc c.txt --json c.states.json # also write the table as JSON

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use scanc::{CompileOptions, compile, scanner::save_states_json};

#[derive(Parser)]
#[command(name = "scanc")]
#[command(about = "Reconcile the patterns of a scanner description into disjoint per-state rules")]
struct Cli {
    /// Scanner description file
    description: PathBuf,

    /// Write the compiled states as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Keep reconciled order instead of sorting rules by pattern
    #[arg(long)]
    no_sort: bool,

    /// Reconcile states one at a time
    #[arg(long)]
    sequential: bool,

    /// Column width for rendered rules
    #[arg(long, default_value_t = 9)]
    width: usize,

    /// Log stage details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            parallel: !self.sequential,
            sort: !self.no_sort,
            column_width: self.width,
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.description)
        .with_context(|| format!("failed to read {}", cli.description.display()))?;
    let opts = cli.options();
    let table = compile(&text, &opts)?;
    print!("{}", table.render(opts.column_width));

    if let Some(out) = &cli.json {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        save_states_json(out, &table)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!("[scanc] wrote {}", out.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

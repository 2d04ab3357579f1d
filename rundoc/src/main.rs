use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use colored::Colorize;
use confdoc::util::{hyphenate, hyphenate_enum_value};
use rundoc::{config::RundocConfig, ctx::AppContext};

#[derive(Parser)]
#[command(name = "rundoc", version)]
#[command(about = "Runner jar layout verifier and configuration reference generator")]
struct Cli {
    /// Workspace directory (defaults to the current directory)
    #[arg(long, short = 'w', global = true)]
    workspace: Option<PathBuf>,

    /// Configuration file (defaults to .rundoc.toml in the workspace)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a runner jar's Class-Path against its library directory
    Verify {
        /// Runner jar, relative to the workspace (defaults to [verify].runner_jar)
        jar: Option<PathBuf>,

        /// Library directory, relative to the workspace (defaults to `lib` next to the jar)
        #[arg(long)]
        lib_dir: Option<PathBuf>,

        /// Expected Main-Class attribute
        #[arg(long)]
        main_class: Option<String>,

        /// Expected library file name; repeatable
        #[arg(long = "expect", value_name = "NAME")]
        expect: Vec<String>,

        /// Expected library as group:artifact:version[:packaging]; repeatable
        #[arg(long = "expect-artifact", value_name = "G:A:V[:P]")]
        expect_artifact: Vec<String>,
    },
    /// Generate AsciiDoc configuration reference pages
    Doc {
        /// Metadata file (.json or .toml), relative to the workspace
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Output directory, relative to the workspace
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the hyphenated form of identifiers
    Hyphenate {
        /// Treat identifiers as enum constants (FOO_BAR -> foo-bar)
        #[arg(long = "enum")]
        enum_value: bool,

        #[arg(required = true)]
        idents: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Print the JSON schema of the configuration file instead
        #[arg(long)]
        schema: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let workspace = match cli.workspace {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut ctx = AppContext::new(workspace);

    match cli.command {
        Commands::Verify {
            jar,
            lib_dir,
            main_class,
            expect,
            expect_artifact,
        } => {
            ctx.load_config(cli.config)?;
            let mut expectation = ctx.layout_expectation()?;
            if let Some(lib_dir) = lib_dir {
                expectation.lib_dir = Some(ctx.workspace_relative(&lib_dir));
            }
            if let Some(main_class) = main_class {
                expectation.main_class = Some(main_class);
            }
            for name in expect {
                expectation.expect_lib(name);
            }
            for coords in &expect_artifact {
                expectation.expect_artifact_str(coords)?;
            }

            let jar = ctx.runner_jar_path(jar)?;
            let report = ctx.verify_runner_jar(&jar, &expectation)?;
            if !report.passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Doc { metadata, output } => {
            ctx.load_config(cli.config)?;
            let written = ctx.generate_docs(metadata, output)?;
            println!(
                "{}",
                format!("Generated {} configuration reference pages", written.len())
                    .green()
                    .bold()
            );
        }
        Commands::Hyphenate { enum_value, idents } => {
            for ident in idents {
                let hyphenated = if enum_value {
                    hyphenate_enum_value(&ident)
                } else {
                    hyphenate(&ident)
                };
                println!("{hyphenated}");
            }
        }
        Commands::Config { schema } => {
            if schema {
                println!("{}", RundocConfig::schema_json()?);
            } else {
                let config = ctx.load_config(cli.config)?;
                print!("{}", toml::to_string_pretty(config)?);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yamlkit::config::Config;
use yamlkit::{Element, Object, Yaml, YamlBuilder};

/// YAMLKit - read, edit and convert YAML documents by path
#[derive(Parser)]
#[command(name = "yamlkit")]
#[command(version)]
#[command(about = "Read, edit and convert YAML documents by path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path separator (default: from config, usually '.')
    #[arg(short, long, global = true)]
    separator: Option<char>,

    /// Config file (default: ~/.config/yamlkit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at PATH
    Get {
        /// YAML file ('-' for stdin)
        file: String,
        /// Path such as server.port
        path: String,
    },

    /// Set the value at PATH and print the document
    Set {
        /// YAML file ('-' for stdin)
        file: String,
        path: String,
        value: String,
        /// Parse VALUE as YAML instead of taking it as a string
        #[arg(long)]
        yaml: bool,
        /// Write the result back to FILE instead of stdout
        #[arg(short, long)]
        in_place: bool,
    },

    /// Delete the value at PATH and print the document
    Del {
        /// YAML file ('-' for stdin)
        file: String,
        path: String,
        /// Write the result back to FILE instead of stdout
        #[arg(short, long)]
        in_place: bool,
    },

    /// Convert a document between YAML and JSON
    Convert {
        /// Input file ('-' for stdin); JSON input is detected by extension
        file: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        to: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "yamlkit=warn",
        1 => "yamlkit=debug",
        _ => "yamlkit=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    if let Some(separator) = cli.separator {
        config.path_separator = separator;
    }
    Ok(config)
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))
    }
}

fn load_root(yaml: &Yaml, file: &str) -> Result<Object> {
    let content = read_input(file)?;
    let root = if file.ends_with(".json") {
        yaml.from_json(&content)
    } else {
        yaml.from_yaml(&content)
    };
    root.with_context(|| format!("Failed to parse {}", file))
}

fn write_output(file: &str, in_place: bool, text: &str) -> Result<()> {
    if in_place && file != "-" {
        std::fs::write(file, text).with_context(|| format!("Failed to write {}", file))?;
    } else {
        io::stdout().write_all(text.as_bytes())?;
    }
    Ok(())
}

fn render(yaml: &Yaml, file: &str, root: &Object) -> Result<String> {
    if file.ends_with(".json") {
        let mut text = yaml.to_json(root)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(yaml.to_yaml(root))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let yaml = YamlBuilder::new().config(config).build()?;

    match &cli.command {
        Commands::Get { file, path } => {
            let root = load_root(&yaml, file)?;
            let value = yaml
                .get(&root, path)
                .with_context(|| format!("No value at {}", path))?;
            let text = match value {
                Element::Primitive(p) => format!("{}\n", p),
                other => yaml.dump(other),
            };
            io::stdout().write_all(text.as_bytes())?;
        }
        Commands::Set {
            file,
            path,
            value,
            yaml: parse_value,
            in_place,
        } => {
            let root = load_root(&yaml, file)?;
            let value = if *parse_value {
                yaml.load(value).context("Failed to parse VALUE as YAML")?
            } else {
                Element::from(value.as_str())
            };
            let root = yaml.set(root, path, value);
            write_output(file, *in_place, &render(&yaml, file, &root)?)?;
        }
        Commands::Del {
            file,
            path,
            in_place,
        } => {
            let root = load_root(&yaml, file)?;
            let root = yaml.remove(root, path);
            write_output(file, *in_place, &render(&yaml, file, &root)?)?;
        }
        Commands::Convert { file, to } => {
            let content = read_input(file)?;
            let element = if file.ends_with(".json") {
                yamlkit::document::parser::parse_json(&content)
            } else {
                yaml.load(&content)
            }
            .with_context(|| format!("Failed to parse {}", file))?;
            let text = match to {
                OutputFormat::Yaml => yaml.dump(&element),
                OutputFormat::Json => {
                    let mut text = yaml.dump_json(&element)?;
                    text.push('\n');
                    text
                }
            };
            io::stdout().write_all(text.as_bytes())?;
        }
    }

    Ok(())
}

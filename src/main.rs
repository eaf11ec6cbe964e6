use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdocx::Config;

#[derive(Parser)]
#[command(name = "mdocx")]
#[command(about = "Convert between Markdown and DOCX documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a file; the direction is chosen by its extension
    Convert {
        /// Input file (.md or .docx)
        input: PathBuf,

        /// Output file (defaults to the input name with the converted extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the web UI and conversion API
    Serve {
        /// Config file path
        #[arg(long, default_value = "mdocx.toml")]
        config: PathBuf,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { input, output } => convert(&input, output),
        Command::Serve { config, port } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let mut config = Config::load(&config);
            if let Some(port) = port {
                config.server.port = port;
            }

            if let Err(e) = mdocx::server::serve(config).await {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        }
    }
}

fn convert(input: &Path, output: Option<PathBuf>) {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "md" | "markdown" => {
            let markdown = match fs::read_to_string(input) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            let bytes = match mdocx::markdown_to_docx(&markdown) {
                Ok(bytes) => bytes,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let output = output.unwrap_or_else(|| input.with_extension("docx"));
            write_output(&output, &bytes);
        }
        "docx" | "doc" => {
            let data = match fs::read(input) {
                Ok(data) => data,
                Err(e) => {
                    eprintln!("Error reading {}: {}", input.display(), e);
                    std::process::exit(1);
                }
            };

            let markdown = match mdocx::docx_to_markdown(&data) {
                Ok(markdown) => markdown,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let output = output.unwrap_or_else(|| input.with_extension("md"));
            write_output(&output, markdown.as_bytes());
        }
        _ => {
            eprintln!(
                "Unsupported input extension: {} (expected .md or .docx)",
                input.display()
            );
            std::process::exit(1);
        }
    }
}

fn write_output(output: &Path, bytes: &[u8]) {
    if let Err(e) = fs::write(output, bytes) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }
    println!("Created {}", output.display());
}

//! CLI application logic
//!
//! Wires the transformer to filesystem collaborators: the loader reads the
//! input file, the graph collects records in memory, and the reporter turns
//! build-fatal messages into a non-zero exit.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};

use graphdoc_core::{
    AsciidocTransformer, AttributeValue, BuildReporter, ContentGraph, ContentLoader,
    DocumentRecord, Sha1Identity, SourceNode, TransformContext, TransformOutcome,
    TransformerOptions,
};

/// Output format for converted documents
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Rendered HTML body only
    #[default]
    Html,
    /// The full document record as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "graphdoc")]
#[command(author, version, about = "AsciiDoc into content-graph document nodes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an AsciiDoc file and print the resulting document record
    Convert {
        /// Input AsciiDoc file
        input: PathBuf,

        /// Site path prefix (affects imagesdir resolution)
        #[arg(long, default_value = "")]
        path_prefix: String,

        /// Processor attribute, repeatable (key=value)
        #[arg(long = "attr", value_parser = parse_attr)]
        attributes: Vec<(String, String)>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Parse a `key=value` attribute argument
fn parse_attr(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// CLI entry point
pub fn run_cli() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            input,
            path_prefix,
            attributes,
            format,
        } => {
            let record = convert_command(&input, &path_prefix, &attributes)?;
            match format {
                OutputFormat::Html => print!("{}", record.html),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            }
            Ok(())
        }
    }
}

/// Loader reading the node's file from disk
struct FileLoader;

#[async_trait]
impl ContentLoader for FileLoader {
    async fn load_node_content(&self, node: &SourceNode) -> anyhow::Result<String> {
        let path = node
            .absolute_path
            .as_ref()
            .ok_or_else(|| anyhow!("node {} has no file path", node.id))?;
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

/// Graph collecting records in memory
#[derive(Default)]
struct CollectingGraph {
    records: Mutex<Vec<DocumentRecord>>,
}

impl ContentGraph for CollectingGraph {
    fn create_node(&self, record: DocumentRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn create_parent_child_link(&self, _parent: &SourceNode, _child_id: &str) {}
}

/// Reporter capturing the first build-fatal message
#[derive(Default)]
struct CapturingReporter {
    message: Mutex<Option<String>>,
}

impl BuildReporter for CapturingReporter {
    fn panic_on_build(&self, message: &str) {
        let mut slot = self.message.lock().unwrap();
        if slot.is_none() {
            *slot = Some(message.to_string());
        }
    }
}

/// Convert one file and return its document record
pub fn convert_command(
    input: &Path,
    path_prefix: &str,
    attributes: &[(String, String)],
) -> Result<DocumentRecord> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();
    let node = SourceNode {
        id: input.display().to_string(),
        extension,
        absolute_path: Some(input.to_path_buf()),
    };

    let mut options = TransformerOptions::default();
    for (key, value) in attributes {
        options
            .attributes
            .insert(key.clone(), AttributeValue::from(value.as_str()));
    }

    let graph = CollectingGraph::default();
    let reporter = CapturingReporter::default();
    let identity = Sha1Identity;
    let transformer = AsciidocTransformer::new();

    let ctx = TransformContext {
        node: &node,
        loader: &FileLoader,
        graph: &graph,
        identity: &identity,
        reporter: &reporter,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(transformer.on_create_node(&ctx, &options, path_prefix))?;

    match outcome {
        TransformOutcome::Emitted => {
            let mut records = graph.records.lock().unwrap();
            records.pop().ok_or_else(|| anyhow!("no record emitted"))
        }
        TransformOutcome::Skipped => {
            bail!(
                "unsupported file extension for {} (expected one of: adoc, asciidoc)",
                input.display()
            )
        }
        TransformOutcome::Failed => {
            let message = reporter
                .message
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| "conversion failed".to_string());
            bail!("{message}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_adoc(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_convert_command_produces_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_adoc(&dir, "post.adoc", "= Hello: World\n\nSome *content*.");

        let record = convert_command(&input, "/blog", &[]).unwrap();
        assert_eq!(record.document.main, "Hello");
        assert_eq!(record.document.subtitle, "World");
        assert!(record.html.contains("<strong>content</strong>"));
    }

    #[test]
    fn test_convert_command_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_adoc(&dir, "notes.md", "# nope");

        let err = convert_command(&input, "", &[]).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn test_convert_command_surfaces_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_adoc(&dir, "bad.adoc", "= T\n\nchart::q.csv[]");

        let err = convert_command(&input, "", &[]).unwrap_err();
        assert!(err.to_string().contains("chart"));
    }

    #[test]
    fn test_attr_arguments_reach_the_processor() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_adoc(&dir, "post.adoc", "= T\n\nimage::pic.png[]");

        let record =
            convert_command(&input, "", &[("imagesdir".to_string(), "/static@".to_string())])
                .unwrap();
        assert!(record.html.contains("src=\"/static/pic.png\""));
    }

    #[test]
    fn test_parse_attr() {
        assert_eq!(
            parse_attr("icons=font").unwrap(),
            ("icons".to_string(), "font".to_string())
        );
        assert!(parse_attr("noequals").is_err());
        assert!(parse_attr("=value").is_err());
    }
}

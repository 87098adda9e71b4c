//! End-to-end load/convert tests for the processor

use std::sync::Arc;

use graphdoc_processor::ast::MacroCall;
use graphdoc_processor::{
    AttributeValue, Block, BlockMacro, Processor, ProcessorError, ProcessorOptions,
};

fn options_with(key: &str, value: &str) -> ProcessorOptions {
    let mut options = ProcessorOptions::default();
    options.attributes.insert(key.to_string(), value.into());
    options
}

#[test]
fn full_document_converts_with_metadata() {
    let source = "\
= Operations Guide: Second Edition
Jane Mary Doe <jane@example.com>
v2.0, 2020-04-13: Spring release
:page-category: ops
:toc:

== Overview

Keep the *lights* on.

* check dashboards
* rotate keys

image::diagrams/flow.png[Flow]
";

    let processor = Processor::new();
    let doc = processor
        .load(source, &options_with("imagesdir", "/site/images@"))
        .unwrap()
        .convert()
        .unwrap();

    let title = doc.document_title().unwrap();
    assert_eq!(title.main(), "Operations Guide");
    assert_eq!(title.subtitle(), Some("Second Edition"));
    assert_eq!(title.combined(), "Operations Guide: Second Edition");

    let author = doc.author().unwrap();
    assert_eq!(author.full_name, "Jane Mary Doe");
    assert_eq!(author.initials, "JMD");

    assert!(doc.has_revision_info());
    assert_eq!(doc.revision_number(), Some("2.0"));

    assert_eq!(
        doc.attribute("page-category"),
        Some(&AttributeValue::from("ops"))
    );
    assert_eq!(doc.attribute("toc"), Some(&AttributeValue::Bool(true)));

    let html = doc.html();
    assert!(html.contains("<h2>Overview</h2>"));
    assert!(html.contains("<strong>lights</strong>"));
    assert!(html.contains("<li>check dashboards</li>"));
    assert!(html.contains("src=\"/site/images/diagrams/flow.png\""));
    // The document title is not part of the embedded body
    assert!(!html.contains("Operations Guide"));
}

#[test]
fn registered_macro_expands_during_convert() {
    struct Badge;
    impl BlockMacro for Badge {
        fn expand(&self, target: &str, attrs: &[String]) -> graphdoc_processor::Result<Block> {
            let color = attrs.first().map(String::as_str).unwrap_or("gray");
            Ok(Block::Raw(format!(
                "<span class=\"badge badge-{}\">{}</span>",
                color, target
            )))
        }
    }

    let mut processor = Processor::new();
    processor.register_block_macro("badge", Arc::new(Badge));

    let doc = processor
        .load("badge::beta[blue]", &ProcessorOptions::default())
        .unwrap()
        .convert()
        .unwrap();
    assert_eq!(doc.html(), "<span class=\"badge badge-blue\">beta</span>\n");
}

#[test]
fn failing_macro_handler_surfaces_as_convert_error() {
    struct Broken;
    impl BlockMacro for Broken {
        fn expand(&self, _target: &str, _attrs: &[String]) -> graphdoc_processor::Result<Block> {
            Err(ProcessorError::MacroFailed {
                name: "broken".to_string(),
                reason: "no data source".to_string(),
            })
        }
    }

    let mut processor = Processor::new();
    processor.register_block_macro("broken", Arc::new(Broken));

    let err = processor
        .load("broken::x[]", &ProcessorOptions::default())
        .unwrap()
        .convert()
        .unwrap_err();
    assert!(err.to_string().contains("no data source"));
}

#[test]
fn macro_handler_can_return_structured_blocks() {
    struct Callout;
    impl BlockMacro for Callout {
        fn expand(&self, target: &str, _attrs: &[String]) -> graphdoc_processor::Result<Block> {
            Ok(Block::Paragraph(graphdoc_processor::ast::Paragraph {
                inlines: vec![graphdoc_processor::Inline::Text(format!("See {}", target))],
            }))
        }
    }

    let mut processor = Processor::new();
    processor.register_block_macro("callout", Arc::new(Callout));

    let doc = processor
        .load("callout::appendix[]", &ProcessorOptions::default())
        .unwrap()
        .convert()
        .unwrap();
    assert_eq!(doc.html(), "<p>See appendix</p>\n");
}

#[test]
fn macro_call_shape_is_preserved_until_convert() {
    // A load with an unknown macro succeeds; only convert fails
    let processor = Processor::new();
    let doc = processor
        .load("chart::q3.csv[bar]", &ProcessorOptions::default())
        .unwrap();
    let err = doc.convert().unwrap_err();
    assert!(matches!(err, ProcessorError::UnknownMacro(name) if name == "chart"));

    // MacroCall itself is a plain data carrier
    let call = MacroCall {
        name: "chart".to_string(),
        target: "q3.csv".to_string(),
        attrs: vec!["bar".to_string()],
    };
    assert_eq!(call.attrs.len(), 1);
}

use anyhow::{Context, Result};
use docblocks_config::Config;
use docblocks_engine::io;
use docblocks_engine::parsing::{
    BlockRecord, EmbedDescriptor, ParsedDoc, embed_id, inline::InlineNode, is_only_page_blocks,
    parse_document, rope::preview, sequence_numbers,
};
use regex::Regex;
use std::{env, path::Path, path::PathBuf, process};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();
    log::debug!("Config path: {}", config_path.display());

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let paths: Vec<PathBuf> = if args.len() > 1 {
        args[1..].iter().map(PathBuf::from).collect()
    } else {
        match config.document_paths() {
            Ok(paths) if !paths.is_empty() => paths,
            Ok(_) => {
                eprintln!("Error: No documents given and none matched by the config file");
                eprintln!("Usage: {} <document.md>...", args[0]);
                eprintln!(
                    "Or set `documents = \"<glob>\"` in {}",
                    config_path.display()
                );
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    };

    let embeds = match embed_descriptors(&config) {
        Ok(embeds) => embeds,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    for path in &paths {
        let body = io::read_document(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let doc = parse_document(&body, &embeds);
        print_report(path, &body, &doc);
    }

    Ok(())
}

fn embed_descriptors(config: &Config) -> Result<Vec<EmbedDescriptor>> {
    config
        .embeds
        .iter()
        .map(|embed| {
            let regex = Regex::new(&embed.pattern)
                .with_context(|| format!("invalid pattern for embed {:?}", embed.title))?;
            Ok(EmbedDescriptor::from_regex(
                embed.title.clone(),
                embed.component.clone(),
                embed.keywords.clone(),
                regex,
            ))
        })
        .collect()
}

fn print_report(path: &Path, body: &str, doc: &ParsedDoc) {
    println!("{}", path.display());

    println!("  blocks:");
    for (block, n) in doc.ordered.iter().zip(sequence_numbers(&doc.ordered)) {
        println!("    {} {n}  {}", block.kind.label(), block.id);
    }

    println!("  records:");
    for record in doc.quizzes.iter().chain(&doc.pages).chain(&doc.feedback) {
        print_record(record);
    }

    println!("  fences:");
    for fence in &doc.fences {
        let unclosed = if fence.closed { "" } else { " (unclosed)" };
        println!(
            "    {}{} {}..{}{unclosed}",
            fence.markup, fence.info, fence.span.start, fence.span.end
        );
    }

    let inline = doc
        .inline
        .iter()
        .filter(|n| matches!(n, InlineNode::Block { .. }))
        .count();
    println!("  inline blocks: {inline}");

    println!("  embeds:");
    for embed in &doc.embeds {
        println!(
            "    {} {} -> {} [{}]",
            embed.title,
            embed.href,
            embed.component,
            embed_id(&embed.href)
        );
    }

    println!("  only page blocks: {}", is_only_page_blocks(body));
}

fn print_record(record: &BlockRecord) {
    let id = if record.is_global_feedback() {
        "(global)"
    } else {
        record.id.as_str()
    };
    println!(
        "    [{}] {id}: {}",
        record.kind.label(),
        preview(&record.content, 60).replace('\n', " ")
    );
}

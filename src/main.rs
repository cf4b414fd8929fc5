//! brandkit - export a brand kit from a saved logo record

use anyhow::{anyhow, Context, Result};
use brandkit::config::Config;
use brandkit::export::{export_bundle, DirectoryWriter};
use brandkit::font::{DirectoryFetcher, FontCache};
use brandkit::model::load_record;
use brandkit::render::{encode_png, previews};
use log::info;
use std::path::PathBuf;

/// Print help message
fn print_help() {
    println!(
        r#"brandkit {} - brand asset generator

USAGE:
    brandkit [OPTIONS] <record.json>

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version information
    --out DIR           Output directory (bundle goes to DIR/brand_kit_<name>)
    --fonts DIR         Font directory (Family-Name-<weight>.ttf files)
    --previews          Also write preview thumbnails to previews/
    --init-config       Generate default config file

EXAMPLES:
    brandkit logo.json                  Export with configured defaults
    brandkit --out dist logo.json       Export into ./dist
    brandkit --init-config              Generate default config

CONFIG FILE:
    ~/.config/brandkit/config.toml (or $BRANDKIT_CONFIG)
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Value of `--name VALUE` or `--name=VALUE`
fn option_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == name {
            return iter.next().cloned();
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
    }
    None
}

/// First argument that is neither a flag nor a flag's value
fn record_arg(args: &[String]) -> Option<&String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--out" || arg == "--fonts" {
            iter.next();
            continue;
        }
        if !arg.starts_with('-') {
            return Some(arg);
        }
    }
    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("brandkit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // --init-config
    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default_config()?;
        println!("Config file generated:");
        println!("  Path: {}", path.display());
        return Ok(());
    }

    let record_path = record_arg(&args)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("No record file given (see --help)"))?;

    let cfg = Config::load();
    let out_dir = option_value(&args, "--out")
        .map(|d| PathBuf::from(brandkit::config::expand_path(&d, None)))
        .unwrap_or_else(|| cfg.output_dir());
    let fonts_dir = option_value(&args, "--fonts")
        .map(|d| PathBuf::from(brandkit::config::expand_path(&d, None)))
        .unwrap_or_else(|| cfg.fonts_dir());

    let json = std::fs::read_to_string(&record_path)
        .with_context(|| format!("Failed to read {}", record_path.display()))?;
    let doc = load_record(&json)
        .with_context(|| format!("Failed to load {}", record_path.display()))?;
    info!("Loaded record: {} line(s)", doc.lines().len());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start runtime")?;

    let cache = FontCache::new(DirectoryFetcher::new(&fonts_dir), cfg.fonts.cache_capacity);
    let bundle_dir = out_dir.join(doc.bundle_name());
    let mut writer = DirectoryWriter::new(&bundle_dir);

    let report = runtime.block_on(async {
        let (fonts, errors) = cache.font_book(&doc).await;
        if !errors.is_empty() {
            println!(
                "{} font weight(s) unavailable in {}, using placeholder glyphs",
                errors.len(),
                fonts_dir.display()
            );
        }
        export_bundle(&doc, &fonts, cache.fetcher(), &cfg.export, &mut writer)
            .await
            .map(|report| (report, fonts))
    })?;
    let (report, fonts) = report;

    if args.iter().any(|a| a == "--previews") {
        let dir = bundle_dir.join("previews");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        for preview in previews(&doc, &fonts)? {
            let path = dir.join(format!("{}.png", preview.name));
            std::fs::write(&path, encode_png(&preview.image)?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    println!("Bundle: {}", bundle_dir.display());
    println!("  {} files written", report.written.len());
    if !report.warnings.is_empty() {
        println!("  {} skipped:", report.warnings.len());
        for warning in &report.warnings {
            println!("    {}", warning);
        }
    }
    Ok(())
}

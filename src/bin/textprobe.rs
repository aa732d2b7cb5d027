use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use textprobe::services::text_processor::normalize_punctuation;
use textprobe::services::{analyze, analyze_request, ConfigStore, EngineConfig, ProfileRegistry};
use textprobe::AnalysisResult;
use tracing::info;

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// First argument that is neither a flag nor a flag's value.
fn input_path(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "--config" | "--out" => skip_next = true,
            a if a.starts_with("--") => {}
            a => return Some(a.to_string()),
        }
    }
    None
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin failed")?;
            Ok(buf)
        }
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read file failed: {}", p)),
    }
}

fn load_config(args: &[String]) -> Result<EngineConfig> {
    if let Some(path) = parse_arg_value(args, "--config") {
        return EngineConfig::from_file(&PathBuf::from(&path))
            .with_context(|| format!("load config failed: {}", path));
    }
    match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir).load().context("load default config failed"),
        None => Ok(EngineConfig::default()),
    }
}

fn print_summary(result: &AnalysisResult) {
    println!("Language: {} ({})", result.detected_language, result.language_code);
    println!("Words: {}", result.word_count);
    println!(
        "AI probability: {}%  Human probability: {}%  Confidence: {}",
        result.ai_probability, result.human_probability, result.confidence
    );
    let m = &result.metrics;
    println!(
        "Metrics: vocabulary={:.1} naturalness={:.1} coherence={:.1} structure={:.1} perplexity={:.1} format={:.1}",
        m.vocabulary_richness, m.naturalness, m.coherence, m.structure, m.perplexity, m.format_consistency
    );
    println!();

    println!("Segments: {}", result.segments.len());
    for s in &result.segments {
        let marker = if result.transitions.contains(&s.index) { "*" } else { " " };
        println!(
            "{}[S{:04}] bytes=[{},{}] ai={:>3}%  {}",
            marker,
            s.index,
            s.offsets.start,
            s.offsets.end,
            s.ai_probability,
            preview(&s.text, 100)
        );
    }
    println!();

    if !result.transition_details.is_empty() {
        println!("Transitions:");
        for t in &result.transition_details {
            println!("  segment {}: {}% -> {}% (delta {})", t.index, t.from, t.to, t.delta);
        }
        println!();
    }

    println!("Reasonings:");
    for r in &result.reasonings {
        println!("  - {}", r);
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!(
            "Usage:\n  textprobe [<path>|-] [--config <json_path>] [--summary] [--no-gate] [--out <json_path>]\n\nNotes:\n  - Reads stdin when no path (or `-`) is given.\n  - `--no-gate` skips the minimum/maximum length check.\n  - Set TEXTPROBE_LOG_DIR to also write a log file."
        );
        return Ok(());
    }

    textprobe::init_logging();

    let config = load_config(&args)?;
    let registry = ProfileRegistry::builtin().context("built-in language profiles are malformed")?;

    let path = input_path(&args);
    let raw = read_input(path.as_deref())?;
    let text = normalize_punctuation(&raw);
    info!(chars = text.chars().count(), "input.loaded");

    let result = if has_flag(&args, "--no-gate") {
        analyze(&text, &registry, &config)
    } else {
        analyze_request(&text, &registry, &config)?
    };

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Output<'a> {
        request_id: String,
        version: &'static str,
        #[serde(flatten)]
        result: &'a AnalysisResult,
    }

    let out = Output {
        request_id: uuid::Uuid::new_v4().to_string(),
        version: env!("CARGO_PKG_VERSION"),
        result: &result,
    };
    let json = serde_json::to_string_pretty(&out).context("serialize result failed")?;

    if let Some(out_path) = parse_arg_value(&args, "--out") {
        std::fs::write(&out_path, &json).with_context(|| format!("write out failed: {}", out_path))?;
        info!(path = %out_path, "output.written");
    }

    if has_flag(&args, "--summary") {
        print_summary(&result);
    } else {
        println!("{}", json);
    }

    Ok(())
}

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use phrase_extract::{
    extract_corpus, ExtractConfig, ExtractError, ModelSpec, PhraseEmitter, SpanEmitter,
    TableEmitter,
};

/// Phrase extraction from an aligned parallel corpus.
#[derive(Debug, Parser)]
#[command(name = "phrase-extract", version)]
struct Args {
    /// Target-side sentences, one per line
    target: PathBuf,
    /// Source-side sentences, one per line
    source: PathBuf,
    /// Word alignments as `source-target` index pairs, one sentence per line
    alignment: PathBuf,
    /// Output stem; writes EXTRACT, EXTRACT.inv and EXTRACT.o
    extract: PathBuf,
    /// Maximum phrase length in words
    max_length: usize,
    /// Legacy spelling of --orientation
    #[arg(value_name = "orientation", value_parser = ["orientation"], hide = true)]
    legacy_orientation: Option<String>,
    /// Write the orientation table (defaults to the wbe-msd model)
    #[arg(long, alias = "Orientation")]
    orientation: bool,
    /// Reordering model as LEVEL-FAMILY, LEVEL in wbe|phrase|hier, FAMILY in msd|mslr|mono
    #[arg(long = "model", value_name = "LEVEL-FAMILY")]
    models: Vec<ModelSpec>,
    /// Print phrase boundaries to stdout instead of writing tables
    #[arg(long, alias = "OnlyOutputSpanInfo")]
    only_output_span_info: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("phrase extraction from an aligned parallel corpus");

    let config = args.models.iter().fold(
        ExtractConfig::new(args.max_length)?
            .with_orientation(args.orientation || args.legacy_orientation.is_some())
            .with_only_output_span_info(args.only_output_span_info),
        |config, &spec| config.with_model(spec),
    );

    if !args.models.is_empty() {
        let models: Vec<String> = args.models.iter().map(ModelSpec::to_string).collect();
        info!("reordering models: {}", models.join(", "));
    }

    let target = open(&args.target, "opening target corpus")?;
    let source = open(&args.source, "opening source corpus")?;
    let alignment = open(&args.alignment, "opening alignment file")?;

    let mut emitter: Box<dyn PhraseEmitter> = if config.only_output_span_info {
        Box::new(SpanEmitter::new(BufWriter::new(io::stdout().lock())))
    } else {
        let orientation = if config.orientation {
            Some(create(&with_suffix(&args.extract, ".o"))?)
        } else {
            None
        };
        info!("Outputting to {}", args.extract.display());
        Box::new(TableEmitter::new(
            create(&args.extract)?,
            create(&with_suffix(&args.extract, ".inv"))?,
            orientation,
            config.effective_models(),
        ))
    };

    let stats = extract_corpus(target, source, alignment, &config, emitter.as_mut())?;
    info!(
        "extracted {} phrases from {} sentences ({} skipped)",
        stats.phrases, stats.sentences, stats.skipped
    );
    Ok(())
}

fn open(path: &Path, context: &'static str) -> Result<BufReader<File>, ExtractError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ExtractError::io(context, e))
}

fn create(path: &Path) -> Result<BufWriter<File>, ExtractError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExtractError::io("creating output table", e))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_invocation() {
        let args = Args::try_parse_from([
            "extract", "e", "f", "a", "out", "7", "orientation", "--model", "wbe-msd", "--model",
            "phrase-mslr",
        ])
        .unwrap();
        assert_eq!(args.legacy_orientation.as_deref(), Some("orientation"));
        assert!(!args.orientation);
        assert_eq!(args.models.len(), 2);

        let args = Args::try_parse_from([
            "extract", "e", "f", "a", "out", "7", "--Orientation", "--OnlyOutputSpanInfo",
        ])
        .unwrap();
        assert!(args.orientation);
        assert!(args.only_output_span_info);
    }

    #[test]
    fn rejects_unknown_trailing_token() {
        assert!(Args::try_parse_from(["extract", "e", "f", "a", "out", "7", "reorder"]).is_err());
        assert!(
            Args::try_parse_from(["extract", "e", "f", "a", "out", "7", "--model", "wbe-lr"])
                .is_err()
        );
    }

    #[test]
    fn output_suffixes() {
        assert_eq!(
            with_suffix(Path::new("work/extract"), ".inv"),
            PathBuf::from("work/extract.inv")
        );
    }
}

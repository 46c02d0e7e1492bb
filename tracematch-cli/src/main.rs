use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracematch::io::{list_trace_files, read_trace};
use tracematch::{
    compare_all_pairs, compare_all_pairs_par, CompareConfig, LabelledTrace, PairRecord,
};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "TraceMatch batch comparison (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    data_dir: String,
    output_file: Option<String>,
    search_window: usize,
    val_window: usize,
    num_rigid_pairs: usize,
    num_random_pairs: usize,
    max_shift_fraction: f64,
    repetitions: usize,
    seed: u64,
    trim: usize,
    parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = CompareConfig::default();
        Self {
            data_dir: String::new(),
            output_file: None,
            search_window: defaults.search_window,
            val_window: defaults.validation_window,
            num_rigid_pairs: defaults.rigid_pairs,
            num_random_pairs: defaults.random_pairs,
            max_shift_fraction: defaults.max_shift_fraction,
            repetitions: defaults.repetitions,
            seed: 337,
            trim: 0,
            parallel: false,
        }
    }
}

fn load_traces(config: &Config) -> Result<Vec<LabelledTrace>, Box<dyn std::error::Error>> {
    let mut traces = Vec::new();
    for path in list_trace_files(&config.data_dir)? {
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let trace = read_trace(&path)?.trimmed(config.trim)?;
        traces.push(LabelledTrace { label, trace });
    }
    Ok(traces)
}

fn write_report(
    out: &mut dyn Write,
    config: &Config,
    records: &[PairRecord],
) -> std::io::Result<()> {
    writeln!(out, "# tracematch batch report")?;
    writeln!(out, "#data.dir: {}", config.data_dir)?;
    writeln!(out, "#search.window: {}", config.search_window)?;
    writeln!(out, "#val.window: {}", config.val_window)?;
    writeln!(out, "#num.rigidpairs: {}", config.num_rigid_pairs)?;
    writeln!(out, "#num.randompairs: {}", config.num_random_pairs)?;
    writeln!(out, "#max.shift.fraction: {}", config.max_shift_fraction)?;
    writeln!(out, "#repetitions: {}", config.repetitions)?;
    writeln!(out, "#trim: {}", config.trim)?;
    writeln!(out, "#seed: {}", config.seed)?;
    writeln!(out)?;
    writeln!(
        out,
        "file1\tfile2\tloc1\tloc2\tflipped_maxcorr\tT_sample_size\tT_mean\tT_var"
    )?;
    for record in records {
        let location = record.comparison.location;
        let validation = record.comparison.validation;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            record.label1,
            record.label2,
            location.loc1,
            location.loc2,
            location.correlation,
            validation.sample_size,
            validation.mean_t,
            validation.var_t,
        )?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("tracematch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.data_dir.is_empty() {
        return Err("data_dir must be set in the config".into());
    }

    let compare_config = CompareConfig {
        search_window: config.search_window,
        validation_window: config.val_window,
        rigid_pairs: config.num_rigid_pairs,
        random_pairs: config.num_random_pairs,
        max_shift_fraction: config.max_shift_fraction,
        repetitions: config.repetitions,
    };
    compare_config.validate()?;

    let traces = load_traces(&config)?;
    if traces.len() < 2 {
        return Err(format!(
            "need at least two trace files in {}, found {}",
            config.data_dir,
            traces.len()
        )
        .into());
    }

    let records = if config.parallel {
        compare_all_pairs_par(&traces, &compare_config, config.seed)?
    } else {
        compare_all_pairs(&traces, &compare_config, config.seed)?
    };

    match &config.output_file {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            write_report(&mut file, &config, &records)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_report(&mut lock, &config, &records)?;
        }
    }

    Ok(())
}

use std::{
    fs::{File, OpenOptions},
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use treelights_core::{
    decode_frame, finalize::finalize, load_records, pretty_frame, save_records,
    serialize::frames_to_records, AppConfig, Compiler, Pattern, Programmer,
};

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Compile {
            input,
            output,
            pretty,
            config,
        } => load_config(config.as_deref())
            .and_then(|config| run_compile(&input, &output, pretty, &config)),
        Commands::Generate { output, pattern } => run_generate(&output, pattern.into()),
        Commands::Show { records } => run_show(&records),
        Commands::Upload {
            device,
            records,
            config,
        } => load_config(config.as_deref()).and_then(|config| run_upload(&device, &records, &config)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> treelights_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::debug!(?path, "loading configuration");
            AppConfig::load(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn run_compile(
    input: &Path,
    output: &Path,
    pretty: bool,
    config: &AppConfig,
) -> treelights_core::Result<()> {
    tracing::info!(?input, ?output, "compiling animation");

    let file = File::open(input)?;
    let compilation = Compiler::new(config.compiler.clone()).compile_reader(BufReader::new(file))?;

    if pretty || config.output.pretty {
        for (index, frame) in compilation.frames.iter().enumerate() {
            tracing::info!(frame = index, "\n{}", pretty_frame(frame));
        }
    }

    save_records(output, &compilation.records())?;
    tracing::info!(?output, "wrote pattern memory");
    Ok(())
}

fn run_generate(output: &Path, pattern: Pattern) -> treelights_core::Result<()> {
    let mut frames = pattern.frames();
    tracing::info!(?pattern, frames = frames.len(), "generated pattern");
    finalize(&mut frames)?;
    save_records(output, &frames_to_records(&frames))?;
    tracing::info!(?output, "wrote pattern memory");
    Ok(())
}

fn run_show(records: &Path) -> treelights_core::Result<()> {
    let records = load_records(records)?;
    for (index, record) in records.into_iter().enumerate() {
        tracing::info!(slot = index, %record, "\n{}", pretty_frame(&decode_frame(record)));
    }
    Ok(())
}

fn run_upload(device: &Path, records: &Path, config: &AppConfig) -> treelights_core::Result<()> {
    let records = load_records(records)?;
    tracing::info!(?device, records = records.len(), "uploading pattern");
    let port = OpenOptions::new().read(true).write(true).open(device)?;
    Programmer::new(port).upload(config.upload.mode, &records)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Christmas tree board pattern tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile an animation script into a pattern memory file.
    Compile {
        /// Animation script, one frame per line or spread over several lines.
        input: PathBuf,
        /// Output path for the 256 hex records.
        output: PathBuf,
        /// Log every frame laid out like the board.
        #[arg(short, long)]
        pretty: bool,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write a built-in procedural pattern.
    Generate {
        /// Output path for the 256 hex records.
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = PatternArg::Both)]
        pattern: PatternArg,
    },
    /// Print a pattern memory file in the board's layout.
    Show {
        /// Pattern memory file, one hex record per line.
        records: PathBuf,
    },
    /// Program a pattern memory file into the board.
    Upload {
        /// Serial device, already configured for 115200 baud.
        device: PathBuf,
        /// Pattern memory file, one hex record per line.
        records: PathBuf,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternArg {
    Waterfall,
    Sweep,
    Both,
}

impl From<PatternArg> for Pattern {
    fn from(value: PatternArg) -> Self {
        match value {
            PatternArg::Waterfall => Pattern::Waterfall,
            PatternArg::Sweep => Pattern::Sweep,
            PatternArg::Both => Pattern::Both,
        }
    }
}

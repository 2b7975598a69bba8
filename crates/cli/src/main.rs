mod logging;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use exif_stamp_core::{
    app_paths, load_config, resolve_base_dir, run, AppConfig, ApplyOptions, BatchOptions,
    BatchSummary, RenameAction, ScheduleMode,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "exif-stamp")]
#[command(about = "写真ファイルをEXIF撮影日時 (YYYY-MM-DD-HH-MM-SS) にリネームします")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    rename: RenameArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// ベースフォルダからの相対パス (絶対パスも可)
    #[arg(required = true)]
    subdir: Option<PathBuf>,
    #[arg(long)]
    base_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    apply: bool,
    /// 設定ファイルの apply = true を上書きして dry-run にします
    #[arg(long, default_value_t = false, conflicts_with = "apply")]
    dry_run: bool,
    #[arg(long, default_value_t = false)]
    skip_dupes: bool,
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long)]
    jobs: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Sequential,
    Concurrent,
}

impl From<ModeArg> for ScheduleMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Sequential => ScheduleMode::Sequential,
            ModeArg::Concurrent => ScheduleMode::Concurrent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config(config)) => match config.action {
            ConfigAction::Show => cmd_config_show(),
        },
        None => cmd_rename(cli.rename),
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    logging::init_logger(args.verbose, args.output == OutputFormat::Json);

    let config = load_config()?;
    let options = build_options(&args, &config)?;
    let summary = run(&options)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            print_table(&summary);
        }
    }

    if !summary.applied {
        eprintln!("dry-runモード: 実ファイルは変更していません。適用するには --apply を指定してください。");
    }

    Ok(())
}

fn build_options(args: &RenameArgs, config: &AppConfig) -> Result<BatchOptions> {
    let Some(subdir) = args.subdir.as_ref() else {
        anyhow::bail!("対象フォルダを指定してください");
    };
    let base_dir = match args.base_dir.as_ref() {
        Some(base) => base.clone(),
        None => resolve_base_dir(config)?,
    };

    Ok(BatchOptions {
        directory: base_dir.join(subdir),
        mode: args.mode.map(Into::into).unwrap_or(config.mode),
        jobs: args.jobs.or(config.jobs),
        apply: ApplyOptions {
            apply: !args.dry_run && (args.apply || config.apply),
            skip_duplicates: args.skip_dupes || config.skip_duplicates,
        },
        ignored_names: config.ignored_names.clone(),
    })
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn print_table(summary: &BatchSummary) {
    println!("元ファイル -> 新ファイル (action)");
    for outcome in &summary.outcomes {
        if outcome.action == RenameAction::Unchanged {
            continue;
        }
        println!(
            "{} -> {} ({:?})",
            outcome.source.display(),
            outcome.final_path.display(),
            outcome.action
        );
    }
    for failure in &summary.failures {
        println!("{} -> 失敗 ({:?})", failure.path.display(), failure.kind);
    }

    println!(
        "\n集計: scanned={} renamed={} duplicates={} skipped={} unchanged={} failed={} elapsed={:?}",
        summary.stats.scanned,
        summary.stats.renamed,
        summary.stats.duplicates_renamed,
        summary.stats.skipped_duplicates,
        summary.stats.unchanged,
        summary.stats.failed,
        summary.elapsed
    );
}

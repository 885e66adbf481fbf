use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use survey_cohort::config::CONFIG_FILE;
use survey_cohort::{SurveyConfig, SurveyContext, SurveyError};
use survey_data::{Attribute, RespondentDraft};

mod render;
mod repl;

use render::{render_evaluation, render_overview};

#[derive(Debug, Parser)]
#[command(
    name = "survey",
    version,
    about = "Find the group of welcome survey respondents most similar to you",
    long_about = "survey assigns a respondent of the welcome survey to one of the\n\
        clusters of a pre-trained model and describes the cohort of past\n\
        respondents sharing that cluster.\n\n\
        EXAMPLES:\n\
        \n  survey                                         Fill in the form interactively\n\
        \n  survey classify --age 18-24 --edu-level Wyższe --fav-animals Koty \\\n\
        \n      --fav-place 'Nad wodą' --gender Kobieta     One-shot classification\n\
        \n  survey clusters                                Every group with its size\n\
        \n  survey check                                   Verify model, data and profiles"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./survey.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory that relative data paths resolve against
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify one respondent given on the command line
    Classify(ClassifyArgs),
    /// Fill in the survey form interactively
    Repl,
    /// List every cluster with its cohort size and share
    Clusters {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load all resources and verify every cluster has a profile
    Check,
}

#[derive(Debug, Args)]
struct ClassifyArgs {
    #[arg(long, value_name = "BRACKET")]
    age: Option<String>,

    #[arg(long = "edu-level", value_name = "LEVEL")]
    edu_level: Option<String>,

    #[arg(long = "fav-animals", value_name = "ANIMALS")]
    fav_animals: Option<String>,

    #[arg(long = "fav-place", value_name = "PLACE")]
    fav_place: Option<String>,

    #[arg(long, value_name = "GENDER")]
    gender: Option<String>,

    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,
}

impl ClassifyArgs {
    fn answers(&self) -> [(Attribute, Option<&str>); 5] {
        [
            (Attribute::Age, self.age.as_deref()),
            (Attribute::EduLevel, self.edu_level.as_deref()),
            (Attribute::FavAnimals, self.fav_animals.as_deref()),
            (Attribute::FavPlace, self.fav_place.as_deref()),
            (Attribute::Gender, self.gender.as_deref()),
        ]
    }

    fn draft(&self) -> Result<RespondentDraft, String> {
        let mut draft = RespondentDraft::new();
        for (attr, value) in self.answers() {
            if let Some(v) = value {
                draft.set(attr, v).map_err(|e| e.to_string())?;
            }
        }
        Ok(draft)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<SurveyConfig, SurveyError> {
    let config = match &cli.config {
        Some(path) => SurveyConfig::load(path)?,
        None if Path::new(CONFIG_FILE).is_file() => SurveyConfig::load(CONFIG_FILE)?,
        None => SurveyConfig::default(),
    };
    Ok(match &cli.data_dir {
        Some(dir) => config.with_base_dir(dir),
        None => config,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize output: {e}");
            2
        }
    }
}

fn run_classify(ctx: &SurveyContext, args: &ClassifyArgs) -> i32 {
    let draft = match args.draft() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let evaluation = match ctx.evaluate(&draft) {
        Ok(ev) => ev,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    if args.json {
        return print_json(&evaluation);
    }
    for line in render_evaluation(&evaluation) {
        println!("{line}");
    }
    0
}

fn run_clusters(ctx: &SurveyContext, json: bool) -> i32 {
    let overview = match ctx.cluster_overview() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    if json {
        return print_json(&overview);
    }
    for line in render_overview(&overview) {
        println!("{line}");
    }
    0
}

fn run_check(ctx: &SurveyContext) -> i32 {
    let model = match ctx.get_model() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let loaded = ctx
        .get_population()
        .and_then(|p| ctx.get_cluster_profiles().map(|pr| (p.len(), pr.len())));
    let (rows, profiles) = match loaded {
        Ok(counts) => counts,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    println!(
        "model '{}' ({} backend, version {}): {} clusters",
        model.name(),
        model.backend_name(),
        model.metadata().version,
        model.clusters().len()
    );
    if let Some(description) = &model.metadata().description {
        println!("  {description}");
    }
    println!("reference population: {rows} respondents");
    println!("cluster profiles: {profiles}");
    match ctx.check_profiles_cover_model() {
        Ok(()) => {
            println!("ok: every cluster has a profile");
            0
        }
        Err(e @ SurveyError::UnknownCluster(_)) => {
            eprintln!("check failed: {e}");
            1
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    log::debug!("configuration: {config:?}");
    let ctx = SurveyContext::new(config);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Classify(args) => run_classify(&ctx, &args),
        Command::Repl => repl::run_repl(&ctx),
        Command::Clusters { json } => run_clusters(&ctx, json),
        Command::Check => run_check(&ctx),
    }
}

fn main() {
    std::process::exit(run_cli());
}

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use dslr_cli::logreg::predict::inference;
use dslr_cli::logreg::predict::input::LogRegPredictConfig;
use dslr_cli::logreg::train::input::LogRegTrainConfig;
use dslr_cli::logreg::train::trainer;

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .help("Path to a JSON configuration file. Command line flags override its values.")
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DSLR_LOG", "error,dslr=info"))
        .init();

    let matches = Command::new("dslr")
        .version(clap::crate_version!())
        .about("One-vs-all logistic regression: train house classifiers and predict houses")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train one logistic regression model per house")
                .arg(
                    Arg::new("train_data")
                        .help("Path to the labelled training dataset (*.csv)")
                        .required_unless_present("config")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output_dir")
                        .help(
                            "Directory that classifiers.txt and normalization_params.txt are \
                             written to. Overrides the directory in the configuration file.",
                        )
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("epochs")
                        .short('e')
                        .long("epochs")
                        .help("Number of passes over the training data")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("learning_rate")
                        .short('l')
                        .long("learning-rate")
                        .help("Gradient descent step size")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("shuffle")
                        .long("shuffle")
                        .help("Visit training examples in a seeded random order every epoch")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for --shuffle")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .help("Train the per-house models in parallel")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Predict a house for every row of a dataset using trained models")
                .arg(
                    Arg::new("inference_data")
                        .help("Path to the dataset to predict (*.csv)")
                        .required_unless_present("config")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("classifiers_file")
                        .long("classifiers")
                        .help("Path to the classifier file written by `dslr train`")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("normalization_file")
                        .long("normalization")
                        .help("Path to the normalization file written by `dslr train`")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output_file")
                        .help("Path to the prediction output file (*.csv)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    if let Some(path) = config_path {
        log::info!("[dslr::train] Using config: {:?}", path);
    }

    let params = LogRegTrainConfig::from_arguments(config_path, matches)?;
    log::info!("[dslr::train] Training from: {}", params.train_data);

    match trainer::run_training(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    if let Some(path) = config_path {
        log::info!("[dslr::predict] Using config: {:?}", path);
    }

    let params = LogRegPredictConfig::from_arguments(config_path, matches)?;
    log::info!("[dslr::predict] Predicting: {}", params.inference_data);

    match inference::run_inference(&params) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Inference failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

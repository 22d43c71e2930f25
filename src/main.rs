use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use cobalt_nn::{pixel, ModelError, Network, NetworkSpec, TrainConfig, Trainer, TrainingSet};

#[derive(Parser, Debug)]
#[command(
    name = "cobalt-nn",
    about = "Train and evaluate feed-forward perceptron networks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a network on a text dataset and save the result
    Train(TrainArgs),
    /// Evaluate a persisted network on inline values or an image
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// JSON architecture spec; overrides the topology flags
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Persisted network to continue training instead of a fresh one
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Number of input nodes (with --outputs, when no spec is given)
    #[arg(long)]
    inputs: Option<usize>,

    /// Hidden layer sizes, comma separated; may be empty
    #[arg(long, value_delimiter = ',')]
    hidden: Vec<usize>,

    /// Number of output nodes
    #[arg(long)]
    outputs: Option<usize>,

    /// Lower bound of the weight randomization range
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    weight_min: f64,

    /// Upper bound of the weight randomization range
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    weight_max: f64,

    /// Training data: one case per line, input then target columns
    #[arg(long)]
    data: PathBuf,

    /// Initial learning rate (lambda)
    #[arg(long, default_value_t = 1.0)]
    lambda: f64,

    /// Adaptive constant; 1 disables adaptation
    #[arg(long, default_value_t = 2.0)]
    adapt: f64,

    #[arg(long, default_value_t = 100_000)]
    max_steps: usize,

    #[arg(long, default_value_t = 0.001)]
    min_error: f64,

    #[arg(long, default_value_t = 0.0)]
    min_lambda: f64,

    /// Log progress every N steps; 0 disables
    #[arg(long, default_value_t = 1000)]
    report_period: usize,

    /// Save the network every N steps; 0 disables
    #[arg(long, default_value_t = 0)]
    checkpoint_period: usize,

    #[arg(long)]
    checkpoint_dir: Option<PathBuf>,

    /// Where to write the trained network
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Persisted network to evaluate
    #[arg(long)]
    network: PathBuf,

    /// Input values, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<f64>>,

    /// Grayscale image whose pixels form the input vector
    #[arg(long)]
    image: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Train(args) => run_train(args),
        Command::Eval(args) => run_eval(args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

fn run_train(args: TrainArgs) -> Result<(), ModelError> {
    let network = if let Some(path) = &args.resume {
        Network::load(path)?
    } else if let Some(path) = &args.spec {
        NetworkSpec::load_json(path)?.build()
    } else {
        let (inputs, outputs) = match (args.inputs, args.outputs) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                error!("either --spec, --resume, or both --inputs and --outputs are required");
                process::exit(2);
            }
        };
        Network::new(inputs, &args.hidden, outputs, args.weight_min, args.weight_max)
    };

    let cases = TrainingSet::from_text(&args.data, network.input_count(), network.output_count())?;
    let mut trainer = Trainer::new(network, cases)?;
    info!("initial error: {:.9}", trainer.error());

    let mut config = TrainConfig::new(
        args.lambda,
        args.adapt,
        args.max_steps,
        args.min_error,
        args.min_lambda,
    );
    config.report_period = args.report_period;
    config.checkpoint_period = args.checkpoint_period;
    config.checkpoint_dir = args.checkpoint_dir;
    if let Some(dir) = &config.checkpoint_dir {
        std::fs::create_dir_all(dir)?;
    }

    let report = trainer.train(&config);

    println!("terminated after {} steps", report.steps);
    for reason in &report.reasons {
        println!("  {reason}");
    }
    println!("final error: {:.9}", report.final_error);
    println!("final lambda: {:.9}", report.final_lambda);

    trainer.network().save(&args.out)?;
    Ok(())
}

fn run_eval(args: EvalArgs) -> Result<(), ModelError> {
    let mut network = Network::load(&args.network)?;

    let input = if let Some(values) = args.values {
        values
    } else if let Some(path) = &args.image {
        let (pixels, shape) = pixel::grayscale_pixels(path)?;
        info!(
            "read {}x{} image ({} pixels)",
            shape.width,
            shape.height,
            pixels.len()
        );
        pixels
    } else {
        error!("either --values or --image is required");
        process::exit(2);
    };

    if input.len() != network.input_count() {
        return Err(ModelError::DimensionMismatch {
            context: "evaluation input".to_string(),
            expected: network.input_count(),
            got: input.len(),
        });
    }

    for (i, value) in network.evaluate(&input).iter().enumerate() {
        println!("output {i}: {value:.15}");
    }
    Ok(())
}

use anyhow::{Context, bail};
use log::info;
use rs_lm_core::{LanguageModel, ModelConfig};

/// Seed used by the `fixed` mode when none is given.
const DEFAULT_SEED: u64 = 20;

const USAGE: &str = "usage: rs-lm-exemple <window_length> <initial_text> <text_length> <fixed|random> <corpus_path> [seed]";

/// Command-line parameters.
#[derive(Debug, PartialEq)]
struct Args {
    config: ModelConfig,
    initial_text: String,
    text_length: usize,
    corpus_path: String,
}

impl Args {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        if args.len() != 5 && args.len() != 6 {
            bail!("{USAGE}");
        }

        let window_length: usize = args[0]
            .parse()
            .with_context(|| format!("window_length must be a positive integer, got {:?}", args[0]))?;
        let text_length: usize = args[2]
            .parse()
            .with_context(|| format!("text_length must be a non-negative integer, got {:?}", args[2]))?;

        let mut config = ModelConfig::new(window_length)?;
        match args[3].as_str() {
            "random" => {
                if args.len() == 6 {
                    bail!("a seed can only be given in fixed mode");
                }
            }
            "fixed" => {
                let seed = match args.get(5) {
                    Some(s) => s.parse().with_context(|| format!("seed must be an integer, got {s:?}"))?,
                    None => DEFAULT_SEED,
                };
                config = config.with_seed(seed);
            }
            other => bail!("mode must be 'fixed' or 'random', got {other:?}"),
        }

        Ok(Self {
            config,
            initial_text: args[1].clone(),
            text_length,
            corpus_path: args[4].clone(),
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(&args)?;

    // Train on the whole corpus, then sample
    let mut model = LanguageModel::from_config(&args.config);
    model
        .train_file(&args.corpus_path)
        .with_context(|| format!("failed to train on {}", args.corpus_path))?;
    info!("{} windows learned from {}", model.window_count(), args.corpus_path);

    println!("{}", model.generate(&args.initial_text, args.text_length));
    Ok(())
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

use system_f::{
    run_checker,
    samples::{self, Expected, Sample},
    NameSupply,
};

#[derive(Parser)]
#[command(name = "system-f", about = "Type check sample System F terms")]
struct Cli {
    /// Samples to check; all of them when omitted.
    #[arg(short, long = "sample", value_name = "NAME")]
    samples: Vec<String>,

    /// List the available samples and exit.
    #[arg(long)]
    list: bool,

    /// Print the derivation tree of each checked term.
    #[arg(long)]
    trace: bool,

    /// Tracing filter, e.g. `debug` or `system_f=trace`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let catalogue = samples::catalogue(&mut NameSupply::new());

    if cli.list {
        for sample in &catalogue {
            println!("{:<26} {}", sample.name, sample.description);
        }
        return;
    }

    let selected: Vec<&Sample> = if cli.samples.is_empty() {
        catalogue.iter().collect()
    } else {
        let mut selected = Vec::new();
        for name in &cli.samples {
            match catalogue.iter().find(|sample| sample.name == name.as_str()) {
                Some(sample) => selected.push(sample),
                None => {
                    eprintln!("Unknown sample: {}", name);
                    std::process::exit(2);
                }
            }
        }
        selected
    };

    let mut unexpected = 0;
    for sample in selected {
        if !run_sample(sample, cli.trace) {
            unexpected += 1;
        }
    }

    if unexpected > 0 {
        eprintln!("{} sample(s) did not match their expected outcome", unexpected);
        std::process::exit(1);
    }
}

fn run_sample(sample: &Sample, trace: bool) -> bool {
    println!("[{}] {}", sample.name, sample.description);
    println!("  term: {}", sample.expr);

    let outcome = run_checker(&sample.expr);
    match &outcome {
        Ok((ty, tree)) => {
            println!("  type: {}", ty);
            if trace {
                println!();
                println!("{}", tree);
            }
        }
        Err(e) => println!("  error: {}", e),
    }

    let outcome = outcome.map(|(ty, _)| ty);
    let matched = sample.matches(&outcome);
    if !matched {
        match &sample.expected {
            Expected::Type(ty) => eprintln!("  expected type {}", ty),
            Expected::Error(kind) => eprintln!("  expected error {:?}", kind),
        }
    }
    println!();
    matched
}

use clap::{Parser, ValueEnum};

/// Compare point estimates of a Bernoulli probability across parameterizations.
#[derive(Parser, Debug)]
#[command(name = "logodds", version, about = "Reparameterization and Jacobian adjustment for Bernoulli trials")]
pub struct Cli {
    #[arg(
        long,
        short,
        default_value = "logodds",
        value_name = "OUT",
        help = "Output directory for the reports"
    )]
    pub out: String,

    #[arg(long, short, default_value = "10", help = "Number of Bernoulli trials to simulate")]
    pub n: usize,

    #[arg(long, default_value = "0.3", help = "True success probability used to simulate trials")]
    pub theta: f64,

    #[arg(long, default_value = "123", help = "Seed for the random number generator")]
    pub seed: u64,

    #[arg(
        long,
        default_value = "10000",
        help = "Number of posterior draws per model"
    )]
    pub iterations: usize,

    #[arg(long, default_value = "1.0", help = "Beta prior pseudo-count for successes")]
    pub prior_a: f64,

    #[arg(long, default_value = "1.0", help = "Beta prior pseudo-count for failures")]
    pub prior_b: f64,

    #[arg(long, help = "Also write the full report as JSON")]
    pub json: bool,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Normal,
    Silent,
}

impl LogLevel {
    pub fn filter(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "debug",
            LogLevel::Normal => "info",
            LogLevel::Silent => "off",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Verbose => write!(f, "verbose"),
            LogLevel::Normal => write!(f, "normal"),
            LogLevel::Silent => write!(f, "silent"),
        }
    }
}

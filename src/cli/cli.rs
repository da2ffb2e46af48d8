use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Path to a scenario CSV file")]
    scenarios: Option<String>,

    #[arg(long, help = "Read a JSON evaluation request from stdin", default_value_t = false)]
    stdin_request: bool,

    #[arg(short, long, default_value_t = 0.50)]
    risk_threshold: f64,

    #[arg(short = 'n', long, default_value_t = 20_000)]
    samples: usize,

    #[arg(long, default_value_t = 42, help = "Base seed, combined with each truck id")]
    seed: u64,

    #[arg(short, long, default_value_t = true)]
    parallel: bool,

    #[arg(short, long, help = "Write results JSON here instead of stdout")]
    output: Option<String>,

    #[arg(long, help = "Directory for a CSV export of the decisions")]
    export_dir: Option<String>,

    #[arg(long, help = "Emit per-truck sustainability impacts instead of raw results", default_value_t = false)]
    sustainability: bool,

    #[arg(long, default_value_t = 20.0)]
    cargo_tons: f64,

    #[arg(long, default_value_t = 190.0, help = "Shadow carbon price in $/metric ton CO2")]
    carbon_price: f64,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(short, long, help = "Print per-scenario summaries to the console", default_value_t = false)]
    verbose: bool,
}

impl Args {
    pub fn scenarios(&self) -> Option<&str> {
        self.scenarios.as_deref()
    }

    pub fn stdin_request(&self) -> bool {
        self.stdin_request
    }

    pub fn risk_threshold(&self) -> f64 {
        self.risk_threshold
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn export_dir(&self) -> Option<&str> {
        self.export_dir.as_deref()
    }

    pub fn sustainability(&self) -> bool {
        self.sustainability
    }

    pub fn cargo_tons(&self) -> f64 {
        self.cargo_tons
    }

    pub fn carbon_price(&self) -> f64 {
        self.carbon_price
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

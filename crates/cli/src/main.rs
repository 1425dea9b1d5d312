use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid_toolkit::{
    constants::{FORMAT_ENV_VAR, NAMESPACE_ENV_VAR},
    emit, namespace, validate, Batch, CaseFold, Destination, ExpectedVersion, GenerationRequest,
    OutputFormat, Scheme, ToolkitConfig, UuidError, UuidGenerator, UuidResult,
};

const EXIT_VALIDATION_FAILED: u8 = 1;
const EXIT_USER_ERROR: u8 = 2;
const EXIT_INTERNAL_ERROR: u8 = 3;
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "uuid-toolkit", version)]
#[command(about = "Simple UUID generator & validator (v1, v3, v4, v5)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate UUID v1 (time-based)
    V1(GenerateArgs),
    /// Generate UUID v3 (MD5 namespace+name)
    V3(NameBasedArgs),
    /// Generate UUID v4 (random)
    V4(GenerateArgs),
    /// Generate UUID v5 (SHA-1 namespace+name)
    V5(NameBasedArgs),
    /// Validate a UUID string
    Validate {
        /// UUID string to validate
        uuid: String,
        /// Expected version (1, 3, 4 or 5)
        #[arg(short = 'v', long = "version", value_parser = ExpectedVersion::from_str)]
        version: Option<ExpectedVersion>,
        /// Exit 0 if valid, non-zero otherwise (no output)
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Number of UUIDs
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    count: i64,
    /// Output format [default: plain, or $UUID_TOOLKIT_FORMAT]
    #[arg(short = 'f', long, value_parser = OutputFormat::from_str)]
    format: Option<OutputFormat>,
    /// Write output to file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Uppercase output
    #[arg(long)]
    upper: bool,
    /// Lowercase output
    #[arg(long)]
    lower: bool,
}

#[derive(Args)]
struct NameBasedArgs {
    /// Namespace (DNS|URL|OID|X500 or UUID) followed by the name; with a single value it is
    /// the name and the namespace defaults to DNS
    #[arg(value_name = "NAMESPACE|NAME")]
    first: String,
    /// Name string
    #[arg(value_name = "NAME")]
    second: Option<String>,
    #[command(flatten)]
    generate: GenerateArgs,
}

impl NameBasedArgs {
    /// Splits the positionals into `(namespace token, name)`.
    fn namespace_and_name<'a>(&'a self, default_namespace: &'a str) -> (&'a str, &'a str) {
        match &self.second {
            Some(name) => (&self.first, name),
            None => (default_namespace, &self.first),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Internal error: {}", e);
        return ExitCode::from(EXIT_INTERNAL_ERROR);
    }

    let interrupted = install_interrupt_handler();

    match run(cli, interrupted) {
        Ok(code) => code,
        Err(e) => {
            let (code, message) = failure(&e);
            tracing::debug!("command failed: {:?}", e);
            eprintln!("{}", message);
            ExitCode::from(code)
        }
    }
}

/// Maps an error to its exit code and the message printed on stderr.
fn failure(e: &UuidError) -> (u8, String) {
    match e {
        UuidError::Interrupted => (EXIT_INTERRUPTED, "\nAborted.".to_string()),
        e if e.is_user_error() => (EXIT_USER_ERROR, format!("Error: {}", e)),
        e => (EXIT_INTERNAL_ERROR, format!("Internal error: {}", e)),
    }
}

/// Logs go to stderr so that stdout carries only results.
fn init_tracing() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uuid_toolkit=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

fn install_interrupt_handler() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();

    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!("failed to install Ctrl-C handler: {}", e);
    }

    flag
}

fn run(cli: Cli, interrupted: Arc<AtomicBool>) -> UuidResult<ExitCode> {
    // Output defaults only matter when generating, so `validate` never reads them.
    let config = || {
        ToolkitConfig::from_env_values(
            std::env::var(FORMAT_ENV_VAR).ok(),
            std::env::var(NAMESPACE_ENV_VAR).ok(),
        )
    };

    match cli.command {
        Some(Commands::V1(args)) => generate(Scheme::V1, &args, None, &config()?, interrupted),
        Some(Commands::V4(args)) => generate(Scheme::V4, &args, None, &config()?, interrupted),
        Some(Commands::V3(args)) => generate_name_based(Scheme::V3, &args, &config()?, interrupted),
        Some(Commands::V5(args)) => generate_name_based(Scheme::V5, &args, &config()?, interrupted),
        Some(Commands::Validate {
            uuid,
            version,
            quiet,
        }) => Ok(run_validate(&uuid, version, quiet)),
        None => {
            let args = GenerateArgs {
                count: 1,
                format: None,
                output: None,
                upper: false,
                lower: false,
            };
            generate(Scheme::V4, &args, None, &config()?, interrupted)
        }
    }
}

fn run_validate(uuid: &str, version: Option<ExpectedVersion>, quiet: bool) -> ExitCode {
    let result = validate(uuid, version);
    if !quiet {
        println!("{}", result.message());
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_VALIDATION_FAILED)
    }
}

fn generate_name_based(
    scheme: Scheme,
    args: &NameBasedArgs,
    config: &ToolkitConfig,
    interrupted: Arc<AtomicBool>,
) -> UuidResult<ExitCode> {
    let (token, name) = args.namespace_and_name(config.default_namespace());
    let namespace = namespace::resolve(Some(token))?;

    generate(
        scheme,
        &args.generate,
        Some((namespace, name.to_string())),
        config,
        interrupted,
    )
}

fn generate(
    scheme: Scheme,
    args: &GenerateArgs,
    name_input: Option<(uuid_toolkit::Uuid, String)>,
    config: &ToolkitConfig,
    interrupted: Arc<AtomicBool>,
) -> UuidResult<ExitCode> {
    let (namespace, name) = name_input.unzip();
    let request = GenerationRequest::new(scheme, args.count, namespace, name)?;

    let format = args.format.unwrap_or(config.default_format());
    let case = CaseFold::from_flags(args.upper, args.lower);
    let destination = Destination::from(args.output.clone());

    let mut generator = UuidGenerator::new();
    let batch = Batch::new(&mut generator, &request).with_interrupt(interrupted);

    emit(&destination, batch, format, case)?;
    Ok(ExitCode::SUCCESS)
}

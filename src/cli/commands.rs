use crate::registrar::plan_routes;
use crate::resolver::MapControllerBy;
use crate::router::{join_paths, normalize_prefix};
use crate::runtime_config::RouterConfig;
use crate::spec::{base_path, load_spec};
use crate::validator::{check_spec, print_issues};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface for oasrouter
#[derive(Parser, Debug)]
#[command(name = "oasrouter", version)]
#[command(about = "Resolve OpenAPI operations to controller functions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved route table
    Routes {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Router prefix prepended to every path
        #[arg(long)]
        prefix: Option<String>,

        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report every operation that cannot be resolved
    Check {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

/// Controller mapping as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MapByArg {
    Tag,
    Path,
}

impl From<MapByArg> for MapControllerBy {
    fn from(arg: MapByArg) -> Self {
        match arg {
            MapByArg::Tag => MapControllerBy::Tag,
            MapByArg::Path => MapControllerBy::Path,
        }
    }
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Path to the OpenAPI/Swagger document (YAML or JSON)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Router config file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Derive controllers from the first tag or the first path segment
    #[arg(long, value_enum)]
    pub map_by: Option<MapByArg>,

    /// Fail on operations without tags instead of using the index controller
    #[arg(long, default_value_t = false)]
    pub no_index_fallback: bool,

    /// Fail on operations without operationId instead of deriving a name from the path
    #[arg(long, default_value_t = false)]
    pub no_path_fallback: bool,

    /// Prepend the document's basePath / first server path
    #[arg(long, default_value_t = false)]
    pub use_base_path: bool,
}

impl PolicyArgs {
    /// Defaults, then the config file, then `OASR_*` variables, then flags.
    pub fn router_config(&self) -> Result<RouterConfig> {
        let mut config = match &self.config {
            Some(path) => RouterConfig::from_file(path)?,
            None => RouterConfig::default(),
        };
        config.apply_env();

        if let Some(by) = self.map_by {
            config.policy.map_controller_by = by.into();
        }
        if self.no_index_fallback {
            config.policy.fallback_controller_to_index = false;
        }
        if self.no_path_fallback {
            config.policy.fallback_controller_function_to_path = false;
        }
        Ok(config)
    }
}

/// Run a parsed command line. Returns the process exit code.
pub fn run_cli(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Routes {
            policy,
            prefix,
            json,
        } => {
            let mut config = policy.router_config()?;
            if let Some(prefix) = prefix {
                config.prefix = prefix;
            }
            let spec = load_spec(&policy.spec)?;

            let mut base = normalize_prefix(&config.prefix);
            if policy.use_base_path {
                let spec_base = base_path(&spec);
                if !spec_base.is_empty() {
                    base = join_paths(&base, &spec_base);
                }
            }

            let mut plans = plan_routes(&spec, &config.policy).with_context(|| {
                format!("Cannot resolve routes of {}", policy.spec.display())
            })?;
            for plan in &mut plans {
                plan.path = join_paths(&base, &plan.path);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&plans)?);
            } else {
                for plan in &plans {
                    println!(
                        "{:<7} {} -> {}.{}",
                        plan.method.as_str(),
                        plan.path,
                        plan.controller,
                        plan.function
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { policy } => {
            let config = policy.router_config()?;
            let spec = load_spec(&policy.spec)?;
            let issues = check_spec(&spec, &config.policy);
            if issues.is_empty() {
                println!("✅ {} is fully routable", policy.spec.display());
                Ok(ExitCode::SUCCESS)
            } else {
                print_issues(&issues);
                Ok(ExitCode::from(1))
            }
        }
    }
}

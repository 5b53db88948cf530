use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use engine::{DEFAULT_TOP_CATEGORIES, TransactionDraft, TransactionKind};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tally.toml";
const ENV_PREFIX: &str = "TALLY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub top_categories: usize,
    pub currency_symbol: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: 10,
            top_categories: DEFAULT_TOP_CATEGORIES,
            currency_symbol: "$".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Income and expense tracker")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Override how many categories the summary ranks.
    #[arg(long, global = true)]
    pub top: Option<usize>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Print views as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Totals, balance and top categories.
    Summary,
    /// Income and expenses bucketed by month, newest first.
    Months,
    /// Per-category totals and shares for one kind.
    Categories {
        #[arg(long = "type", value_enum, default_value_t = KindArg::Expense)]
        kind: KindArg,
    },
    /// Per-day income and expense sums.
    Daily {
        /// Include every month instead of only the current one.
        #[arg(long)]
        all: bool,
    },
    /// List the categories accepted for each kind.
    CategoriesList,
    /// Record a new transaction.
    Add(AddArgs),
    /// Change an existing transaction; omitted fields keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Remove a transaction.
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct AddArgs {
    #[arg(long = "type", value_enum)]
    pub kind: KindArg,
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub category: String,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl From<AddArgs> for TransactionDraft {
    fn from(args: AddArgs) -> Self {
        Self {
            kind: Some(args.kind.into()),
            amount: args.amount,
            description: args.description,
            category: args.category,
            date: args.date,
        }
    }
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct EditArgs {
    #[arg(long = "type", value_enum)]
    pub kind: Option<KindArg>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl EditArgs {
    /// Overwrites the prefilled draft with whatever was passed.
    pub fn apply(self, draft: &mut TransactionDraft) {
        if let Some(kind) = self.kind {
            draft.kind = Some(kind.into());
        }
        if let Some(amount) = self.amount {
            draft.amount = amount;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(date) = self.date {
            draft.date = Some(date);
        }
    }
}

/// What the binary runs with: merged settings plus the chosen command.
#[derive(Debug)]
pub struct Invocation {
    pub config: AppConfig,
    pub command: Command,
    pub json: bool,
}

pub fn load() -> Result<Invocation> {
    load_from(Args::parse())
}

/// File, then `TALLY_*` environment, then command-line flags.
pub fn load_from(args: Args) -> Result<Invocation> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(top) = args.top {
        settings.top_categories = top;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(Invocation {
        config: settings,
        command: args.command,
        json: args.json,
    })
}

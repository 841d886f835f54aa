use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use aac_core::collections::PARTNERS_DOCUMENT;
use aac_core::VERSION;

/// AAC - encrypted personalisation data for communication partners, places and passports
#[derive(Parser)]
#[command(name = "aac")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the encrypted documents
    #[arg(short, long, global = true, env = "AAC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Fail instead of using the development secret when JSON_ENCRYPTION_KEY is unset
    #[arg(long, global = true)]
    pub require_secret: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); AAC_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the records in a collection
    List(ListArgs),

    /// Append a record to a collection
    Add(AddArgs),

    /// Replace a whole collection with a JSON array
    Replace(ReplaceArgs),

    /// Remove a record from a collection by id
    Remove(RemoveArgs),

    /// Print a stored document as JSON (null if never written)
    Show(ShowArgs),

    /// List the documents present in the data directory
    Documents,

    /// Print the partners and answers used for passport generation
    PassportData,

    /// Save the answer to one passport questionnaire question
    Answer(AnswerArgs),

    /// Check that every stored document decrypts and parses
    Doctor,

    /// Extract JSON from a model response (file or stdin)
    Extract(ExtractArgs),
}

/// Entity collections the CLI can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionKind {
    People,
    Partners,
    Places,
    Topics,
    Passports,
    Conversations,
}

impl CollectionKind {
    /// Document backing this collection.
    pub fn document(self) -> &'static str {
        use aac_core::collections::{Conversation, Passport, Person, Place, Record, Topic};

        match self {
            CollectionKind::People => Person::COLLECTION,
            CollectionKind::Partners => PARTNERS_DOCUMENT,
            CollectionKind::Places => Place::COLLECTION,
            CollectionKind::Topics => Topic::COLLECTION,
            CollectionKind::Passports => Passport::COLLECTION,
            CollectionKind::Conversations => Conversation::COLLECTION,
        }
    }
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    #[arg(value_enum, value_name = "COLLECTION")]
    pub collection: CollectionKind,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    #[arg(value_enum, value_name = "COLLECTION")]
    pub collection: CollectionKind,

    /// Record as a JSON object, or "-" to read it from stdin.
    /// A missing or empty "id" is filled with a new UUID.
    #[arg(value_name = "JSON")]
    pub record: String,
}

/// Arguments for the `replace` command
#[derive(Args)]
pub struct ReplaceArgs {
    #[arg(value_enum, value_name = "COLLECTION")]
    pub collection: CollectionKind,

    /// File containing a JSON array of records, or "-" for stdin
    #[arg(value_name = "FILE")]
    pub input: String,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    #[arg(value_enum, value_name = "COLLECTION")]
    pub collection: CollectionKind,

    /// Record id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Document name (e.g. people.json)
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the `answer` command
#[derive(Args)]
pub struct AnswerArgs {
    /// Question number
    #[arg(value_name = "QUESTION")]
    pub question: u32,

    /// Answer text
    #[arg(value_name = "ANSWER")]
    pub answer: String,
}

/// Arguments for the `extract` command
#[derive(Args)]
pub struct ExtractArgs {
    /// File holding the model response (stdin if omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<String>,
}

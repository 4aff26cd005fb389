use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cz", about = concat!("[_] cloze v", env!("CARGO_PKG_VERSION"), " - gap-fill questions as plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different bank directory
    #[arg(short = 'C', long = "bank-dir", global = true)]
    pub bank_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new question bank in the current directory
    Init(InitArgs),
    /// List questions in the bank
    List,
    /// Show a question in full
    Show(ShowArgs),
    /// Create a new question
    New(NewArgs),
    /// Insert or remove blanks
    #[command(subcommand)]
    Blank(BlankCmd),
    /// Set a blank's answer and/or explanation
    Answer(AnswerArgs),
    /// Run a synchronization pass over a question
    Sync(SyncArgs),
    /// Validate questions
    Check(CheckArgs),
    /// Search questions by regex
    Search(SearchArgs),
    /// Print a masked preview of a question's passage
    Preview(PreviewArgs),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Bank name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if cloze/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Question id (file stem)
    pub question: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Question to check (default: the whole bank)
    pub question: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive regex (falls back to literal on bad syntax)
    pub pattern: String,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Question id
    pub question: String,
    /// Show blank ids instead of masks
    #[arg(long)]
    pub ids: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NewArgs {
    /// Question id (becomes the file stem)
    pub question: String,
    /// Question title
    pub title: String,
    /// Question kind: reading or listening
    #[arg(long, default_value = "reading")]
    pub kind: String,
    /// Media reference (listening questions)
    #[arg(long)]
    pub media: Option<String>,
}

#[derive(Subcommand)]
pub enum BlankCmd {
    /// Insert a fresh blank into the passage
    Add(BlankAddArgs),
    /// Remove a blank and its answer record
    Rm(BlankRmArgs),
}

#[derive(Args)]
pub struct BlankAddArgs {
    /// Question id
    pub question: String,
    /// Byte offset in the passage (default: append at the end)
    #[arg(long)]
    pub at: Option<usize>,
}

#[derive(Args)]
pub struct BlankRmArgs {
    /// Question id
    pub question: String,
    /// Blank id (6 hex digits)
    pub blank: String,
}

#[derive(Args)]
pub struct AnswerArgs {
    /// Question id
    pub question: String,
    /// Blank id (6 hex digits)
    pub blank: String,
    /// Answer text
    #[arg(long)]
    pub text: Option<String>,
    /// Explanation text
    #[arg(long)]
    pub explain: Option<String>,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Question id
    pub question: String,
}

use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::bank_io::{
    self, BankError, create_question, discover_bank, load_bank, save_question,
};
use crate::model::bank::Bank;
use crate::model::blank::BlankId;
use crate::model::question::{Question, QuestionKind};
use crate::ops::{blank_ops, check, search, sync};
use crate::parse::{Segment, segment_passage};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let bank_dir = cli.bank_dir.as_deref();

    match cli.command {
        None => {
            // No subcommand → TUI, handled in main.rs
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before bank discovery
            Commands::Init(args) => cmd_init(args, bank_dir),

            // Read commands
            Commands::List => cmd_list(bank_dir, json),
            Commands::Show(args) => cmd_show(args, bank_dir, json),
            Commands::Check(args) => cmd_check(args, bank_dir, json),
            Commands::Search(args) => cmd_search(args, bank_dir),
            Commands::Preview(args) => cmd_preview(args, bank_dir),

            // Write commands
            Commands::New(args) => cmd_new(args, bank_dir),
            Commands::Blank(BlankCmd::Add(args)) => cmd_blank_add(args, bank_dir, json),
            Commands::Blank(BlankCmd::Rm(args)) => cmd_blank_rm(args, bank_dir),
            Commands::Answer(args) => cmd_answer(args, bank_dir),
            Commands::Sync(args) => cmd_sync(args, bank_dir, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start_dir(bank_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match bank_dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?),
        None => Ok(std::env::current_dir()?),
    }
}

fn open_bank(bank_dir: Option<&str>) -> Result<Bank, Box<dyn std::error::Error>> {
    let start = start_dir(bank_dir)?;
    let root = discover_bank(&start)?;
    Ok(load_bank(&root)?)
}

fn parse_blank_arg(s: &str) -> Result<BlankId, String> {
    BlankId::parse(s)
        .ok_or_else(|| format!("invalid blank id `{}` (expected 6 lowercase hex digits)", s))
}

fn today_str() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

pub fn cmd_init(args: InitArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = start_dir(bank_dir)?;
    let name = match args.name {
        Some(name) => name,
        None => root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("bank")
            .to_string(),
    };
    let data_dir = bank_io::init_bank(&root, &name, args.force)?;
    println!("initialized bank '{}' in {}", name, data_dir.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(bank_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bank = open_bank(bank_dir)?;
    let summaries: Vec<QuestionSummaryJson> = bank
        .questions
        .iter()
        .map(|(id, q)| QuestionSummaryJson::from_question(id, q))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            print_question_summary(summary);
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, bank_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bank = open_bank(bank_dir)?;
    let question = bank
        .question(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    if json {
        let payload = QuestionJson::from_question(&args.question, question);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_question(&args.question, question);
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, bank_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bank = open_bank(bank_dir)?;

    let result = match args.question {
        Some(ref id) => {
            let question = bank
                .question(id)
                .ok_or_else(|| BankError::QuestionNotFound(id.clone()))?;
            check::check_question(id, question, &bank.config)
        }
        None => check::check_bank(&bank),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_check_result(&result);
    }

    if !result.valid {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let bank = open_bank(bank_dir)?;
    let re = search::compile_pattern(&args.pattern)?;
    for hit in search::search_bank(&bank, &re) {
        print_search_hit(&hit);
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let bank = open_bank(bank_dir)?;
    let question = bank
        .question(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    let mut out = String::new();
    for segment in segment_passage(&question.passage) {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Blank(id) => {
                if args.ids {
                    out.push_str(&format!("[{}]", id));
                } else {
                    out.push_str("[______]");
                }
            }
        }
    }
    println!("{}", out);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_new(args: NewArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = QuestionKind::from_str(&args.kind)
        .ok_or_else(|| format!("unknown kind '{}' (expected reading or listening)", args.kind))?;

    let bank = open_bank(bank_dir)?;
    let mut question = Question::new(args.title, kind);
    question.media = args.media;
    question.created = Some(today_str());

    create_question(&bank.data_dir, &args.question, &question)?;
    println!("created {}", bank.question_path(&args.question).display());
    Ok(())
}

fn cmd_blank_add(args: BlankAddArgs, bank_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut bank = open_bank(bank_dir)?;
    let data_dir = bank.data_dir.clone();
    let question = bank
        .question_mut(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    let mut rng = rand::thread_rng();
    let new_id = blank_ops::insert_blank(
        &mut question.passage,
        args.at,
        &mut question.answers,
        &mut rng,
    )?;
    save_question(&data_dir, &args.question, question)?;

    if json {
        println!("{}", serde_json::json!({ "blank": new_id }));
    } else {
        println!("added blank `{}`", new_id);
    }
    Ok(())
}

fn cmd_blank_rm(args: BlankRmArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let blank = parse_blank_arg(&args.blank)?;

    let mut bank = open_bank(bank_dir)?;
    let data_dir = bank.data_dir.clone();
    let question = bank
        .question_mut(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    if blank_ops::remove_blank(&mut question.passage, &mut question.answers, &blank) {
        save_question(&data_dir, &args.question, question)?;
        println!("removed blank `{}`", blank);
    } else {
        println!("blank `{}` not present in {} (nothing to do)", blank, args.question);
    }
    Ok(())
}

fn cmd_answer(args: AnswerArgs, bank_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    if args.text.is_none() && args.explain.is_none() {
        return Err("nothing to set: pass --text and/or --explain".into());
    }
    let blank = parse_blank_arg(&args.blank)?;

    let mut bank = open_bank(bank_dir)?;
    let data_dir = bank.data_dir.clone();
    let question = bank
        .question_mut(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    // Restore the token/record invariant before editing, so a blank typed
    // directly into the file can be answered without a separate sync call.
    sync::sync_answers(&question.passage, &mut question.answers);

    if let Some(ref text) = args.text {
        blank_ops::set_answer(&mut question.answers, &blank, text)?;
    }
    if let Some(ref explain) = args.explain {
        blank_ops::set_explain(&mut question.answers, &blank, explain)?;
    }
    save_question(&data_dir, &args.question, question)?;
    println!("updated `{}`", blank);
    Ok(())
}

fn cmd_sync(args: SyncArgs, bank_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut bank = open_bank(bank_dir)?;
    let data_dir = bank.data_dir.clone();
    let question = bank
        .question_mut(&args.question)
        .ok_or_else(|| BankError::QuestionNotFound(args.question.clone()))?;

    let report = sync::sync_answers(&question.passage, &mut question.answers);
    if !report.is_clean() {
        save_question(&data_dir, &args.question, question)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("already in sync");
    } else {
        for id in &report.added {
            println!("added record for `{}`", id);
        }
        for id in &report.removed {
            println!("pruned record for `{}`", id);
        }
    }
    Ok(())
}

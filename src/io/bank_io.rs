use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::bank::Bank;
use crate::model::config::BankConfig;
use crate::model::question::Question;
use crate::parse::{parse_question, serialize_question};

/// Name of the data directory a bank lives in.
pub const DATA_DIR: &str = "cloze";

/// Error type for bank I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("not a cloze bank: no cloze/bank.toml found")]
    NotABank,
    #[error("bank already initialized (use --force to reinitialize)")]
    AlreadyInitialized,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse bank.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize bank.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("question not found: {0}")]
    QuestionNotFound(String),
    #[error("question already exists: {0}")]
    QuestionExists(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the bank by walking up from the given directory, looking for a
/// `cloze/` subdirectory containing `bank.toml`.
pub fn discover_bank(start: &Path) -> Result<PathBuf, BankError> {
    let mut current = start.to_path_buf();
    loop {
        let data_dir = current.join(DATA_DIR);
        if data_dir.is_dir() && data_dir.join("bank.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BankError::NotABank);
        }
    }
}

/// Load a complete bank from the given root directory.
///
/// Question files are loaded in filename order; a file that fails to read is
/// an error, but file *content* is parsed leniently and never rejected.
pub fn load_bank(root: &Path) -> Result<Bank, BankError> {
    let data_dir = root.join(DATA_DIR);
    if !data_dir.is_dir() {
        return Err(BankError::NotABank);
    }

    let config_path = data_dir.join("bank.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| BankError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: BankConfig = toml::from_str(&config_text)?;

    let mut questions = Vec::new();
    let questions_dir = data_dir.join("questions");
    if questions_dir.is_dir() {
        let mut paths: Vec<PathBuf> = fs::read_dir(&questions_dir)
            .map_err(|e| BankError::ReadError {
                path: questions_dir.clone(),
                source: e,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("md"))
            .collect();
        paths.sort();

        for path in paths {
            let question_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            let text = fs::read_to_string(&path).map_err(|e| BankError::ReadError {
                path: path.clone(),
                source: e,
            })?;
            questions.push((question_id, parse_question(&text)));
        }
    }

    Ok(Bank {
        root: root.to_path_buf(),
        data_dir,
        config,
        questions,
    })
}

/// Save a question file back to disk, atomically.
pub fn save_question(data_dir: &Path, question_id: &str, question: &Question) -> Result<(), BankError> {
    let path = data_dir.join("questions").join(format!("{}.md", question_id));
    let content = serialize_question(question);
    atomic_write(&path, content.as_bytes()).map_err(|e| BankError::WriteError { path, source: e })
}

/// Create a new question file; refuses to overwrite an existing one.
pub fn create_question(
    data_dir: &Path,
    question_id: &str,
    question: &Question,
) -> Result<(), BankError> {
    let path = data_dir.join("questions").join(format!("{}.md", question_id));
    if path.exists() {
        return Err(BankError::QuestionExists(question_id.to_string()));
    }
    save_question(data_dir, question_id, question)
}

/// Initialize a bank under `root`: `cloze/bank.toml` plus an empty
/// `questions/` directory.
pub fn init_bank(root: &Path, name: &str, force: bool) -> Result<PathBuf, BankError> {
    let data_dir = root.join(DATA_DIR);
    if data_dir.join("bank.toml").exists() && !force {
        return Err(BankError::AlreadyInitialized);
    }

    fs::create_dir_all(data_dir.join("questions"))?;
    let config = BankConfig::new(name.to_string());
    let text = toml::to_string_pretty(&config)?;
    atomic_write(&data_dir.join("bank.toml"), text.as_bytes()).map_err(|e| {
        BankError::WriteError {
            path: data_dir.join("bank.toml"),
            source: e,
        }
    })?;
    Ok(data_dir)
}

/// Write via a temp file in the target directory, then rename into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionKind;
    use tempfile::TempDir;

    fn create_test_bank(root: &Path) {
        let data_dir = root.join(DATA_DIR);
        fs::create_dir_all(data_dir.join("questions")).unwrap();

        fs::write(
            data_dir.join("bank.toml"),
            "[bank]\nname = \"test\"\n",
        )
        .unwrap();

        fs::write(
            data_dir.join("questions/capitals.md"),
            "\
# Capitals

- kind: reading

## Passage

The capital of France is ***a1b2c3***.

## Answers

- `a1b2c3` Paris
  - explain: France's capital
",
        )
        .unwrap();
    }

    #[test]
    fn test_discover_bank() {
        let tmp = TempDir::new().unwrap();
        create_test_bank(tmp.path());

        let root = discover_bank(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());

        // Discover from a subdirectory
        let sub = tmp.path().join("cloze/questions");
        let root = discover_bank(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_discover_bank_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_bank(tmp.path()),
            Err(BankError::NotABank)
        ));
    }

    #[test]
    fn test_load_bank() {
        let tmp = TempDir::new().unwrap();
        create_test_bank(tmp.path());

        let bank = load_bank(tmp.path()).unwrap();
        assert_eq!(bank.config.bank.name, "test");
        assert_eq!(bank.questions.len(), 1);
        assert_eq!(bank.questions[0].0, "capitals");
        let q = bank.question("capitals").unwrap();
        assert_eq!(q.answers.len(), 1);
        assert_eq!(q.answers[0].answer, "Paris");
    }

    #[test]
    fn test_save_and_reload_question() {
        let tmp = TempDir::new().unwrap();
        create_test_bank(tmp.path());
        let data_dir = tmp.path().join(DATA_DIR);

        let mut q = Question::new("Rivers".to_string(), QuestionKind::Reading);
        q.passage = "The longest river is ***5d6e7f***.".to_string();
        save_question(&data_dir, "rivers", &q).unwrap();

        let bank = load_bank(tmp.path()).unwrap();
        assert_eq!(bank.questions.len(), 2);
        assert_eq!(bank.question("rivers").unwrap().title, "Rivers");
    }

    #[test]
    fn test_create_question_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        create_test_bank(tmp.path());
        let data_dir = tmp.path().join(DATA_DIR);

        let q = Question::new("Dup".to_string(), QuestionKind::Reading);
        let err = create_question(&data_dir, "capitals", &q).unwrap_err();
        assert!(matches!(err, BankError::QuestionExists(id) if id == "capitals"));
    }

    #[test]
    fn test_init_bank() {
        let tmp = TempDir::new().unwrap();
        let data_dir = init_bank(tmp.path(), "fresh", false).unwrap();
        assert!(data_dir.join("bank.toml").exists());
        assert!(data_dir.join("questions").is_dir());

        let bank = load_bank(tmp.path()).unwrap();
        assert_eq!(bank.config.bank.name, "fresh");
        assert!(bank.questions.is_empty());

        // Second init without --force fails
        assert!(matches!(
            init_bank(tmp.path(), "again", false),
            Err(BankError::AlreadyInitialized)
        ));
        // With force it succeeds
        init_bank(tmp.path(), "again", true).unwrap();
        let bank = load_bank(tmp.path()).unwrap();
        assert_eq!(bank.config.bank.name, "again");
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.md");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}

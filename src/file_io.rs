use crate::api::{QuestionKind, QuizQuestion};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Read a text file to pre-fill the editor.
pub fn load_input_file(path: &Path) -> io::Result<String> {
    let text = fs::read_to_string(path)?;
    Ok(text.replace("\r\n", "\n"))
}

/// Write notes (and the quiz with its answer key, when present) to a new
/// timestamped Markdown file in `dir`.
pub fn export_study_sheet(
    dir: &Path,
    notes: &str,
    quiz: Option<&[QuizQuestion]>,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let now = chrono::Local::now();
    let path = unique_path(dir, &format!("study_sheet_{}", now.format("%Y%m%d_%H%M%S")));
    let mut file = File::create(&path)?;

    writeln!(file, "# Study Notes")?;
    writeln!(file)?;
    writeln!(file, "Generated: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;
    writeln!(file, "{}", notes.trim_end())?;

    if let Some(quiz) = quiz.filter(|q| !q.is_empty()) {
        writeln!(file)?;
        writeln!(file, "## Quiz")?;
        for (i, question) in quiz.iter().enumerate() {
            write_question(&mut file, i + 1, question)?;
        }
    }

    file.flush()?;
    Ok(path)
}

fn write_question(file: &mut File, number: usize, question: &QuizQuestion) -> io::Result<()> {
    writeln!(file)?;
    let tag = match question.kind {
        QuestionKind::MultipleChoice => " (multiple choice)",
        QuestionKind::TrueFalse => " (true/false)",
        QuestionKind::Other => "",
    };
    writeln!(file, "### Q{}{}", number, tag)?;
    writeln!(file)?;
    writeln!(file, "{}", question.question)?;
    if !question.options.is_empty() {
        writeln!(file)?;
        for option in &question.options {
            writeln!(file, "- {}", option)?;
        }
    }
    writeln!(file)?;
    writeln!(file, "**Answer:** {}", question.answer)?;
    Ok(())
}

fn unique_path(dir: &Path, stem: &str) -> PathBuf {
    let mut path = dir.join(format!("{}.md", stem));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{}_{}.md", stem, n));
        n += 1;
    }
    path
}

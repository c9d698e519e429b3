use crate::error::{ErrorKind, Result};
use crate::markup::convert;
use exn::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};

/// Name suffix of the files [`convert_dir`] picks up.
pub const SOURCE_SUFFIX: &str = ".text";
/// Name suffix of the files [`convert_dir`] writes.
pub const TARGET_SUFFIX: &str = ".md";

/// Outcome of a [`convert_dir`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Files written successfully.
    pub converted: u64,
    /// Source files found.
    pub total: u64,
}

impl ConvertSummary {
    pub fn failed(&self) -> u64 {
        self.total - self.converted
    }
}

/// Convert every `*.text` file directly inside `input` into a `*.md` file
/// inside `output`, creating `output` first.
///
/// Subdirectories are not descended into. A file that cannot be read or
/// written is logged and counted as failed; only a problem with either
/// directory as a whole is returned as an error.
pub fn convert_dir(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ConvertSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    fs::create_dir_all(output).or_raise(|| ErrorKind::OutputDirectory(output.to_path_buf()))?;
    let sources = list_sources(input)?;
    tracing::info!(files = sources.len(), input = %input.display(), "found files to convert");

    let mut summary = ConvertSummary { total: sources.len() as u64, ..Default::default() };
    for (source, name) in sources {
        let target = output.join(name);
        match convert_file(&source, &target) {
            Ok(()) => {
                tracing::debug!(source = %source.display(), target = %target.display(), "converted");
                summary.converted += 1;
            },
            Err(error) => tracing::error!(source = %source.display(), ?error, "error converting file"),
        }
    }
    Ok(summary)
}

/// Convert a single file.
pub fn convert_file(source: &Path, target: &Path) -> Result<()> {
    let text = fs::read_to_string(source).or_raise(|| ErrorKind::Read(source.to_path_buf()))?;
    fs::write(target, convert(&text)).or_raise(|| ErrorKind::Write(target.to_path_buf()))?;
    Ok(())
}

/// Regular files in `dir` whose name ends in `.text`, in lexical order,
/// paired with the name of the file they convert to.
fn list_sources(dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let error = || ErrorKind::InputDirectory(dir.to_path_buf());
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).or_raise(error)? {
        let entry = entry.or_raise(error)?;
        let path = entry.path();
        let target = path.file_name().and_then(|name| name.to_str()).and_then(target_name);
        if let Some(target) = target
            && path.is_file()
        {
            sources.push((path, target));
        }
    }
    sources.sort();
    Ok(sources)
}

/// `Main_Page.text` → `Main_Page.md`; `None` for anything else.
///
/// Only the trailing suffix is replaced, so `v1.2.text` becomes `v1.2.md`
/// and a bare `.text` (an empty sanitized title) becomes `.md`.
fn target_name(file_name: &str) -> Option<String> {
    file_name.strip_suffix(SOURCE_SUFFIX).map(|stem| format!("{stem}{TARGET_SUFFIX}"))
}

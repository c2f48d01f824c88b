//! Output naming and writing.
//!
//! Variant `N` of `programs/add.zasm` is written to
//! `programs/add_replaced_N.zasm`, next to its template.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ExpandError, Result};
use crate::expander::{FileState, VariantSet};

/// Path of output `index` for the template at `input`
pub fn output_path(input: &Path, index: usize) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(format!("_replaced_{index}"));
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Output paths for every variant, in order, without touching the disk
pub fn plan(set: &VariantSet, input: &Path) -> Vec<PathBuf> {
    (0..set.len()).map(|i| output_path(input, i)).collect()
}

fn write_state(state: &FileState, path: &Path) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in state.lines() {
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

/// Write every variant next to `input`, returning the written paths.
///
/// Stops at the first failure; files written before it are left in place.
pub fn write_variants(set: &VariantSet, input: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(set.len());
    for (index, state) in set.iter().enumerate() {
        let path = output_path(input, index);
        write_state(state, &path).map_err(|e| ExpandError::output_write(&path, e))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expander::Expander;
    use crate::placeholder::{scan, PlaceholderOrder};
    use crate::template::Template;

    #[test]
    fn test_output_path_keeps_directory_and_extension() {
        assert_eq!(
            output_path(Path::new("programs/add_test.zasm"), 3),
            PathBuf::from("programs/add_test_replaced_3.zasm")
        );
        assert_eq!(
            output_path(Path::new("add.zasm"), 0),
            PathBuf::from("add_replaced_0.zasm")
        );
        assert_eq!(
            output_path(Path::new("dir/bare"), 1),
            PathBuf::from("dir/bare_replaced_1")
        );
    }

    #[test]
    fn test_write_variants() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("mul.zasm");
        let template = Template::from_text("; %1=r1,r2\nmul %1, %1\r\n");
        let placeholders = scan(&template, PlaceholderOrder::FirstSeen);
        let set = Expander::default().expand(&template, &placeholders).unwrap();

        let written = write_variants(&set, &input).unwrap();
        assert_eq!(written, plan(&set, &input));
        assert_eq!(
            std::fs::read_to_string(&written[0]).unwrap(),
            "; %1=r1,r2\nmul r1, r1\r\n"
        );
        assert_eq!(
            std::fs::read_to_string(&written[1]).unwrap(),
            "; %1=r1,r2\nmul r2, r2\r\n"
        );
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing_dir").join("add.zasm");
        let set = VariantSet::from_template(&Template::from_text("nop\n"));
        let err = write_variants(&set, &input).unwrap_err();
        assert!(matches!(err, ExpandError::OutputWriteFailure { .. }));
    }
}

//! Flat text output for placements.
//!
//! One placement per line as `"{x} {y}\n"`, in the order given. No header, no count.
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scatter::runner::Placement;

/// Write placements to `writer`, one `x y` pair per line.
pub fn write_placements<W: Write>(mut writer: W, placements: &[Placement]) -> Result<()> {
    for p in placements {
        writeln!(writer, "{} {}", p.position.x, p.position.y)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write placements to `path` through a uniquely named temporary file in the same
/// directory, persisted onto `path` on success.
///
/// If writing fails the temporary file is removed and `path` is left as it was.
pub fn write_placements_file(path: impl AsRef<Path>, placements: &[Placement]) -> Result<()> {
    let path = path.as_ref();
    write_atomically(path, |out| write_placements(out, placements))?;
    debug!(
        "Wrote {} placements to {}.",
        placements.len(),
        path.display()
    );
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()?;
    }
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec;
use crate::discover;
use crate::error::{Result, RewriteError};

/// Writes `fragments` as cp866 to `<stem>_new<.ext>` beside `original`.
///
/// The text is encoded before the file is created, so an unencodable
/// character leaves nothing on disk. The write itself is not atomic.
pub fn write_fragments(original: &Path, fragments: &[String]) -> Result<PathBuf> {
    let start = Instant::now();
    let target = discover::output_path(original);

    let text = fragments.concat();
    let bytes = codec::encode(&text).ok_or_else(|| RewriteError::Unencodable {
        path: target.clone(),
    })?;

    log::info!("Saving {} bytes to {}", bytes.len(), target.display());
    let file = File::create(&target).map_err(|e| RewriteError::io(&target, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| RewriteError::io(&target, e))?;

    log::info!(
        "✓ Saved {} in {:.2}s",
        target.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(target)
}

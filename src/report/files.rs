//! Output files published by rename.
//!
//! Rows are written to `<path>.tmp` and the file is renamed onto `<path>`
//! by [`OutputFile::commit`]. Dropping an uncommitted file removes the
//! temporary, so a failed step never leaves a partial file under the final
//! name.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    tmp: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl OutputFile {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref().to_path_buf();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let file = File::create(&tmp).map_err(|err| PipelineError::io(&path, err))?;
        Ok(Self {
            path,
            tmp,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one line; a newline is appended.
    pub fn write_line(&mut self, line: &str) -> Result<(), PipelineError> {
        let writer = self.writer()?;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|err| PipelineError::io(&self.path, err))
    }

    /// Write one tab-delimited row.
    pub fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), PipelineError> {
        let line = cells
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("\t");
        self.write_line(&line)
    }

    /// Flush and rename into place.
    pub fn commit(mut self) -> Result<(), PipelineError> {
        let writer = self.writer.take().ok_or_else(|| self.closed())?;
        let file = writer
            .into_inner()
            .map_err(|err| PipelineError::io(&self.path, err.into_error()))?;
        file.sync_all()
            .map_err(|err| PipelineError::io(&self.path, err))?;
        drop(file);
        fs::rename(&self.tmp, &self.path).map_err(|err| PipelineError::io(&self.path, err))
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, PipelineError> {
        match self.writer.as_mut() {
            Some(writer) => Ok(writer),
            None => Err(PipelineError::io(
                &self.path,
                std::io::Error::other("output already closed"),
            )),
        }
    }

    fn closed(&self) -> PipelineError {
        PipelineError::io(&self.path, std::io::Error::other("output already closed"))
    }
}

impl Drop for OutputFile {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

//! The compression module drives whole buffers and whole files through the codec.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte value occurs in the input.
//! - Tree build: merge the two lightest nodes until a single prefix tree remains.
//! - Code table: the path to each leaf (left = 0, right = 1) is that symbol's code.
//! - Bit packing: a padding-length byte, every input byte replaced by its code, then zero
//!   bits up to the next byte boundary.
//!
//! Decompression reverses the packing: read the padding byte, drop that many trailing bits,
//! and match the remaining bits greedily against the code table. The table is not part of
//! the packed bytes, so the file front end stores it either in an archive header or in a
//! separate table file (see `container`).
//!
//! Everything is single threaded and works on whole in-memory buffers.
//!

pub mod compress;
pub mod container;
pub mod decompress;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;

/// Output name for `file`: the file name's extension is replaced by `suffix`
/// (`notes.txt` + `.bin` -> `notes.bin`, `notes.bin` + `_decompressed.txt` -> `notes_decompressed.txt`).
/// Refuses a name that would land on the input itself.
pub(crate) fn target_path(file: &str, suffix: &str) -> Result<PathBuf> {
    let input = Path::new(file);
    let mut name = input.with_extension("").into_os_string();
    name.push(suffix);
    let target = PathBuf::from(name);
    if target == input {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output {} would overwrite the input", target.display()),
        )
        .into());
    }
    Ok(target)
}

/// Write a whole buffer to `path`. An existing file is only replaced when `force` is set.
pub(crate) fn write_output(path: &Path, data: &[u8], force: bool) -> Result<()> {
    if !force && path.exists() {
        warn!("{} exists, use --force to overwrite it", path.display());
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )
        .into());
    }
    fs::write(path, data)?;
    info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

pub(crate) fn write_stdout(data: &[u8]) -> Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(data)?;
    out.flush()?;
    Ok(())
}

fn summarize(failures: usize, total: usize) {
    if failures > 0 {
        warn!("{} of {} files failed", failures, total);
    } else {
        info!("Processed {} files", total);
    }
}

#[cfg(test)]
mod test {
    use super::compress::{compress_files, test_files};
    use super::decompress::decompress_files;
    use super::{target_path, write_output};
    use super::container::read_table;
    use crate::tools::cli::{HufOpts, Mode, Output};
    use std::fs;
    use std::path::PathBuf;

    const TEXT: &[u8] = b"Huffman coding assigns shorter codes to more frequent bytes.\n";

    fn opts_for(files: Vec<String>, op_mode: Mode) -> HufOpts {
        HufOpts {
            files,
            op_mode,
            ..HufOpts::new()
        }
    }

    #[test]
    fn target_names_follow_the_input() {
        assert_eq!(target_path("notes.txt", ".bin").unwrap(), PathBuf::from("notes.bin"));
        assert_eq!(
            target_path("dir/notes.bin", "_decompressed.txt").unwrap(),
            PathBuf::from("dir/notes_decompressed.txt")
        );
        assert_eq!(target_path("README", ".tbl").unwrap(), PathBuf::from("README.tbl"));
    }

    #[test]
    fn target_cannot_be_the_input() {
        assert!(target_path("archive.bin", ".bin").is_err());
    }

    #[test]
    fn existing_output_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        write_output(&path, b"one", false).unwrap();
        assert!(write_output(&path, b"two", false).is_err());
        write_output(&path, b"two", true).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"two");
    }

    #[test]
    fn archive_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("notes.txt");
        fs::write(&src, TEXT).unwrap();
        let src = src.to_string_lossy().into_owned();

        assert_eq!(compress_files(&opts_for(vec![src], Mode::Zip)).unwrap(), 0);
        let bin = dir.path().join("notes.bin");
        assert!(fs::read(&bin).unwrap().starts_with(b"HUF1"));

        let bin = bin.to_string_lossy().into_owned();
        assert_eq!(decompress_files(&opts_for(vec![bin], Mode::Unzip)).unwrap(), 0);
        let out = fs::read(dir.path().join("notes_decompressed.txt")).unwrap();
        assert_eq!(out, TEXT);
    }

    #[test]
    fn raw_files_need_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("data.txt");
        fs::write(&src, TEXT).unwrap();

        let mut opts = opts_for(vec![src.to_string_lossy().into_owned()], Mode::Zip);
        opts.raw = true;
        assert_eq!(compress_files(&opts).unwrap(), 0);

        let bin = dir.path().join("data.bin").to_string_lossy().into_owned();
        let tbl = dir.path().join("data.tbl").to_string_lossy().into_owned();

        // Bare packed bytes are not an archive, so this file fails without a table.
        assert_eq!(decompress_files(&opts_for(vec![bin.clone()], Mode::Unzip)).unwrap(), 1);

        let mut opts = opts_for(vec![bin], Mode::Unzip);
        opts.table = Some(tbl);
        assert_eq!(decompress_files(&opts).unwrap(), 0);
        let out = fs::read(dir.path().join("data_decompressed.txt")).unwrap();
        assert_eq!(out, TEXT);
    }

    #[test]
    fn raw_to_stdout_still_writes_the_table() {
        let dir = tempfile::tempdir().unwrap();
        // An empty input keeps the packed bytes on stdout empty.
        let src = dir.path().join("data.txt");
        fs::write(&src, b"").unwrap();

        let mut opts = opts_for(vec![src.to_string_lossy().into_owned()], Mode::Zip);
        opts.raw = true;
        opts.output = Output::Stdout;
        assert_eq!(compress_files(&opts).unwrap(), 0);

        let tbl = fs::read(dir.path().join("data.tbl")).unwrap();
        assert!(read_table(&tbl).unwrap().is_empty());
        assert!(!dir.path().join("data.bin").exists());
    }

    #[test]
    fn test_mode_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("t.txt");
        fs::write(&src, TEXT).unwrap();
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, b"").unwrap();
        let missing = dir.path().join("missing.txt");

        let files = [src, empty, missing]
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        // Only the missing file fails.
        assert_eq!(test_files(&opts_for(files, Mode::Test)).unwrap(), 1);
        assert!(!dir.path().join("t.bin").exists());
    }

    #[test]
    fn empty_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty.dat");
        fs::write(&src, b"").unwrap();

        let src = src.to_string_lossy().into_owned();
        assert_eq!(compress_files(&opts_for(vec![src], Mode::Zip)).unwrap(), 0);
        let bin = dir.path().join("empty.bin");
        assert_eq!(fs::read(&bin).unwrap(), b"HUF1\0\0");

        let bin = bin.to_string_lossy().into_owned();
        assert_eq!(decompress_files(&opts_for(vec![bin], Mode::Unzip)).unwrap(), 0);
        assert!(fs::read(dir.path().join("empty_decompressed.txt")).unwrap().is_empty());
    }
}

use super::error::LoadError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zstd::stream::read::Decoder as ZstdDecoder;

pub(crate) type ScheduleInput = Box<dyn Read>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Compression {
    Plain,
    Zstd,
}

const ZSTD_EXTENSION: &str = "zst";

impl Compression {
    /// Chooses the decoder from the file name: `*.zst` is zstd, anything else is plain.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(ZSTD_EXTENSION) => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

/// Extension of the payload inside `path`, ignoring a trailing `.zst`
/// (`week1.xml.zst` -> `xml`). Lowercased.
pub(crate) fn payload_extension(path: &Path) -> Option<String> {
    let payload = match Compression::detect(path) {
        Compression::Plain => path.to_path_buf(),
        Compression::Zstd => path.with_extension(""),
    };
    payload
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub(crate) fn open_input(path: &Path) -> Result<ScheduleInput, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match Compression::detect(path) {
        Compression::Plain => Ok(Box::new(BufReader::new(file))),
        Compression::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as ScheduleInput)
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_detect_compression_by_extension() {
        assert_eq!(Compression::detect(Path::new("a.json")), Compression::Plain);
        assert_eq!(Compression::detect(Path::new("a.json.zst")), Compression::Zstd);
        assert_eq!(Compression::detect(Path::new("a.xml.ZST")), Compression::Zstd);
        assert_eq!(Compression::detect(Path::new("zst")), Compression::Plain);
    }

    #[test]
    fn test_payload_extension_strips_compression_suffix() {
        assert_eq!(payload_extension(Path::new("week1.xml")).as_deref(), Some("xml"));
        assert_eq!(
            payload_extension(Path::new("week1.JSON.zst")).as_deref(),
            Some("json")
        );
        assert_eq!(payload_extension(Path::new("README")), None);
        assert_eq!(payload_extension(Path::new("blob.zst")), None);
    }

    #[test]
    fn test_open_input_decodes_zstd() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json.zst");
        let compressed = zstd::encode_all(&b"{\"games\": []}"[..], 0).unwrap();
        fs::write(&path, compressed).unwrap();

        let mut text = String::new();
        open_input(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "{\"games\": []}");
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let err = match open_input(&PathBuf::from("does/not/exist.json")) {
            Err(err) => err,
            Ok(_) => panic!("opening a missing file should fail"),
        };
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use byteorder::{LittleEndian, ReadBytesExt};
use tracing::{debug, info};

use super::types::ArtifactError;

/// The magic number that identifies artifact files
pub const ARTIFACT_MAGIC: u32 = 0x314D4342; // "BCM1" in ASCII

/// Supported container format version
pub const ARTIFACT_VERSION: u32 = 1;

/// Upper bound on the input edge length accepted from the header
const MAX_EDGE: u32 = 1024;

/// Upper bound on the label count accepted from the header
const MAX_LABELS: u32 = 10_000;

/// Parsed contents of a serialized classifier artifact.
///
/// The container is little-endian: magic, version, backend tag, input edge
/// length, labels, then one f32 weight row per label with the bias as the
/// trailing element of each row.
#[derive(Debug)]
pub struct ArtifactReader {
    /// Path to the artifact file
    pub path: PathBuf,
    /// Container format version
    pub version: u32,
    /// Compute backend the artifact was exported for (e.g. "cpu", "cuda")
    pub backend: String,
    /// Square input edge length in pixels
    pub edge: u32,
    /// Class labels, in score order
    pub labels: Vec<String>,
    /// Weight rows, row-major, labels.len() * (3*edge*edge + 1) values
    pub weights: Vec<f32>,
}

impl ArtifactReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref().to_path_buf();

        if !is_artifact_file(&path) {
            return Err(ArtifactError::InvalidFormat("Invalid magic number".into()));
        }

        // Open file and parse the container
        let mut file = File::open(&path)?;

        let _magic = file.read_u32::<LittleEndian>()?;

        // Read version
        let version = file.read_u32::<LittleEndian>()?;
        if version != ARTIFACT_VERSION {
            return Err(ArtifactError::InvalidFormat(format!(
                "Unsupported artifact version: {}", version
            )));
        }

        // Read the backend tag the model was exported for
        let backend = read_string(&mut file)?;

        // Read input edge length
        let edge = file.read_u32::<LittleEndian>()?;
        if edge == 0 || edge > MAX_EDGE {
            return Err(ArtifactError::InvalidFormat(format!(
                "Implausible input edge length: {}", edge
            )));
        }

        // Read labels
        let label_count = file.read_u32::<LittleEndian>()?;
        if label_count == 0 || label_count > MAX_LABELS {
            return Err(ArtifactError::InvalidFormat(format!(
                "Implausible label count: {}", label_count
            )));
        }
        let mut labels = Vec::with_capacity(label_count as usize);
        for _ in 0..label_count {
            labels.push(read_string(&mut file)?);
        }

        debug!(
            "Reading artifact: backend={}, edge={}, {} labels",
            backend, edge, label_count
        );

        // Read the weight payload: one row per label, bias last
        let row_len = 3 * (edge as usize) * (edge as usize) + 1;
        let mut weights = vec![0f32; labels.len() * row_len];
        file.read_f32_into::<LittleEndian>(&mut weights).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ArtifactError::InvalidFormat(format!(
                    "Truncated weight payload, expected {} values: {}",
                    labels.len() * row_len, e
                ))
            } else {
                ArtifactError::Io(e)
            }
        })?;

        info!(
            "Read artifact {} ({} labels, {} weights per row)",
            path.display(), labels.len(), row_len
        );

        Ok(Self {
            path,
            version,
            backend,
            edge,
            labels,
            weights,
        })
    }
}

/// Checks whether the file at the given path starts with the artifact magic number.
pub fn is_artifact_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    match file.read_u32::<LittleEndian>() {
        Ok(magic) => magic == ARTIFACT_MAGIC,
        Err(_) => false,
    }
}

/// Read a u32-length-prefixed UTF-8 string from the file
fn read_string(file: &mut File) -> Result<String, ArtifactError> {
    let str_len = file.read_u32::<LittleEndian>()?;

    let mut buffer = vec![0u8; str_len as usize];
    file.read_exact(&mut buffer)?;

    // Convert to String
    String::from_utf8(buffer)
        .map_err(|e| ArtifactError::InvalidFormat(format!("Invalid UTF-8 in string: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use tempfile::TempDir;

    fn encode(backend: &str, edge: u32, labels: &[&str], weights: &[f32]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(ARTIFACT_MAGIC).unwrap();
        buf.write_u32::<LittleEndian>(ARTIFACT_VERSION).unwrap();
        buf.write_u32::<LittleEndian>(backend.len() as u32).unwrap();
        buf.extend_from_slice(backend.as_bytes());
        buf.write_u32::<LittleEndian>(edge).unwrap();
        buf.write_u32::<LittleEndian>(labels.len() as u32).unwrap();
        for label in labels {
            buf.write_u32::<LittleEndian>(label.len() as u32).unwrap();
            buf.extend_from_slice(label.as_bytes());
        }
        for w in weights {
            buf.write_f32::<LittleEndian>(*w).unwrap();
        }
        buf
    }

    #[test]
    fn parses_a_complete_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.bcm");
        // edge 1 -> 3 pixels + bias per row
        let weights: Vec<f32> = vec![0.1, 0.2, 0.3, 0.0, 0.4, 0.5, 0.6, 1.0];
        std::fs::write(&path, encode("cpu", 1, &["black", "grizzly"], &weights)).unwrap();

        let reader = ArtifactReader::new(&path).unwrap();
        assert_eq!(reader.backend, "cpu");
        assert_eq!(reader.edge, 1);
        assert_eq!(reader.labels, vec!["black", "grizzly"]);
        assert_eq!(reader.weights, weights);
    }

    #[test]
    fn rejects_wrong_magic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.bcm");
        std::fs::write(&path, b"GGUFxxxxxxxxxxxx").unwrap();

        assert!(!is_artifact_file(&path));
        let err = ArtifactReader::new(&path).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn rejects_truncated_weights() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.bcm");
        // Header promises 2 rows of 4 values but only 3 values follow
        let bytes = encode("cpu", 1, &["black", "grizzly"], &[0.1, 0.2, 0.3]);
        std::fs::write(&path, bytes).unwrap();

        let err = ArtifactReader::new(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidFormat(_)));
        assert!(err.to_string().contains("Truncated"));
    }

    #[test]
    fn rejects_implausible_header_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.bcm");
        std::fs::write(&path, encode("cpu", 0, &["black"], &[])).unwrap();

        let err = ArtifactReader::new(&path).unwrap_err();
        assert!(err.to_string().contains("edge"));
    }
}

use std::path::{Path, PathBuf};

/// Where converted records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// All sources merged into one file, or into chunk files next to it.
    File(PathBuf),
    /// One file per source (or per chunk of a source) inside the directory.
    Directory(PathBuf),
}

impl OutputTarget {
    /// Path of the output that receives records from `source`.
    ///
    /// `chunk_stamp` is the compact time of the chunk's first record when
    /// chunking is enabled.
    pub fn output_path(&self, source: &Path, chunk_stamp: Option<&str>) -> PathBuf {
        match (self, chunk_stamp) {
            (OutputTarget::File(path), None) => path.clone(),
            (OutputTarget::File(path), Some(stamp)) => {
                let parent = path.parent().unwrap_or_else(|| Path::new(""));
                parent.join(format!("{stamp}_{}", base_name(path)))
            }
            (OutputTarget::Directory(dir), None) => {
                dir.join(format!("_{}_.pcap", base_name(source)))
            }
            (OutputTarget::Directory(dir), Some(stamp)) => {
                dir.join(format!("{stamp}_{}_.pcap", base_name(source)))
            }
        }
    }

    /// Whether an open output is closed when the next source starts.
    pub fn per_source(&self) -> bool {
        matches!(self, OutputTarget::Directory(_))
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_is_used_verbatim() {
        let target = OutputTarget::File(PathBuf::from("out/all.pcap"));
        assert_eq!(
            target.output_path(Path::new("logs/a.txt"), None),
            PathBuf::from("out/all.pcap")
        );
        assert!(!target.per_source());
    }

    #[test]
    fn chunked_file_prefixes_the_stamp() {
        let target = OutputTarget::File(PathBuf::from("out/all.pcap"));
        assert_eq!(
            target.output_path(Path::new("logs/a.txt"), Some("20170720-152504")),
            PathBuf::from("out/20170720-152504_all.pcap")
        );
        let bare = OutputTarget::File(PathBuf::from("all.pcap"));
        assert_eq!(
            bare.output_path(Path::new("a.txt"), Some("20170720-152504")),
            PathBuf::from("20170720-152504_all.pcap")
        );
    }

    #[test]
    fn directory_names_follow_the_source() {
        let target = OutputTarget::Directory(PathBuf::from("out"));
        assert_eq!(
            target.output_path(Path::new("logs/a.txt"), None),
            PathBuf::from("out/_a.txt_.pcap")
        );
        assert_eq!(
            target.output_path(Path::new("logs/a.txt"), Some("20170720-152504")),
            PathBuf::from("out/20170720-152504_a.txt_.pcap")
        );
        assert!(target.per_source());
    }
}

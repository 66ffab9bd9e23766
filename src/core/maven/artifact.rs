use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{SourceError, SourceResult};

/// Represents a fully parsed Maven coordinate.
///
/// Supported formats:
///   `groupId:artifactId:version`
///   `groupId:artifactId:version@extension`
///   `groupId:artifactId:version:classifier`
///   `groupId:artifactId:version:classifier@extension`
///
/// Segments after the classifier are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    /// File extension. Defaults to `"jar"`.
    pub extension: String,
}

impl MavenArtifact {
    /// Parse a Maven coordinate string.
    ///
    /// # Examples
    /// ```
    /// use download_sources::core::maven::MavenArtifact;
    ///
    /// let a = MavenArtifact::parse("net.sf.jopt-simple:jopt-simple:5.0.4").unwrap();
    /// assert_eq!(a.group_id, "net.sf.jopt-simple");
    /// ```
    pub fn parse(coord: &str) -> SourceResult<Self> {
        let parts: Vec<&str> = coord.trim().split(':').collect();

        if parts.len() < 3 || parts[..3].iter().any(|p| p.is_empty()) {
            return Err(SourceError::InvalidMavenCoordinate(coord.to_string()));
        }

        // The extension suffix belongs to the last meaningful segment.
        let (version, classifier, extension) = match parts.get(3) {
            Some(tail) => {
                let (classifier, extension) = split_extension(tail);
                (parts[2], Some(classifier), extension)
            }
            None => {
                let (version, extension) = split_extension(parts[2]);
                (version, None, extension)
            }
        };

        if version.is_empty() {
            return Err(SourceError::InvalidMavenCoordinate(coord.to_string()));
        }

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: version.to_string(),
            classifier: classifier
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            extension: extension.unwrap_or("jar").to_string(),
        })
    }

    /// Construct the group path portion (`net/sf/jopt-simple`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// Build the artifact filename.
    ///
    /// `artifactId-version[-classifier].extension`
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, c, self.extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        }
    }

    /// Repository-relative path:
    /// `<group_path>/<artifact_id>/<version>/<filename>`
    pub fn path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group_path(),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }

    /// Construct the full URL for this artifact under the given repository base.
    pub fn url(&self, repo_base: &str) -> String {
        format!("{}/{}", repo_base.trim_end_matches('/'), self.path())
    }
}

fn split_extension(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once('@') {
        Some((head, ext)) if !ext.is_empty() => (head, Some(ext)),
        Some((head, _)) => (head, None),
        None => (segment, None),
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, c, self.extension
            ),
            None => write!(
                f,
                "{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, self.extension
            ),
        }
    }
}

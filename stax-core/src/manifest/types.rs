//! Stack manifest types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A single stack's `deploy.yml` manifest.
///
/// Both sections are optional mappings from a deployment target to an ordered
/// list; targets absent from a section are simply absent (no defaulting).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Stacks that must be deployed before this one, per target.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub depends: HashMap<String, Vec<String>>,

    /// Fragment files composing this stack's deployment, per target.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub deploy: HashMap<String, Vec<FragmentRef>>,
}

impl Manifest {
    /// Dependencies declared for `target`; an absent target is an empty list.
    pub fn depends_for(&self, target: &str) -> &[String] {
        self.depends.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fragments declared for `target`.
    ///
    /// Returns `None` when the target key is entirely absent, which is
    /// distinct from a present-but-empty list.
    pub fn deploy_for(&self, target: &str) -> Option<&[FragmentRef]> {
        self.deploy.get(target).map(Vec::as_slice)
    }
}

/// Reference to one fragment file, either local (`"db.yml"`) or qualified
/// with the owning stack (`"other/db.yml"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FragmentRef {
    stack: Option<String>,
    file: String,
}

impl FragmentRef {
    /// The owning stack, or `None` for a local reference.
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// File name within the owning stack's fragment directory.
    pub fn file(&self) -> &str {
        &self.file
    }
}

impl FromStr for FragmentRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [file] if !file.is_empty() => Ok(Self { stack: None, file: (*file).to_string() }),
            [stack, file] if !stack.is_empty() && !file.is_empty() => {
                Ok(Self { stack: Some((*stack).to_string()), file: (*file).to_string() })
            }
            _ => Err(format!("invalid fragment reference '{}'", s)),
        }
    }
}

impl TryFrom<String> for FragmentRef {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FragmentRef> for String {
    fn from(fragment: FragmentRef) -> Self {
        fragment.to_string()
    }
}

impl fmt::Display for FragmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stack {
            Some(stack) => write!(f, "{}/{}", stack, self.file),
            None => f.write_str(&self.file),
        }
    }
}

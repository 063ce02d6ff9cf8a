//! Card sets (expansions, editions).

use serde::{Deserialize, Serialize};

use crate::core::config::DEFAULT_SET_CODE;

/// A card set.
///
/// An empty code becomes the default set code, and an empty name falls back
/// to the code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Set {
    pub code: String,
    pub name: String,
}

impl Set {
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let mut code = code.into();
        if code.is_empty() {
            code = DEFAULT_SET_CODE.to_string();
        }
        let mut name = name.into();
        if name.is_empty() {
            name.clone_from(&code);
        }
        Self { code, name }
    }
}

impl std::fmt::Display for Set {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name == self.code {
            f.write_str(&self.code)
        } else {
            write!(f, "{} ({})", self.name, self.code)
        }
    }
}

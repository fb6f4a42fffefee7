//! Missing-symbol diagnostics

use crate::descriptor::{SupportTag, SymbolDescriptor};
use std::fmt::{self, Debug, Display, Formatter};

/// Prefix shown before extension names
const EXTENSION_PREFIX: &str = "GL_";

/// The diagnostic for an entry point that could not be resolved.
///
/// Rendering it produces a multi-line message naming the symbol followed by
/// one line per non-empty group of support tags:
///
/// ```text
/// glDebugMessageCallback not found
/// Added in OpenGL 4.3
/// Extensions: GL_KHR_debug
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingSymbol {
    descriptor: SymbolDescriptor,
}

impl MissingSymbol {
    pub fn new(descriptor: SymbolDescriptor) -> Self {
        Self { descriptor }
    }

    /// The descriptor that failed to resolve
    pub fn descriptor(&self) -> &SymbolDescriptor {
        &self.descriptor
    }
}

impl Debug for MissingSymbol {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for MissingSymbol {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut added = vec![];
        let mut removed = vec![];
        let mut extensions = vec![];

        for tag in self.descriptor.tags() {
            match tag {
                SupportTag::Added(version) => added.push(version.to_owned()),
                SupportTag::Removed(version) => removed.push(version.to_owned()),
                SupportTag::Extension(name) => {
                    extensions.push(format!("{}{}", EXTENSION_PREFIX, name))
                }
            }
        }

        write!(f, "{} not found", self.descriptor.name())?;

        if !added.is_empty() {
            write!(f, "\nAdded in OpenGL {}", added.join(", "))?;
        }

        if !removed.is_empty() {
            write!(f, "\nRemoved in OpenGL {}", removed.join(", "))?;
        }

        if !extensions.is_empty() {
            write!(f, "\nExtensions: {}", extensions.join(", "))?;
        }

        Ok(())
    }
}

/// Build the diagnostic message for a descriptor that could not be resolved.
pub fn missing_symbol_message(descriptor: &SymbolDescriptor) -> String {
    MissingSymbol::new(*descriptor).to_string()
}

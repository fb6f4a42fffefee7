//! Symbol descriptors
//!
//! A `SymbolDescriptor` names an OpenGL entry point together with the API
//! versions and extensions that provide it. The support list is only used to
//! explain a failed lookup, so it is never validated.

use std::fmt::{self, Debug, Display, Formatter};

/// An OpenGL entry point and the versions/extensions that provide it.
///
/// Each support tag takes one of three shapes:
///
/// * `"+X"`: added in OpenGL version `X`
/// * `"-X"`: removed in OpenGL version `X`
/// * anything else: the name of an extension, without its `GL_` prefix
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolDescriptor {
    name: &'static str,
    support: &'static [&'static str],
}

impl SymbolDescriptor {
    /// Create a new descriptor
    pub const fn new(name: &'static str, support: &'static [&'static str]) -> Self {
        Self { name, support }
    }

    /// The exported name of the entry point
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The raw support tags, in declaration order
    pub const fn support(&self) -> &'static [&'static str] {
        self.support
    }

    /// The parsed support tags, in declaration order
    pub fn tags(&self) -> impl Iterator<Item = SupportTag<'static>> {
        self.support.iter().map(|tag| SupportTag::parse(tag))
    }
}

impl Debug for SymbolDescriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for SymbolDescriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: [{}]", self.name, self.support.join(", "))
    }
}

/// A single parsed support tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportTag<'a> {
    /// The entry point was added in this version
    Added(&'a str),
    /// The entry point was removed in this version
    Removed(&'a str),
    /// The entry point is provided by this extension
    Extension(&'a str),
}

impl<'a> SupportTag<'a> {
    /// Classify a tag by its leading marker. Tags without a `+` or `-` marker,
    /// including the empty string, are extensions.
    pub fn parse(tag: &'a str) -> Self {
        match tag.as_bytes().first() {
            // the marker is ASCII, so index 1 is always a char boundary
            Some(b'+') => SupportTag::Added(&tag[1..]),
            Some(b'-') => SupportTag::Removed(&tag[1..]),
            _ => SupportTag::Extension(tag),
        }
    }
}

use core::fmt;

/// A `name="value"` pair on a tag token, spelled as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute value; empty for a bare attribute.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Tokens handed from the tokenizer to a [`TokenSink`](super::TokenSink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE name ...>`. Only the name is kept, lowercased.
    Doctype {
        /// Declared name, empty when missing.
        name: String,
    },

    /// `<name attr=value ...>` or `<name ... />`.
    StartTag {
        /// Lowercase tag name.
        name: String,
        /// Set when the tag ends with `/>`.
        self_closing: bool,
        /// Attributes in source order, first occurrence of each name only.
        attributes: Vec<Attribute>,
    },

    /// `</name>`. Attributes are tokenized so the tag is consumed
    /// correctly, then ignored by the tree builder.
    EndTag {
        /// Lowercase tag name.
        name: String,
        /// Attributes written on the end tag.
        attributes: Vec<Attribute>,
    },

    /// `<!--data-->`, or a malformed `<!...>` / `<?...>` when `bogus`.
    Comment {
        /// Text between the delimiters.
        data: String,
        /// Produced by error recovery rather than a real comment.
        bogus: bool,
    },

    /// One character of text.
    Character {
        /// The character.
        data: char,
    },

    /// End of input.
    EndOfFile,
}

impl Token {
    /// Doctype token with an empty name.
    #[must_use]
    pub const fn new_doctype() -> Self {
        Self::Doctype {
            name: String::new(),
        }
    }

    /// Start tag token with an empty name and no attributes.
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// End tag token with an empty name.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
            bogus: false,
        }
    }

    /// Empty comment flagged as bogus.
    #[must_use]
    pub const fn new_bogus_comment() -> Self {
        Self::Comment {
            data: String::new(),
            bogus: true,
        }
    }

    /// Create a character token with the given character.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    // The mutation helpers below are used by the state machine and ignore
    // tokens of the wrong variant.

    /// Append to the doctype name.
    pub fn append_to_doctype_name(&mut self, c: char) {
        if let Self::Doctype { name } = self {
            name.push(c);
        }
    }

    /// Append to the tag name.
    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name, .. } = self {
            name.push(c);
        }
    }

    /// Mark a start tag as self-closing. End tags stay as they are.
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// Append to comment data.
    pub fn append_to_comment(&mut self, c: char) {
        if let Self::Comment { data, .. } = self {
            data.push(c);
        }
    }

    /// Append several characters to comment data.
    pub fn append_str_to_comment(&mut self, s: &str) {
        if let Self::Comment { data, .. } = self {
            data.push_str(s);
        }
    }

    /// Start an attribute with an empty name and value.
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// Append to the name of the attribute being read.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            if let Some(attr) = attributes.last_mut() {
                attr.name.push(c);
            }
        }
    }

    /// Append to the value of the attribute being read.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            if let Some(attr) = attributes.last_mut() {
                attr.value.push(c);
            }
        }
    }

    /// Drop every attribute whose name (ASCII case-insensitively) already
    /// appeared earlier on the tag. Returns the dropped names.
    pub fn remove_duplicate_attributes(&mut self) -> Vec<String> {
        let (Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. }) = self else {
            return Vec::new();
        };
        let mut seen: Vec<String> = Vec::with_capacity(attributes.len());
        let mut dropped = Vec::new();
        attributes.retain(|attr| {
            let key = attr.name.to_ascii_lowercase();
            if seen.contains(&key) {
                dropped.push(attr.name.clone());
                false
            } else {
                seen.push(key);
                true
            }
        });
        dropped
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => write!(f, "DOCTYPE {name}"),
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data, bogus: false } => write!(f, "<!--{data}-->"),
            Self::Comment { data, bogus: true } => write!(f, "Bogus({data})"),
            Self::Character { data } => match data {
                '\n' => write!(f, "Character(\\n)"),
                '\t' => write!(f, "Character(\\t)"),
                ' ' => write!(f, "Character(SPACE)"),
                c => write!(f, "Character({c})"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

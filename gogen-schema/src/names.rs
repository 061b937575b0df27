//! Identifier variant derivation.
//!
//! Every identifier that reaches code generation is expanded once into the
//! set of casings the templates consume. Derivation is a pure function of
//! the identifier and its naming context.

/// Context used when no explicit naming context is supplied.
///
/// Its own private form must never be a Go keyword, which bounds the
/// keyword-collision recursion in [`private_name`] to a single extra level.
const DEFAULT_CONTEXT: &str = "_";

/// Canonical identifier variants for one public identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// Identifier verbatim.
    pub public: String,
    /// Leading word lower-cased, remaining words concatenated; never a Go
    /// keyword.
    pub private: String,
    /// Words lower-cased, space-joined.
    pub display: String,
    /// First character of the public form, lower-cased.
    pub short: String,
    /// Words lower-cased, underscore-joined; used for file naming.
    pub system: String,
    /// Serialized field name; defaults to the system form.
    pub field: String,
}

/// Options for name derivation.
#[derive(Debug, Clone, Default)]
pub struct NameOptions {
    /// Naming context used for keyword-collision avoidance, typically the
    /// enclosing container's name.
    pub context: Option<String>,
    /// Overrides the serialized field name.
    pub field_override: Option<String>,
}

impl Names {
    /// Derives all identifier variants for `public`.
    #[must_use]
    pub fn new(public: &str, options: NameOptions) -> Self {
        let context = options.context.as_deref().unwrap_or(DEFAULT_CONTEXT);

        let short = public
            .chars()
            .next()
            .map(|c| c.to_lowercase().to_string())
            .unwrap_or_default();

        let system = lower_joined(public, "_");

        let field = match options.field_override {
            Some(field) if !field.is_empty() => field,
            _ => system.clone(),
        };

        Self {
            public: public.to_string(),
            private: private_name(public, context),
            display: lower_joined(public, " "),
            short,
            system,
            field,
        }
    }
}

/// Splits an identifier on camel-case boundaries.
///
/// Initialisms stay together (`HTTPServer` splits into `HTTP`, `Server`)
/// and digit runs form their own words (`GL11Version` splits into `GL`,
/// `11`, `Version`).
#[must_use]
pub fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !current.is_empty() {
            let prev = chars[i - 1];
            let boundary = if c.is_uppercase() {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase()
                        && chars.get(i + 1).is_some_and(|next| next.is_lowercase()))
            } else if c.is_ascii_digit() {
                !prev.is_ascii_digit()
            } else if c.is_lowercase() {
                prev.is_ascii_digit()
            } else {
                false
            };

            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Derives the private form of `public`, prefixing the context's private
/// form when the plain derivation collides with a Go keyword.
#[must_use]
fn private_name(public: &str, context: &str) -> String {
    let mut words = split_words(public);
    let Some(first) = words.first_mut() else {
        return public.to_string();
    };
    *first = first.to_lowercase();

    let name = words.concat();
    if !is_go_keyword(&name) {
        return name;
    }

    // Bounded: the default context's own private form is never a keyword.
    format!(
        "{}{}",
        private_name(context, DEFAULT_CONTEXT),
        title_case(&name)
    )
}

/// Lower-cases every word of `identifier` and joins them with `separator`.
#[must_use]
fn lower_joined(identifier: &str, separator: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Upper-cases the first character of `word`.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns true if `word` is a Go keyword.
#[must_use]
pub fn is_go_keyword(word: &str) -> bool {
    GO_KEYWORDS.contains(&word)
}

/// The Go reserved keyword set.
pub const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

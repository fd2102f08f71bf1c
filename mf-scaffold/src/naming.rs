//! Display name to C# identifier conversion.
//!
//! Vault display names are free text ("Customer's e-mail", "1st reviewer").
//! [`clean_name`] strips every character that may not appear in a C#
//! identifier (C# lexical grammar, section 2.4.2) and prefixes the result with `_`
//! when it would not start with a letter or underscore, or would collide
//! with a keyword.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Characters outside the identifier-part categories.
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Ll}\p{Lu}\p{Lt}\p{Lo}\p{Nd}\p{Nl}\p{Mn}\p{Mc}\p{Cf}\p{Pc}\p{Lm}]")
        .expect("identifier character class is a valid regex")
});

/// Valid identifier starts.
static START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_]").expect("identifier start class is a valid regex"));

/// C# reserved keywords.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Convert an arbitrary display name into a valid C# identifier.
///
/// Pure and idempotent: `clean_name(&clean_name(x)) == clean_name(x)`.
pub fn clean_name(name: &str) -> String {
    let stripped = DISALLOWED.replace_all(name, "");

    if START.is_match(&stripped) && !is_keyword(&stripped) {
        stripped.into_owned()
    } else {
        format!("_{stripped}")
    }
}

/// Whether `name` is a reserved C# keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Whether `name` is already a legal identifier that [`clean_name`] leaves
/// untouched.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && clean_name(name) == name
}

/// Hands out identifiers that are unique within one generated type.
///
/// The first claim of a name gets it verbatim; later claims get `_2`,
/// `_3`, ... in claim order, so output only depends on declared order.
#[derive(Debug, Default, Clone)]
pub struct IdentifierScope {
    used: BTreeSet<String>,
}

impl IdentifierScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Block a name without claiming it (e.g. the enclosing type's name).
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// Claim `base`, or the first free suffixed variant of it.
    pub fn claim(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

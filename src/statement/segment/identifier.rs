use std::fmt;

/// An identifier as written in the statement, with its quote character if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub value: String,
    pub quote: Option<char>,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote: None,
        }
    }

    pub fn quoted(value: impl Into<String>, quote: char) -> Self {
        Self {
            value: value.into(),
            quote: Some(quote),
        }
    }
}

impl From<&sqlparser::ast::Ident> for Identifier {
    fn from(ident: &sqlparser::ast::Ident) -> Self {
        Self {
            value: ident.value.clone(),
            quote: ident.quote_style,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote {
            Some('[') => write!(f, "[{}]", self.value),
            Some(q) => write!(f, "{}{}{}", q, self.value, q),
            None => write!(f, "{}", self.value),
        }
    }
}

/// The qualifier in front of a table, column or shorthand, e.g. `db` in `db.t` or `t` in `t.c`.
/// Multi-part qualifiers nest outwards: `s.t.c` has owner `t` whose owner is `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSegment {
    pub identifier: Identifier,
    pub owner: Option<Box<OwnerSegment>>,
}

impl OwnerSegment {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            owner: None,
        }
    }

    /// Build an owner chain from outermost to innermost part, e.g. `[db, schema]`.
    pub fn from_parts(parts: &[Identifier]) -> Option<Self> {
        let (last, rest) = parts.split_last()?;
        Some(Self {
            identifier: last.clone(),
            owner: Self::from_parts(rest).map(Box::new),
        })
    }
}

impl fmt::Display for OwnerSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(owner) = &self.owner {
            write!(f, "{}.", owner)?;
        }
        write!(f, "{}", self.identifier)
    }
}

use super::{Formatter, ToSql};

/// A double-quoted identifier.
#[derive(Debug, Clone, Copy)]
pub(super) struct Ident<S>(pub(super) S);

/// A single-quoted string literal.
#[derive(Debug, Clone, Copy)]
pub(super) struct Literal<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        quote(f.dst, self.0.as_ref(), '"');
    }
}

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        quote(f.dst, self.0.as_ref(), '\'');
    }
}

impl<S: AsRef<str>> Ident<S> {
    /// The quoted identifier as a string literal, for catalog lookups such
    /// as `to_regclass('"users"')`.
    pub(super) fn as_literal(&self) -> Literal<String> {
        let mut quoted = String::new();
        quote(&mut quoted, self.0.as_ref(), '"');
        Literal(quoted)
    }
}

fn quote(dst: &mut String, s: &str, quote: char) {
    dst.push(quote);
    for c in s.chars() {
        if c == quote {
            dst.push(quote);
        }
        dst.push(c);
    }
    dst.push(quote);
}

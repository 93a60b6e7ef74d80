use super::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    Null,
    True,
    False,
}

impl Keyword {
    pub(crate) fn text(self) -> &'static str {
        match self {
            Keyword::Null => "null",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }

    pub(crate) fn token(self) -> Token<'static> {
        match self {
            Keyword::Null => Token::Null,
            Keyword::True => Token::Boolean(true),
            Keyword::False => Token::Boolean(false),
        }
    }
}

/// What happened after feeding one more byte into the keyword matcher?
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte matched, but the keyword is not finished yet.
    NeedMore,
    /// Byte matched *and* it was the last byte of the keyword.
    Done(Keyword),
    /// Byte did **not** match the expected byte.
    Reject,
}

/// Matches the rest of a keyword after its first byte, one byte at a time,
/// so a keyword split across chunks needs no buffering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedLiteral {
    remaining: &'static [u8],
    keyword: Keyword,
}

impl ExpectedLiteral {
    /// Start matching after the *first* byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Option<Self> {
        let (remaining, keyword): (&'static [u8], _) = match first {
            b'n' => (b"ull", Keyword::Null),
            b't' => (b"rue", Keyword::True),
            b'f' => (b"alse", Keyword::False),
            _ => return None,
        };
        Some(Self { remaining, keyword })
    }

    pub(crate) fn keyword(&self) -> Keyword {
        self.keyword
    }

    pub(crate) fn step(&mut self, byte: u8) -> Step {
        match self.remaining.split_first() {
            Some((&expected, rest)) if expected == byte => {
                self.remaining = rest;
                if rest.is_empty() {
                    Step::Done(self.keyword)
                } else {
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_keyword() {
        let mut lit = ExpectedLiteral::new(b'f').unwrap();
        for &b in b"als" {
            assert_eq!(lit.step(b), Step::NeedMore);
        }
        assert_eq!(lit.step(b'e'), Step::Done(Keyword::False));
    }

    #[test]
    fn rejects_without_losing_state() {
        let mut lit = ExpectedLiteral::new(b'n').unwrap();
        assert_eq!(lit.step(b'u'), Step::NeedMore);
        assert_eq!(lit.step(b'x'), Step::Reject);
        assert_eq!(lit.step(b'l'), Step::NeedMore);
        assert_eq!(lit.step(b'l'), Step::Done(Keyword::Null));
    }

    #[test]
    fn only_keyword_initials_start_a_match() {
        assert!(ExpectedLiteral::new(b'x').is_none());
        assert_eq!(ExpectedLiteral::new(b't').unwrap().keyword().text(), "true");
    }
}

//! DDL tokenizer implementation.

use super::{Keyword, LexError, Span, Token, TokenKind};

/// A lexer that tokenizes DDL input.
///
/// The lexer is cheap to clone; a clone resumes from the same position,
/// and [`Lexer::reset`] rewinds to the start of the buffer.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Creates a lexer that starts scanning at byte `offset`, which must
    /// lie on a token boundary. Out-of-range offsets start at end of input.
    #[must_use]
    pub fn starting_at(input: &'a str, offset: usize) -> Self {
        let pos = if input.is_char_boundary(offset) {
            offset
        } else {
            input.len()
        };
        Self {
            input,
            pos,
            start: pos,
        }
    }

    /// Returns the source text being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    /// Returns the byte offset the next token will be scanned from.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Rewinds the lexer to the start of the input.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.start = 0;
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and `--`, `#` and `/* */` comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let line_comment = self.peek() == Some('#')
                || (self.peek() == Some('-') && self.peek_next() == Some('-'));
            if line_comment {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Also swallows mysqldump's /*!40101 ... */ version comments.
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let offset = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(LexError::UnterminatedComment { offset }),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn is_identifier_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(Self::is_identifier_char) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance(); // consume opening quote
        let mut name = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    // A doubled quote stands for one quote character.
                    if self.peek() == Some(quote) {
                        name.push(quote);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => name.push(c),
                None => {
                    return Err(LexError::UnterminatedIdentifier { offset: self.start });
                }
            }
        }

        Ok(self.make_token(TokenKind::QuotedIdentifier(name)))
    }

    /// Scans a number, or an identifier that merely starts with digits
    /// (MySQL allows names such as `2fa_enabled`).
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0')
            && matches!(self.peek_next(), Some('x' | 'X' | 'b' | 'B'))
        {
            let mut ahead = self.clone();
            ahead.advance();
            ahead.advance();
            if ahead.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                *self = ahead;
                while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                    self.advance();
                }
                let text = &self.input[self.start..self.pos];
                return self.make_token(TokenKind::BinaryLiteral(text.to_string()));
            }
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let mut ahead = self.clone();
            ahead.advance();
            if ahead.peek().is_some_and(|c| c == '+' || c == '-') {
                ahead.advance();
            }
            if ahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                *self = ahead;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        if self.peek().is_some_and(Self::is_identifier_char) {
            return self.scan_identifier();
        }

        let text = &self.input[self.start..self.pos];
        self.make_token(TokenKind::Number(text.to_string()))
    }

    /// Scans a `'...'` string literal, resolving doubled quotes and
    /// backslash escapes the way MySQL does.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        value.push('\'');
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some('b') => value.push('\u{8}'),
                    Some('Z') => value.push('\u{1a}'),
                    Some(c) => value.push(c),
                    None => return Err(LexError::UnterminatedString { offset: self.start }),
                },
                Some(c) => value.push(c),
                None => return Err(LexError::UnterminatedString { offset: self.start }),
            }
        }

        Ok(self.make_token(TokenKind::String(value)))
    }

    /// Scans a hex or bit literal (`X'..'`, `b'..'`), kept verbatim.
    fn scan_binary_literal(&mut self) -> Result<Token, LexError> {
        self.advance(); // consume prefix
        self.advance(); // consume opening quote
        loop {
            match self.advance() {
                Some('\'') => break,
                Some(_) => {}
                None => return Err(LexError::UnterminatedString { offset: self.start }),
            }
        }
        let text = &self.input[self.start..self.pos];
        Ok(self.make_token(TokenKind::BinaryLiteral(text.to_string())))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated literals, identifiers or
    /// comments and for characters that cannot start a token. The lexer
    /// skips past an invalid character, so scanning can continue.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '\'' => return self.scan_string(),
            '"' | '`' => return self.scan_quoted_identifier(c),
            'x' | 'X' | 'b' | 'B' if self.peek_next() == Some('\'') => {
                return self.scan_binary_literal();
            }
            c if c.is_ascii_digit() => return Ok(self.scan_number()),
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                return Ok(self.scan_identifier());
            }
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Eq,
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '!' | '|' | '&' | '~' | '^' | ':' | '?'
            | '@' => TokenKind::Symbol(c),
            _ => {
                return Err(LexError::InvalidCharacter {
                    ch: c,
                    offset: self.start,
                });
            }
        };
        Ok(self.make_token(kind))
    }

    /// Tokenizes the entire input, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

/// Quotes `value` as a string literal that the lexer reads back unchanged:
/// backslashes are escaped and single quotes doubled.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("''"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to, but not including, end of input.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_discarded() {
        assert_eq!(
            token_kinds("CREATE -- line\n# hash line\n/* block */ TABLE /*!40101 SET x=1 */;"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("create TABLE If not EXISTS"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Keyword(Keyword::If),
                TokenKind::Keyword(Keyword::Not),
                TokenKind::Keyword(Keyword::Exists),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_type_names() {
        assert_eq!(
            token_kinds("login_name varchar $tmp 2fa_enabled"),
            vec![
                ident("login_name"),
                ident("varchar"),
                ident("$tmp"),
                ident("2fa_enabled"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers_strip_quotes() {
        assert_eq!(
            token_kinds("`user` \"club id\" `we``ird`"),
            vec![
                TokenKind::QuotedIdentifier("user".into()),
                TokenKind::QuotedIdentifier("club id".into()),
                TokenKind::QuotedIdentifier("we`ird".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_keep_their_text() {
        assert_eq!(
            token_kinds("42 1.50 2e3 0x1F"),
            vec![
                TokenKind::Number("42".into()),
                TokenKind::Number("1.50".into()),
                TokenKind::Number("2e3".into()),
                TokenKind::BinaryLiteral("0x1F".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            token_kinds(r"'test' 'it''s' 'it\'s' 'a\nb'"),
            vec![
                TokenKind::String("test".into()),
                TokenKind::String("it's".into()),
                TokenKind::String("it's".into()),
                TokenKind::String("a\nb".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quote_string_reads_back() {
        for value in ["plain", "it's", r"x\y", r"\'", "a\nb", r"c:\new\table"] {
            let quoted = quote_string(value);
            assert_eq!(
                token_kinds(&quoted),
                vec![TokenKind::String(value.into()), TokenKind::Eof],
                "{quoted}"
            );
        }
        assert_eq!(quote_string(r"x\y"), r"'x\\y'");
        assert_eq!(quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_binary_literals() {
        assert_eq!(
            token_kinds("b'0' X'FF'"),
            vec![
                TokenKind::BinaryLiteral("b'0'".into()),
                TokenKind::BinaryLiteral("X'FF'".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            token_kinds("( ) , ; . = - @"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Eq,
                TokenKind::Symbol('-'),
                TokenKind::Symbol('@'),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("CREATE `t`").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 10));
    }

    #[test]
    fn test_unterminated_string_reports_offset() {
        let err = Lexer::new("COMMENT 'oops").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedString { offset: 8 });
        assert_eq!(err.offset(), 8);
    }

    #[test]
    fn test_unterminated_identifier_reports_offset() {
        let err = Lexer::new("CREATE TABLE `user").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedIdentifier { offset: 13 });
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Lexer::new("CREATE /* never closed").tokenize().unwrap_err();
        assert_eq!(err, LexError::UnterminatedComment { offset: 7 });
    }

    #[test]
    fn test_invalid_character_can_be_skipped() {
        let mut lexer = Lexer::new("a \\ b");
        assert_eq!(lexer.next_token().unwrap().kind, ident("a"));
        assert_eq!(
            lexer.next_token(),
            Err(LexError::InvalidCharacter { ch: '\\', offset: 2 })
        );
        assert_eq!(lexer.next_token().unwrap().kind, ident("b"));
    }

    #[test]
    fn test_iterator_stops_before_eof_and_reset_restarts() {
        let mut lexer = Lexer::new("a, b");
        let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.unwrap().kind).collect();
        assert_eq!(kinds, vec![ident("a"), TokenKind::Comma, ident("b")]);
        assert!(lexer.next().is_none());

        lexer.reset();
        assert_eq!(lexer.offset(), 0);
        assert_eq!(lexer.next().unwrap().unwrap().kind, ident("a"));
    }
}

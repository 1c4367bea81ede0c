//! Statement-by-statement `CREATE TABLE` parser.

use tracing::debug;

use super::error::ParseError;
use crate::ast::{
    ColumnDef, ColumnOption, CreateDefinition, CreateTableStatement, DataTypeSpec, ForeignKeyDef,
    IndexDef, IndexKind, Literal, PrimaryKeyDef, ReferentialAction, Statement, TypeArgs,
};
use crate::error::Error;
use crate::lexer::{Keyword, LexError, Lexer, Span, Token, TokenKind};

/// DDL parser.
///
/// The parser is an iterator over the statements of a script. Each item
/// is either a parsed statement or the error that made the parser give up
/// on that statement; iteration always continues with the next one.
pub struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    previous: Token,
    /// First lex error of the current statement.
    lex_error: Option<LexError>,
    /// Set when `current` stands in for a token that failed to lex.
    current_is_placeholder: bool,
    database: Option<String>,
    statement_index: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            lexer: Lexer::new(input),
            current: Token::new(TokenKind::Eof, Span::point(0)),
            previous: Token::new(TokenKind::Eof, Span::point(0)),
            lex_error: None,
            current_is_placeholder: false,
            database: None,
            statement_index: 0,
        };
        parser.advance();
        parser
    }

    /// Sets the database under inspection. Tables qualified with another
    /// database name are skipped; tables qualified with this one are kept
    /// with the qualifier stripped.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Parses a bare column type with trailing attributes, as found in
    /// `information_schema.COLUMNS.COLUMN_TYPE` (`int(10) unsigned`,
    /// `enum('a','b')`).
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a data type optionally followed
    /// by column options.
    pub fn parse_column_type(text: &str) -> Result<(DataTypeSpec, Vec<ColumnOption>), Error> {
        let mut parser = Parser::new(text);
        let result = parser.parse_data_type().and_then(|data_type| {
            let options = parser.parse_column_options()?;
            if parser.current.is_eof() {
                Ok((data_type, options))
            } else {
                Err(parser.unexpected("end of column type"))
            }
        });
        if let Some(err) = parser.lex_error.take() {
            return Err(Error::Lex(err));
        }
        result.map_err(|err| Error::Parse(err.in_statement(0, text, 0)))
    }

    /// Parses the next statement, or returns `None` at end of input.
    pub fn next_statement(&mut self) -> Option<Result<Statement, Error>> {
        while self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if self.current.is_eof() && self.lex_error.is_none() {
            return None;
        }

        let index = self.statement_index;
        self.statement_index += 1;
        let start = self.current.span.start;
        let result = self.parse_statement();

        if let Some(err) = self.lex_error.take() {
            self.recover();
            return Some(Err(Error::Lex(err)));
        }
        match result {
            Ok(statement) => {
                if self.check(&TokenKind::Semicolon) {
                    self.advance();
                }
                Some(Ok(statement))
            }
            Err(err) => {
                let err = err.in_statement(index, self.input, start);
                self.recover();
                Some(Err(Error::Parse(err)))
            }
        }
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Advances to the next token. A token that fails to lex is recorded
    /// and replaced with an end-of-input placeholder.
    fn advance(&mut self) {
        let next = match self.lexer.next_token() {
            Ok(token) => {
                self.current_is_placeholder = false;
                token
            }
            Err(err) => {
                let offset = err.offset();
                if self.lex_error.is_none() {
                    self.lex_error = Some(err);
                }
                self.current_is_placeholder = true;
                Token::new(TokenKind::Eof, Span::point(offset))
            }
        };
        self.previous = std::mem::replace(&mut self.current, next);
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(k) if *k == keyword)
    }

    /// Checks if the current token is the given non-keyword word.
    fn check_word(&self, word: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(w) if w.eq_ignore_ascii_case(word))
    }

    /// Consumes the keyword if it is current.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Builds an error for the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        if self.current.is_eof() {
            ParseError::unexpected_eof(expected, self.current.span)
        } else {
            ParseError::unexpected(expected, self.current.kind.clone(), self.current.span)
        }
    }

    /// Expects a specific token kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("{kind:?}")))
        }
    }

    /// Expects a specific keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Returns true if the current token can be read as a name.
    fn current_is_name(&self) -> bool {
        match &self.current.kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(kw) => !kw.starts_constraint(),
            _ => false,
        }
    }

    /// Expects a name. Keywords that cannot start a constraint clause are
    /// accepted as written, so `comment` or `status` work as column names.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => name.clone(),
            TokenKind::Keyword(kw) if !kw.starts_constraint() => self.current_text().to_string(),
            _ => return Err(self.unexpected("name")),
        };
        self.advance();
        Ok(name)
    }

    /// Expects a quoted string literal.
    fn expect_string(&mut self) -> Result<String, ParseError> {
        if let TokenKind::String(text) = &self.current.kind {
            let text = text.clone();
            self.advance();
            Ok(text)
        } else {
            Err(self.unexpected("string literal"))
        }
    }

    /// Expects a name or a quoted string, as used for charsets and collations.
    fn expect_name_or_string(&mut self) -> Result<String, ParseError> {
        if matches!(self.current.kind, TokenKind::String(_)) {
            self.expect_string()
        } else {
            self.expect_name()
        }
    }

    /// Expects an unsigned integer literal.
    fn expect_number(&mut self) -> Result<u32, ParseError> {
        if let TokenKind::Number(text) = &self.current.kind {
            let span = self.current.span;
            let value = text
                .parse::<u32>()
                .map_err(|_| ParseError::new(format!("invalid number `{text}`"), span))?;
            self.advance();
            Ok(value)
        } else {
            Err(self.unexpected("number"))
        }
    }

    /// Source text of the current token.
    fn current_text(&self) -> &'a str {
        self.current.span.text(self.input)
    }

    /// Skips to the terminating `;` (not consumed) or end of input.
    fn skip_statement(&mut self) {
        while !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            self.advance();
        }
    }

    /// Skips a balanced parenthesized group and returns its span.
    fn skip_parenthesized(&mut self) -> Result<Span, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.current.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                TokenKind::Semicolon | TokenKind::Eof => return Err(self.unexpected("')'")),
                _ => {}
            }
            self.advance();
        }
        Ok(Span::new(start, self.previous.span.end))
    }

    /// Discards the rest of a failed statement, including its `;`. Lex
    /// errors past the first one are ignored.
    fn recover(&mut self) {
        loop {
            if self.check(&TokenKind::Semicolon) {
                self.advance();
                break;
            }
            if self.current.is_eof() && !self.current_is_placeholder {
                break;
            }
            self.advance();
        }
        self.lex_error = None;
    }

    /// Source text of the create-definition starting at `start`, up to the
    /// next top-level `,` or `)`.
    fn definition_text(&self, start: usize) -> &'a str {
        let mut lexer = Lexer::starting_at(self.input, start);
        let mut depth = 0usize;
        let mut end = start;
        while let Ok(token) = lexer.next_token() {
            match token.kind {
                TokenKind::Eof | TokenKind::Semicolon => break,
                TokenKind::Comma if depth == 0 => break,
                TokenKind::RightParen if depth == 0 => break,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            end = token.span.end;
        }
        Span::new(start, end).text(self.input)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.current.span.start;
        if self.eat_keyword(Keyword::Create) {
            let temporary = self.eat_keyword(Keyword::Temporary);
            if self.eat_keyword(Keyword::Table) {
                return self.parse_create_table(start, temporary);
            }
        }
        self.skip_statement();
        Ok(Statement::Other(Span::new(
            start,
            self.previous.span.end.max(start),
        )))
    }

    fn parse_create_table(&mut self, start: usize, temporary: bool) -> Result<Statement, ParseError> {
        let if_not_exists = if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let (qualifier, name) = self.parse_qualified_name()?;
        if let Some(qualifier) = qualifier {
            if !self.is_inspected_database(&qualifier) {
                debug!(table = %name, database = %qualifier, "skipping table of another database");
                self.skip_statement();
                return Ok(Statement::Other(Span::new(start, self.previous.span.end)));
            }
        }

        if self.check_keyword(Keyword::Like) || self.check_keyword(Keyword::As) {
            return Err(ParseError::new(
                format!("CREATE TABLE {name} {} is not supported", self.current_text()),
                self.current.span,
            ));
        }

        self.expect(&TokenKind::LeftParen)?;
        let definitions = self.parse_create_definitions()?;
        let end = self.previous.span.end;
        // Table options (ENGINE, CHARSET, partitioning) are not modeled.
        self.skip_statement();

        Ok(Statement::CreateTable(CreateTableStatement {
            name,
            temporary,
            if_not_exists,
            definitions,
            span: Span::new(start, end),
        }))
    }

    fn is_inspected_database(&self, qualifier: &str) -> bool {
        self.database
            .as_deref()
            .is_none_or(|db| db.eq_ignore_ascii_case(qualifier))
    }

    /// Parses `name` or `qualifier.name`.
    fn parse_qualified_name(&mut self) -> Result<(Option<String>, String), ParseError> {
        let first = self.expect_name()?;
        if self.check(&TokenKind::Dot) {
            self.advance();
            let second = self.expect_name()?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    /// Parses the definition list after the opening parenthesis, through
    /// the closing one.
    fn parse_create_definitions(&mut self) -> Result<Vec<CreateDefinition>, ParseError> {
        let mut definitions = Vec::new();
        loop {
            let start = self.current.span.start;
            match self.parse_create_definition() {
                Ok(Some(definition)) => definitions.push(definition),
                Ok(None) => {}
                Err(err) => return Err(err.with_fragment(self.definition_text(start))),
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            return match self.expect(&TokenKind::RightParen) {
                Ok(()) => Ok(definitions),
                Err(err) => Err(err.with_fragment(self.definition_text(start))),
            };
        }
    }

    /// Parses one create-definition. `CHECK` constraints yield `None`.
    fn parse_create_definition(&mut self) -> Result<Option<CreateDefinition>, ParseError> {
        let constraint_name = if self.eat_keyword(Keyword::Constraint) {
            if self.current_is_name() {
                Some(self.expect_name()?)
            } else {
                None
            }
        } else {
            None
        };

        let definition = match self.current.as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                self.skip_index_type()?;
                let columns = self.parse_index_columns()?;
                self.skip_index_options()?;
                CreateDefinition::PrimaryKey(PrimaryKeyDef { columns })
            }
            Some(kw @ (Keyword::Unique | Keyword::Fulltext | Keyword::Spatial)) => {
                let kind = match kw {
                    Keyword::Unique => IndexKind::Unique,
                    Keyword::Fulltext => IndexKind::Fulltext,
                    _ => IndexKind::Spatial,
                };
                self.advance();
                if !self.eat_keyword(Keyword::Index) {
                    self.eat_keyword(Keyword::Key);
                }
                let name = self.parse_optional_index_name()?.or(constraint_name);
                CreateDefinition::Index(self.parse_index_body(name, kind)?)
            }
            Some(Keyword::Index | Keyword::Key) if constraint_name.is_none() => {
                self.advance();
                let name = self.parse_optional_index_name()?;
                CreateDefinition::Index(self.parse_index_body(name, IndexKind::Plain)?)
            }
            Some(Keyword::Foreign) => {
                CreateDefinition::ForeignKey(self.parse_foreign_key(constraint_name)?)
            }
            Some(Keyword::Check) => {
                self.advance();
                self.skip_parenthesized()?;
                if self.check_keyword(Keyword::Not) {
                    self.advance();
                }
                if self.check_word("ENFORCED") {
                    self.advance();
                }
                return Ok(None);
            }
            _ if constraint_name.is_some() => {
                return Err(self.unexpected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK"));
            }
            _ => CreateDefinition::Column(self.parse_column_def()?),
        };
        Ok(Some(definition))
    }

    /// Parses an index name unless the column list or `USING` follows.
    fn parse_optional_index_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.check(&TokenKind::LeftParen) || self.check_keyword(Keyword::Using) {
            Ok(None)
        } else {
            self.expect_name().map(Some)
        }
    }

    fn parse_index_body(
        &mut self,
        name: Option<String>,
        kind: IndexKind,
    ) -> Result<IndexDef, ParseError> {
        self.skip_index_type()?;
        let columns = self.parse_index_columns()?;
        self.skip_index_options()?;
        Ok(IndexDef {
            name,
            kind,
            columns,
        })
    }

    /// Skips `USING BTREE|HASH`.
    fn skip_index_type(&mut self) -> Result<(), ParseError> {
        if self.eat_keyword(Keyword::Using) {
            self.expect_name()?;
        }
        Ok(())
    }

    /// Parses `(col [(len)] [ASC|DESC], ...)`. Prefix lengths and sort
    /// order are dropped.
    fn parse_index_columns(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.expect_name()?);
            if self.check(&TokenKind::LeftParen) {
                self.advance();
                self.expect_number()?;
                self.expect(&TokenKind::RightParen)?;
            }
            if !self.eat_keyword(Keyword::Asc) {
                self.eat_keyword(Keyword::Desc);
            }
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(columns)
    }

    fn skip_index_options(&mut self) -> Result<(), ParseError> {
        loop {
            if self.eat_keyword(Keyword::Using) {
                self.expect_name()?;
            } else if self.eat_keyword(Keyword::Comment) {
                self.expect_string()?;
            } else if self.check_word("KEY_BLOCK_SIZE") {
                self.advance();
                if self.check(&TokenKind::Eq) {
                    self.advance();
                }
                self.expect_number()?;
            } else if self.check_word("VISIBLE") || self.check_word("INVISIBLE") {
                self.advance();
            } else if self.check_word("WITH") {
                self.advance();
                if !self.check_word("PARSER") {
                    return Err(self.unexpected("PARSER"));
                }
                self.advance();
                self.expect_name()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_foreign_key(
        &mut self,
        constraint_name: Option<String>,
    ) -> Result<ForeignKeyDef, ParseError> {
        self.expect_keyword(Keyword::Foreign)?;
        self.expect_keyword(Keyword::Key)?;
        let index_name = self.parse_optional_index_name()?;
        let columns = self.parse_index_columns()?;

        self.expect_keyword(Keyword::References)?;
        let (_, referenced_table) = self.parse_qualified_name()?;
        let referenced_columns = self.parse_index_columns()?;

        if self.eat_keyword(Keyword::Match) {
            self.expect_name()?;
        }

        let mut on_update = None;
        let mut on_delete = None;
        while self.eat_keyword(Keyword::On) {
            if self.eat_keyword(Keyword::Update) {
                on_update = Some(self.parse_referential_action()?);
            } else if self.eat_keyword(Keyword::Delete) {
                on_delete = Some(self.parse_referential_action()?);
            } else {
                return Err(self.unexpected("UPDATE or DELETE"));
            }
        }

        Ok(ForeignKeyDef {
            name: constraint_name.or(index_name),
            columns,
            referenced_table,
            referenced_columns,
            on_update,
            on_delete,
        })
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        if self.eat_keyword(Keyword::Cascade) {
            Ok(ReferentialAction::Cascade)
        } else if self.eat_keyword(Keyword::Restrict) {
            Ok(ReferentialAction::Restrict)
        } else if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Null) {
                Ok(ReferentialAction::SetNull)
            } else {
                self.expect_keyword(Keyword::Default)?;
                Ok(ReferentialAction::SetDefault)
            }
        } else if self.eat_keyword(Keyword::No) {
            self.expect_keyword(Keyword::Action)?;
            Ok(ReferentialAction::NoAction)
        } else {
            Err(self.unexpected("referential action"))
        }
    }

    // ========================================================================
    // Columns
    // ========================================================================

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let start = self.current.span.start;
        let name = self.expect_name()?;
        let data_type = self.parse_data_type()?;
        let options = self.parse_column_options()?;
        Ok(ColumnDef {
            name,
            data_type,
            options,
            span: Span::new(start, self.previous.span.end),
        })
    }

    fn parse_data_type(&mut self) -> Result<DataTypeSpec, ParseError> {
        let mut name = match &self.current.kind {
            TokenKind::Identifier(text) => text.clone(),
            // SET and CHARACTER are keywords elsewhere.
            TokenKind::Keyword(_) => self.current_text().to_string(),
            _ => return Err(self.unexpected("data type")),
        };
        self.advance();

        let second_word = match name.to_ascii_lowercase().as_str() {
            "double" => Some("PRECISION"),
            "character" | "char" => Some("VARYING"),
            _ => None,
        };
        if let Some(word) = second_word {
            if self.check_word(word) {
                name = format!("{name} {}", self.current_text());
                self.advance();
            }
        }

        let args = if self.check(&TokenKind::LeftParen) {
            self.parse_type_args()?
        } else {
            TypeArgs::None
        };
        Ok(DataTypeSpec { name, args })
    }

    fn parse_type_args(&mut self) -> Result<TypeArgs, ParseError> {
        let start = self.current.span.start;
        self.expect(&TokenKind::LeftParen)?;
        let mut numbers = Vec::new();
        let mut strings = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                match &self.current.kind {
                    TokenKind::Number(_) => numbers.push(self.expect_number()?),
                    TokenKind::String(_) => strings.push(self.expect_string()?),
                    _ => return Err(self.unexpected("type argument")),
                }
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RightParen)?;

        match (numbers.as_slice(), strings.is_empty()) {
            ([], _) => Ok(TypeArgs::Values(strings)),
            ([length], true) => Ok(TypeArgs::Length(*length)),
            ([precision, scale], true) => Ok(TypeArgs::PrecisionScale(*precision, *scale)),
            _ => Err(ParseError::new(
                "unsupported type arguments",
                Span::new(start, self.previous.span.end),
            )),
        }
    }

    /// Parses column options up to the next `,` or `)`.
    fn parse_column_options(&mut self) -> Result<Vec<ColumnOption>, ParseError> {
        let mut options = Vec::new();
        loop {
            let option = match &self.current.kind {
                TokenKind::Comma | TokenKind::RightParen | TokenKind::Semicolon | TokenKind::Eof => {
                    break;
                }
                TokenKind::Keyword(kw) => match *kw {
                    Keyword::Not => {
                        self.advance();
                        self.expect_keyword(Keyword::Null)?;
                        ColumnOption::NotNull
                    }
                    Keyword::Null => {
                        self.advance();
                        ColumnOption::Null
                    }
                    Keyword::Unsigned => {
                        self.advance();
                        ColumnOption::Unsigned
                    }
                    Keyword::Signed => {
                        self.advance();
                        continue;
                    }
                    Keyword::Zerofill => {
                        self.advance();
                        ColumnOption::Zerofill
                    }
                    Keyword::Default => {
                        self.advance();
                        ColumnOption::Default(self.parse_literal()?)
                    }
                    Keyword::AutoIncrement => {
                        self.advance();
                        ColumnOption::AutoIncrement
                    }
                    Keyword::Comment => {
                        self.advance();
                        ColumnOption::Comment(self.expect_string()?)
                    }
                    Keyword::Collate => {
                        self.advance();
                        ColumnOption::Collate(self.expect_name_or_string()?)
                    }
                    Keyword::Character => {
                        self.advance();
                        self.expect_keyword(Keyword::Set)?;
                        ColumnOption::CharacterSet(self.expect_name_or_string()?)
                    }
                    Keyword::Charset => {
                        self.advance();
                        ColumnOption::CharacterSet(self.expect_name_or_string()?)
                    }
                    Keyword::On => {
                        self.advance();
                        self.expect_keyword(Keyword::Update)?;
                        ColumnOption::OnUpdate(self.parse_literal()?)
                    }
                    Keyword::Primary => {
                        self.advance();
                        self.expect_keyword(Keyword::Key)?;
                        ColumnOption::PrimaryKey
                    }
                    // A bare KEY in column position means PRIMARY KEY.
                    Keyword::Key => {
                        self.advance();
                        ColumnOption::PrimaryKey
                    }
                    Keyword::Unique => {
                        self.advance();
                        self.eat_keyword(Keyword::Key);
                        ColumnOption::Unique
                    }
                    Keyword::Check => {
                        self.advance();
                        self.skip_parenthesized()?;
                        continue;
                    }
                    Keyword::Generated => {
                        self.advance();
                        self.expect_keyword(Keyword::Always)?;
                        self.expect_keyword(Keyword::As)?;
                        self.parse_generated()?
                    }
                    Keyword::As => {
                        self.advance();
                        self.parse_generated()?
                    }
                    Keyword::References => {
                        return Err(ParseError::new(
                            "inline REFERENCES is not supported, use a FOREIGN KEY clause",
                            self.current.span,
                        ));
                    }
                    _ => return Err(self.unexpected("column option")),
                },
                TokenKind::Identifier(word) => {
                    let word = word.to_ascii_uppercase();
                    match word.as_str() {
                        "VISIBLE" | "INVISIBLE" | "BINARY" => {
                            self.advance();
                        }
                        "SRID" => {
                            self.advance();
                            self.expect_number()?;
                        }
                        "COLUMN_FORMAT" | "STORAGE" => {
                            self.advance();
                            self.expect_name()?;
                        }
                        _ => return Err(self.unexpected("column option")),
                    }
                    continue;
                }
                _ => return Err(self.unexpected("column option")),
            };
            options.push(option);
        }
        Ok(options)
    }

    /// Parses `(expr) [VIRTUAL | STORED]` after `AS`.
    fn parse_generated(&mut self) -> Result<ColumnOption, ParseError> {
        let span = self.skip_parenthesized()?;
        if self.check_word("VIRTUAL") || self.check_word("STORED") {
            self.advance();
        }
        Ok(ColumnOption::Generated(span.text(self.input).to_string()))
    }

    /// Parses a `DEFAULT` or `ON UPDATE` value.
    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.current.span.start;
        let literal = match &self.current.kind {
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Literal::Null
            }
            TokenKind::String(text) => {
                let text = text.clone();
                self.advance();
                Literal::String(text)
            }
            TokenKind::Number(text) => {
                let text = text.clone();
                self.advance();
                Literal::Number(text)
            }
            TokenKind::Symbol(sign @ ('-' | '+')) => {
                let negative = *sign == '-';
                self.advance();
                let TokenKind::Number(text) = &self.current.kind else {
                    return Err(self.unexpected("number"));
                };
                let text = if negative {
                    format!("-{text}")
                } else {
                    text.clone()
                };
                self.advance();
                Literal::Number(text)
            }
            TokenKind::BinaryLiteral(text) => {
                let text = text.clone();
                self.advance();
                Literal::Expression(text)
            }
            TokenKind::LeftParen => {
                let span = self.skip_parenthesized()?;
                Literal::Expression(span.text(self.input).to_string())
            }
            TokenKind::Identifier(_) | TokenKind::Keyword(_) => {
                let introducer = self.current_text().starts_with('_');
                self.advance();
                // `_utf8mb4'text'` is a string with a charset introducer.
                if introducer {
                    if let TokenKind::String(text) = &self.current.kind {
                        let text = text.clone();
                        self.advance();
                        return Ok(Literal::String(text));
                    }
                }
                if self.check(&TokenKind::LeftParen) {
                    self.skip_parenthesized()?;
                }
                let span = Span::new(start, self.previous.span.end);
                Literal::Expression(span.text(self.input).to_string())
            }
            _ => return Err(self.unexpected("literal")),
        };
        Ok(literal)
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Statement, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_statement()
    }
}

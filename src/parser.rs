//! LOOK 查询语言的语法分析器
//!
//! ## 解析流程图
//!
//! ```text
//! parse()
//!   ├─ LOOK  → parse_index_decls()   '(' indexDecl (',' indexDecl)* ')'
//!   │        → parse_conditions()    ':' CONDITION '[' condition (',' condition)* ']'
//!   │        → parse_time_range()    AT '[' timestamp '-' timestamp ']'
//!   │        → expect_end()
//!   │
//!   └─ TOTAL → parse_total()         预留的聚合形式，返回空语句
//! ```
//!
//! ## 语法
//!
//! ```text
//! indexDecl  := indexChain "'" typeName
//! indexChain := ident ('-' ident)*
//! condition  := indexChain '.' fieldName comparator value
//! value      := number | '"' ident '"'
//! timestamp  := ident ':' ident
//! ```
//!
//! 比较运算符接受哪种值由 [`Comparator::value_shape`] 决定。
//! `EQ` 和 `NEQ` 先读下一个 token 再回退：双引号表示字符串，标识符表示数字。
//!
//! 词法分析器会把 '.' 粘到以数字开头的片段上，所以 `idx-1.f` 中最后一段是 `1.`。
//! 这个结尾的 '.' 就是字段分隔符，索引链在此结束，字段名必须紧跟其后。
//!
//! ## 解析示例
//!
//! ```text
//! LOOK (a'int, logs-2018'str):
//!     CONDITION [a.f1 GT 100, logs-2018.name PF "ab"]
//!     AT [2018.01.01:00.00.00 - 2018.01.02:00.00.00]
//! ```

use std::collections::BTreeMap;
use std::str::Chars;

use tracing::{debug, trace};

use crate::ast::{Comparator, Condition, ConditionValue, Statement, ValueShape};
use crate::error::{ParseError, ParseResult};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

/// 按需从 [`Scanner`] 拉取 token，构建一个 [`Statement`]。
///
/// 每个解析器只解析一次：[`Parser::parse`] 会消耗它。
pub struct Parser<I> {
    scanner: Scanner<I>,
    /// `advance` 最近返回的 token
    last: Option<Token>,
    /// 由 `pushback` 设置：下一次 `advance` 再次返回 `last`
    pushed_back: bool,
}

/// 重建后的索引链
struct IndexChain {
    name: String,
    /// 末段自带分隔符时（如 `1.`），保存该片段的 token
    glued_dot: Option<Token>,
}

impl<'a> Parser<Chars<'a>> {
    pub fn new(input: &'a str) -> Self {
        Parser::from_scanner(Scanner::new(input))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn from_scanner(scanner: Scanner<I>) -> Self {
        Self {
            scanner,
            last: None,
            pushed_back: false,
        }
    }

    /// 有回退的 token 时返回它，否则从词法分析器读取下一个
    fn advance(&mut self) -> Token {
        if self.pushed_back {
            self.pushed_back = false;
            if let Some(token) = &self.last {
                return token.clone();
            }
        }
        let token = self.scanner.next_token();
        trace!(kind = ?token.kind, text = %token.text, "token");
        self.last = Some(token.clone());
        token
    }

    /// 回退最近读取的 token。在下一次 `advance` 之前重复调用不会叠加，
    /// 缓冲区最多只保存一个 token。
    fn pushback(&mut self) {
        self.pushed_back = self.last.is_some();
    }

    /// 与 `advance` 相同，但跳过一个空白 token。
    /// 连续空白已被词法分析器合并，跳过一次即可。
    fn advance_skip_whitespace(&mut self) -> Token {
        let token = self.advance();
        if token.is(TokenKind::Whitespace) {
            self.advance()
        } else {
            token
        }
    }

    /// 期望下一个非空白 token 为 `kind`，否则返回错误
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        let token = self.advance_skip_whitespace();
        if token.is(kind) {
            Ok(token)
        } else {
            Err(ParseError::unexpected(&token, kind.describe()))
        }
    }

    /// 将整个输入解析为一条语句
    pub fn parse(mut self) -> ParseResult<Statement> {
        let result = self.parse_statement();
        match &result {
            Ok(stmt) => debug!(
                bindings = stmt.bindings().count(),
                conditions = stmt.conditions.len(),
                "parsed statement"
            ),
            Err(err) => debug!(error = %err, "parse failed"),
        }
        result
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.advance_skip_whitespace();
        match token.kind {
            TokenKind::Look => {}
            TokenKind::Total => return Ok(self.parse_total()),
            _ => return Err(ParseError::unexpected(&token, "LOOK or TOTAL")),
        }

        let bindings = self.parse_index_decls()?;
        let conditions = self.parse_conditions()?;
        let (time_begin, time_end) = self.parse_time_range()?;
        self.expect_end()?;

        Ok(Statement {
            index_type_bindings: vec![bindings],
            conditions,
            time_begin,
            time_end,
        })
    }

    /// `TOTAL` 预留给尚未实现的聚合形式。
    /// 返回空语句，其后的输入不再读取。
    fn parse_total(&mut self) -> Statement {
        debug!("TOTAL statement is not implemented, returning empty statement");
        Statement::default()
    }

    /// `'(' indexChain "'" typeName (',' ...)* ')'`
    fn parse_index_decls(&mut self) -> ParseResult<BTreeMap<String, String>> {
        self.expect(TokenKind::LParen)?;

        let mut bindings = BTreeMap::new();
        loop {
            let chain = self.parse_index_chain()?;
            // 声明中的索引名不能带分隔符
            if let Some(segment) = &chain.glued_dot {
                return Err(ParseError::unexpected(segment, "identifier"));
            }
            self.expect(TokenKind::Quote)?;
            let type_name = self.expect(TokenKind::Ident)?;
            bindings.insert(chain.name, type_name.text);

            let token = self.advance_skip_whitespace();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => break,
                _ => return Err(ParseError::unexpected(&token, "',' or ')'")),
            }
        }

        Ok(bindings)
    }

    /// 以连字符连接的标识符，重建为一个名称。
    /// 遇到以 '.' 结尾的片段时立即结束，不再向后读取。
    fn parse_index_chain(&mut self) -> ParseResult<IndexChain> {
        let mut name = String::new();
        let mut segment = self.expect(TokenKind::Ident)?;
        loop {
            if let Some(stem) = segment.text.strip_suffix('.') {
                if stem.ends_with('.') {
                    return Err(ParseError::unexpected(&segment, "identifier"));
                }
                name.push_str(stem);
                return Ok(IndexChain {
                    name,
                    glued_dot: Some(segment),
                });
            }
            name.push_str(&segment.text);

            let token = self.advance_skip_whitespace();
            if !token.is(TokenKind::Hyphen) {
                self.pushback();
                return Ok(IndexChain {
                    name,
                    glued_dot: None,
                });
            }
            name.push('-');
            segment = self.expect(TokenKind::Ident)?;
        }
    }

    /// `':' CONDITION '[' condition (',' condition)* ']'`
    fn parse_conditions(&mut self) -> ParseResult<Vec<BTreeMap<String, Condition>>> {
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Condition)?;
        self.expect(TokenKind::LBracket)?;

        let mut conditions = Vec::new();
        loop {
            let (index, condition) = self.parse_condition()?;
            conditions.push(BTreeMap::from([(index, condition)]));

            let token = self.advance_skip_whitespace();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RBracket => break,
                _ => return Err(ParseError::unexpected(&token, "',' or ']'")),
            }
        }

        Ok(conditions)
    }

    /// `indexChain '.' fieldName comparator value`
    fn parse_condition(&mut self) -> ParseResult<(String, Condition)> {
        let chain = self.parse_index_chain()?;
        if chain.glued_dot.is_none() {
            self.expect(TokenKind::Dot)?;
        }

        // 字段名紧跟分隔符，不跳过空白
        let field = self.advance();
        if !field.is(TokenKind::Ident) {
            return Err(ParseError::unexpected(&field, "field name"));
        }

        let comparator = self.parse_comparator()?;
        let value = match comparator.value_shape() {
            ValueShape::Number => self.parse_number()?,
            ValueShape::Text => self.parse_text()?,
            ValueShape::Either => {
                // 查看下一个 token 决定值的类型，然后回退
                let token = self.advance_skip_whitespace();
                self.pushback();
                match token.kind {
                    TokenKind::DoubleQuote => self.parse_text()?,
                    TokenKind::Ident => self.parse_number()?,
                    _ => return Err(ParseError::unexpected(&token, "quoted text or number")),
                }
            }
        };

        let condition = Condition {
            field_name: field.text,
            comparator,
            value,
        };
        Ok((chain.name, condition))
    }

    fn parse_comparator(&mut self) -> ParseResult<Comparator> {
        let token = self.advance_skip_whitespace();
        let comparator = match token.kind {
            TokenKind::Eq => Comparator::Eq,
            TokenKind::Neq => Comparator::Neq,
            TokenKind::Gt => Comparator::Gt,
            TokenKind::Gte => Comparator::Gte,
            TokenKind::Lt => Comparator::Lt,
            TokenKind::Lte => Comparator::Lte,
            TokenKind::Pf => Comparator::Pf,
            TokenKind::Sf => Comparator::Sf,
            _ => {
                return Err(ParseError::unexpected(
                    &token,
                    "comparator (EQ, NEQ, GT, GTE, LT, LTE, PF or SF)",
                ))
            }
        };
        Ok(comparator)
    }

    /// 以数字开头的裸字面量，按 `f64` 解析
    fn parse_number(&mut self) -> ParseResult<ConditionValue> {
        let token = self.advance_skip_whitespace();
        let starts_with_digit = token.text.starts_with(|c: char| c.is_ascii_digit());
        if !token.is(TokenKind::Ident) || !starts_with_digit {
            return Err(ParseError::unexpected(&token, "number"));
        }
        token
            .text
            .parse::<f64>()
            .map(ConditionValue::Number)
            .map_err(|_| ParseError::unexpected(&token, "number"))
    }

    /// `'"' ident '"'`，字面量必须紧跟左引号
    fn parse_text(&mut self) -> ParseResult<ConditionValue> {
        self.expect(TokenKind::DoubleQuote)?;
        let literal = self.advance();
        if !literal.is(TokenKind::Ident) {
            return Err(ParseError::unexpected(&literal, "text literal"));
        }
        self.expect(TokenKind::DoubleQuote)?;
        Ok(ConditionValue::Text(literal.text))
    }

    /// `AT '[' timestamp '-' timestamp ']'`
    fn parse_time_range(&mut self) -> ParseResult<(String, String)> {
        self.expect(TokenKind::At)?;
        self.expect(TokenKind::LBracket)?;
        let begin = self.parse_timestamp()?;
        self.expect(TokenKind::Hyphen)?;
        let end = self.parse_timestamp()?;
        self.expect(TokenKind::RBracket)?;
        Ok((begin, end))
    }

    /// 日期和时间两部分，以 ':' 原样拼接
    fn parse_timestamp(&mut self) -> ParseResult<String> {
        let date = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Colon)?;
        let time = self.expect(TokenKind::Ident)?;
        Ok(format!("{}:{}", date.text, time.text))
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::Eof).map(|_| ())
    }
}

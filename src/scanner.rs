//! LOOK 查询语言的词法分析器
//!
//! 从任意 `char` 迭代器逐个读取字符并对下一个词素分类。
//! 只保留一个字符的回退，这已足够该语言所需的前瞻。

use std::str::Chars;

use crate::token::{Span, Token, TokenKind};

pub struct Scanner<I> {
    chars: I,
    /// `unread` 退回的字符，优先于 `chars` 读取
    pending: Option<char>,
    /// 最近读取的字符，可被 `unread` 退回
    last: Option<char>,
    /// 下一个待读字符的字节偏移
    position: usize,
}

impl<'a> Scanner<Chars<'a>> {
    pub fn new(input: &'a str) -> Self {
        Scanner::from_chars(input.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn from_chars(chars: I) -> Self {
        Scanner {
            chars,
            pending: None,
            last: None,
            position: 0,
        }
    }

    /// 读取下一个字符，优先返回被退回的字符
    fn read(&mut self) -> Option<char> {
        let c = self.pending.take().or_else(|| self.chars.next());
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        self.last = c;
        c
    }

    /// 退回最近读取的字符，只保留一层
    fn unread(&mut self) {
        if let Some(c) = self.last.take() {
            self.position -= c.len_utf8();
            self.pending = Some(c);
        }
    }

    /// 读取 `first` 及其后所有满足 `accept` 的字符
    fn read_run(&mut self, first: char, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::from(first);
        while let Some(c) = self.read() {
            if accept(c) {
                text.push(c);
            } else {
                self.unread();
                break;
            }
        }
        text
    }

    /// 返回下一个 token，到达输入末尾后持续返回 `Eof`
    pub fn next_token(&mut self) -> Token {
        let start = self.position;

        let Some(c) = self.read() else {
            return Token::new(TokenKind::Eof, "", Span::new(start, start));
        };

        let (kind, text) = if is_whitespace(c) {
            (TokenKind::Whitespace, self.read_run(c, is_whitespace))
        } else if c.is_ascii_alphabetic() {
            let word = self.read_run(c, |c| c.is_ascii_alphanumeric() || c == '_');
            (TokenKind::keyword(&word).unwrap_or(TokenKind::Ident), word)
        } else if c.is_ascii_digit() {
            // 数字和 '.' 组成一个字面量，`2018.01.02` 保持完整
            (TokenKind::Ident, self.read_run(c, |c| c.is_ascii_digit() || c == '.'))
        } else {
            let kind = TokenKind::punctuation(c).unwrap_or(TokenKind::Illegal);
            (kind, c.to_string())
        };

        Token::new(kind, text, Span::new(start, self.position))
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

//! Tokenizer and recursive-descent parser
//!
//! The accepted language is deliberately tiny: decimal literals, the four
//! operands, and parentheses. Nothing else is ever executed.

use crate::core::expression::is_run_char;
use crate::core::{CalcError, CalcResult, Operand};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or unary minus, decided by the parser)
    Operator(Operand),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

/// Abstract Syntax Tree node
///
/// Operators of equal precedence are kept as one flat chain folded left
/// to right, so tree depth follows parenthesis and negation nesting only,
/// never the length of the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// `first op1 n1 op2 n2 ...`, all operators of one precedence level
    Chain {
        /// Leftmost operand
        first: Box<AstNode>,
        /// Operator/operand pairs in source order
        rest: Vec<(Operand, AstNode)>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a single-operator chain
    #[must_use]
    pub fn binary(left: Self, op: Operand, right: Self) -> Self {
        Self::chain(left, vec![(op, right)])
    }

    /// Creates a chain node
    #[must_use]
    pub fn chain(first: Self, rest: Vec<(Operand, Self)>) -> Self {
        Self::Chain {
            first: Box::new(first),
            rest,
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            c if is_run_char(c) => self.read_number()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            c => {
                let op = Operand::from_symbol(c).ok_or_else(|| {
                    CalcError::malformed(format!("unexpected character '{c}'"))
                })?;
                self.advance();
                Token::Operator(op)
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(is_run_char) {
            self.advance();
        }

        let literal = &self.input[start..self.pos];
        let value: f64 = literal
            .parse()
            .map_err(|_| CalcError::malformed(format!("invalid number '{literal}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= '-' unary | primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Deepest parenthesis/negation nesting accepted
    pub const MAX_DEPTH: usize = 256;

    const LOWEST_PRECEDENCE: u8 = 1;
    const HIGHEST_PRECEDENCE: u8 = 2;

    /// Creates a new parser from tokens
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        if input.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        match self.current() {
            None => Ok(ast),
            Some(Token::RightParen) => Err(CalcError::malformed("unmatched ')'")),
            Some(token) => Err(CalcError::malformed(format!(
                "unexpected {} at token {}",
                describe(token),
                self.pos
            ))),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > Self::MAX_DEPTH {
            return Err(CalcError::malformed("expression nested too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        self.parse_chain(Self::LOWEST_PRECEDENCE)
    }

    /// One precedence level: `operand (op operand)*`, collected flat
    fn parse_chain(&mut self, precedence: u8) -> CalcResult<AstNode> {
        let first = self.parse_chain_operand(precedence)?;
        let mut rest = Vec::new();

        while let Some(&Token::Operator(op)) = self.current() {
            if op.precedence() != precedence {
                break;
            }
            self.advance();
            rest.push((op, self.parse_chain_operand(precedence)?));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(AstNode::chain(first, rest))
        }
    }

    fn parse_chain_operand(&mut self, precedence: u8) -> CalcResult<AstNode> {
        if precedence < Self::HIGHEST_PRECEDENCE {
            self.parse_chain(precedence + 1)
        } else {
            self.parse_unary()
        }
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::Operator(Operand::Subtract))) {
            self.advance();
            self.enter()?;
            let inner = self.parse_unary();
            self.leave();
            return Ok(AstNode::negate(inner?));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::malformed("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => {
                self.enter()?;
                let expr = self.parse_expression();
                self.leave();
                let expr = expr?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::malformed(format!(
                        "expected ')' but found {}",
                        describe(&t)
                    ))),
                    None => Err(CalcError::malformed("unclosed parenthesis")),
                }
            }
            other => Err(CalcError::malformed(format!(
                "unexpected {}",
                describe(&other)
            ))),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {n}"),
        Token::Operator(op) => format!("operator '{op}'"),
        Token::LeftParen => "'('".to_string(),
        Token::RightParen => "')'".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn is_malformed(result: &CalcResult<AstNode>) -> bool {
        matches!(result, Err(CalcError::MalformedExpression(_)))
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal_forms() {
        assert_eq!(
            Tokenizer::new("3.25").tokenize().unwrap(),
            vec![Token::Number(3.25)]
        );
        assert_eq!(
            Tokenizer::new(".5").tokenize().unwrap(),
            vec![Token::Number(0.5)]
        );
        assert_eq!(
            Tokenizer::new("5.").tokenize().unwrap(),
            vec![Token::Number(5.0)]
        );
    }

    #[test]
    fn test_tokenize_expression() {
        let tokens = Tokenizer::new("(2+3)*4").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftParen,
                Token::Number(2.0),
                Token::Operator(Operand::Add),
                Token::Number(3.0),
                Token::RightParen,
                Token::Operator(Operand::Multiply),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_rejects_lone_point() {
        let result = Tokenizer::new("1+.").tokenize();
        assert!(matches!(result, Err(CalcError::MalformedExpression(_))));
    }

    #[test]
    fn test_tokenize_rejects_double_point() {
        let result = Tokenizer::new("1.2.3").tokenize();
        assert!(matches!(result, Err(CalcError::MalformedExpression(_))));
    }

    #[test]
    fn test_tokenize_rejects_foreign_characters() {
        assert!(Tokenizer::new("2 + 3").tokenize().is_err());
        assert!(Tokenizer::new("2^3").tokenize().is_err());
    }

    #[test]
    fn test_tokenizer_next_token_steps() {
        let mut t = Tokenizer::new("12+3");
        assert_eq!(t.next_token().unwrap(), Some(Token::Number(12.0)));
        assert_eq!(t.next_token().unwrap(), Some(Token::Operator(Operand::Add)));
        assert_eq!(t.next_token().unwrap(), Some(Token::Number(3.0)));
        assert_eq!(t.next_token().unwrap(), None);
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        let ast = Parser::parse_str("2+3*4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operand::Add,
                AstNode::binary(AstNode::number(3.0), Operand::Multiply, AstNode::number(4.0)),
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        // 8 - 3 - 2 = (8 - 3) - 2
        let ast = Parser::parse_str("8-3-2").unwrap();
        assert_eq!(
            ast,
            AstNode::chain(
                AstNode::number(8.0),
                vec![
                    (Operand::Subtract, AstNode::number(3.0)),
                    (Operand::Subtract, AstNode::number(2.0)),
                ],
            )
        );
    }

    #[test]
    fn test_parse_parentheses_override() {
        let ast = Parser::parse_str("(2+3)*4").unwrap();
        match ast {
            AstNode::Chain { first, rest } => {
                assert_eq!(rest, vec![(Operand::Multiply, AstNode::number(4.0))]);
                assert_eq!(
                    *first,
                    AstNode::binary(AstNode::number(2.0), Operand::Add, AstNode::number(3.0))
                );
            }
            _ => panic!("Expected Multiply at top level"),
        }
    }

    #[test]
    fn test_parse_leading_unary_minus() {
        assert_eq!(
            Parser::parse_str("-5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_unary_minus_inside_parens() {
        assert_eq!(
            Parser::parse_str("(-5)").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_unary_minus_after_operator() {
        let ast = Parser::parse_str("3*-2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(3.0),
                Operand::Multiply,
                AstNode::negate(AstNode::number(2.0)),
            )
        );
    }

    #[test]
    fn test_parse_empty_expression() {
        assert_eq!(Parser::parse_str(""), Err(CalcError::EmptyExpression));
        assert_eq!(Parser::new(vec![]).parse(), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_parse_trailing_operator() {
        assert!(is_malformed(&Parser::parse_str("2+")));
        assert!(is_malformed(&Parser::parse_str("7*")));
    }

    #[test]
    fn test_parse_leading_binary_operator() {
        assert!(is_malformed(&Parser::parse_str("*3")));
        assert!(is_malformed(&Parser::parse_str("+3")));
    }

    #[test]
    fn test_parse_unclosed_paren() {
        assert!(is_malformed(&Parser::parse_str("(2+3")));
    }

    #[test]
    fn test_parse_extra_close_paren() {
        let result = Parser::parse_str("2+3)");
        assert_eq!(result, Err(CalcError::malformed("unmatched ')'")));
    }

    #[test]
    fn test_parse_empty_parens() {
        assert!(is_malformed(&Parser::parse_str("()")));
    }

    #[test]
    fn test_parse_adjacent_numbers_rejected() {
        assert!(is_malformed(&Parser::parse_str("(2)(3)")));
        assert!(is_malformed(&Parser::parse_str("2(3)")));
    }

    #[test]
    fn test_parse_nesting_limit() {
        let deep = format!(
            "{}1{}",
            "(".repeat(Parser::MAX_DEPTH + 1),
            ")".repeat(Parser::MAX_DEPTH + 1)
        );
        assert_eq!(
            Parser::parse_str(&deep),
            Err(CalcError::malformed("expression nested too deeply"))
        );

        let ok = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(Parser::parse_str(&ok).unwrap(), AstNode::Number(1.0));
    }

    #[test]
    fn test_parse_negation_limit() {
        let deep = format!("{}1", "-".repeat(Parser::MAX_DEPTH + 1));
        assert!(is_malformed(&Parser::parse_str(&deep)));
    }

    #[test]
    fn test_parse_mixed_chain_groups_by_precedence() {
        let ast = Parser::parse_str("1+2*3*4-5").unwrap();
        assert_eq!(
            ast,
            AstNode::chain(
                AstNode::number(1.0),
                vec![
                    (
                        Operand::Add,
                        AstNode::chain(
                            AstNode::number(2.0),
                            vec![
                                (Operand::Multiply, AstNode::number(3.0)),
                                (Operand::Multiply, AstNode::number(4.0)),
                            ],
                        ),
                    ),
                    (Operand::Subtract, AstNode::number(5.0)),
                ],
            )
        );
    }

    #[test]
    fn test_parse_long_chain_stays_flat() {
        let input = format!("{}1", "1+".repeat(200_000));
        match Parser::parse_str(&input).unwrap() {
            AstNode::Chain { first, rest } => {
                assert_eq!(*first, AstNode::number(1.0));
                assert_eq!(rest.len(), 200_000);
                assert!(rest.iter().all(|(op, node)| *op == Operand::Add
                    && *node == AstNode::number(1.0)));
            }
            other => panic!("expected a flat chain, got {other:?}"),
        }
    }
}

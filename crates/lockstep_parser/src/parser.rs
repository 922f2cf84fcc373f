//! Recursive-descent parser.
//!
//! Builds a [`Tree`] bottom-up from a logos token stream. One token of
//! lookahead; regex literals are scanned straight from the lexer remainder
//! because `/` is ambiguous at the token level.

use std::fs;
use std::path::Path;

use logos::Logos;

use lockstep_ast::{Node, NodeData, NodeId, NodeKind, PropertyKind, SourceFile, Span, Tree};

use crate::error::ParseError;
use crate::lexer::{Token, unescape};

/// A successfully parsed input program.
#[derive(Debug)]
pub struct ParsedProgram {
    /// The syntax tree; its root is the `Program` node.
    pub tree: Tree,
    /// The source text the tree was built from.
    pub source: SourceFile,
}

/// Reads and parses the file at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedProgram, ParseError> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).map_err(|e| ParseError::io(path.display().to_string(), e))?;
    parse_str(path.display().to_string(), text)
}

/// Parses `text`, labeling positions with `path`.
pub fn parse_str(
    path: impl Into<std::path::PathBuf>,
    text: impl Into<String>,
) -> Result<ParsedProgram, ParseError> {
    let source = SourceFile::new(path, text.into());
    let tree = Parser::new(source.text()).run()?;
    Ok(ParsedProgram { tree, source })
}

struct Parser<'src> {
    lexer: logos::Lexer<'src, Token>,
    source: &'src str,
    current: Option<Token>,
    current_span: Span,
    current_text: &'src str,
    /// End offset of the most recently consumed token.
    last_end: u32,
    tree: Tree,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            lexer: Token::lexer(source),
            source,
            current: None,
            current_span: Span::new(0, 0),
            current_text: "",
            last_end: 0,
            tree: Tree::new(),
        }
    }

    fn run(mut self) -> Result<Tree, ParseError> {
        self.bump()?;
        let mut statements = Vec::new();
        while self.current.is_some() {
            statements.push(self.parse_statement()?);
        }
        let span = Span::new(0, self.source.len() as u32);
        let root = self
            .tree
            .push(Node::with_children(NodeKind::Program, span, statements));
        self.tree.set_root(root);
        Ok(self.tree)
    }

    fn bump(&mut self) -> Result<(), ParseError> {
        self.last_end = self.current_span.end;
        match self.lexer.next() {
            Some(Ok(token)) => {
                let span = self.lexer.span();
                self.current = Some(token);
                self.current_span = Span::new(span.start as u32, span.end as u32);
                self.current_text = self.lexer.slice();
            }
            Some(Err(())) => {
                return Err(ParseError::UnexpectedChar {
                    offset: self.lexer.span().start as u32,
                });
            }
            None => {
                let end = self.source.len() as u32;
                self.current = None;
                self.current_span = Span::new(end, end);
                self.current_text = "";
            }
        }
        Ok(())
    }

    fn at(&self, token: Token) -> bool {
        self.current == Some(token)
    }

    fn eat(&mut self, token: Token) -> Result<bool, ParseError> {
        if self.at(token) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<Span, ParseError> {
        match self.current {
            Some(t) if t == token => {
                let span = self.current_span;
                self.bump()?;
                Ok(span)
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                expected,
                found: self.current_text.to_string(),
                offset: self.current_span.start,
            }),
            None => Err(ParseError::UnexpectedEof { expected }),
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<(String, Span), ParseError> {
        match self.current {
            Some(Token::Ident) => {
                let name = self.current_text.to_string();
                let span = self.current_span;
                self.bump()?;
                Ok((name, span))
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                expected,
                found: self.current_text.to_string(),
                offset: self.current_span.start,
            }),
            None => Err(ParseError::UnexpectedEof { expected }),
        }
    }

    fn span_of(&self, id: NodeId) -> Span {
        self.tree.node(id).span
    }

    // ---- statements ----

    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        match self.current {
            Some(Token::Semi) => {
                let span = self.current_span;
                self.bump()?;
                Ok(self.tree.push(Node::new(NodeKind::EmptyStatement, span)))
            }
            Some(Token::LBrace) => self.parse_block(),
            Some(Token::Var) => self.parse_var_declaration(),
            Some(Token::If) => self.parse_if(),
            Some(Token::While) => self.parse_while(),
            Some(Token::Return) => self.parse_return(),
            Some(Token::Function) => self.parse_function(),
            Some(_) => self.parse_expression_statement(),
            None => Err(ParseError::UnexpectedEof {
                expected: "a statement",
            }),
        }
    }

    fn parse_block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.expect(Token::LBrace, "`{`")?;
        let mut statements = Vec::new();
        while !self.at(Token::RBrace) {
            if self.current.is_none() {
                return Err(ParseError::UnexpectedEof { expected: "`}`" });
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(Token::RBrace, "`}`")?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::BlockStatement,
            Span::new(start, self.last_end),
            statements,
        )))
    }

    fn parse_var_declaration(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.bump()?; // var
        let mut declarators = Vec::new();
        loop {
            let (name, name_span) = self.expect_ident("a variable name")?;
            let mut children = Vec::new();
            let mut end = name_span.end;
            if self.eat(Token::Assign)? {
                let init = self.parse_assign_expr()?;
                end = self.span_of(init).end;
                children.push(init);
            }
            let mut node = Node::with_data(
                NodeKind::VariableDeclarator,
                Span::new(name_span.start, end),
                NodeData::Name(name),
            );
            node.children = children;
            declarators.push(self.tree.push(node));
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        self.eat(Token::Semi)?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::VariableDeclaration,
            Span::new(start, self.last_end),
            declarators,
        )))
    }

    fn parse_if(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.bump()?; // if
        self.expect(Token::LParen, "`(`")?;
        let condition = self.parse_expr()?;
        self.expect(Token::RParen, "`)`")?;
        let consequent = self.parse_statement()?;
        let mut children = vec![condition, consequent];
        if self.eat(Token::Else)? {
            children.push(self.parse_statement()?);
        }
        Ok(self.tree.push(Node::with_children(
            NodeKind::IfStatement,
            Span::new(start, self.last_end),
            children,
        )))
    }

    fn parse_while(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.bump()?; // while
        self.expect(Token::LParen, "`(`")?;
        let condition = self.parse_expr()?;
        self.expect(Token::RParen, "`)`")?;
        let body = self.parse_statement()?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::WhileStatement,
            Span::new(start, self.last_end),
            vec![condition, body],
        )))
    }

    fn parse_return(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.bump()?; // return
        let mut children = Vec::new();
        if self.current.is_some() && !self.at(Token::Semi) && !self.at(Token::RBrace) {
            children.push(self.parse_expr()?);
        }
        self.eat(Token::Semi)?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::ReturnStatement,
            Span::new(start, self.last_end),
            children,
        )))
    }

    /// Parses `function name?(params) { body }`.
    ///
    /// Used for both declarations and function expressions; the anonymous
    /// form stores an empty name.
    fn parse_function(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.bump()?; // function
        let name = if self.at(Token::Ident) {
            let name = self.current_text.to_string();
            self.bump()?;
            name
        } else {
            String::new()
        };
        self.expect(Token::LParen, "`(`")?;
        let mut children = Vec::new();
        while self.at(Token::Ident) {
            let span = self.current_span;
            let param = self.current_text.to_string();
            self.bump()?;
            children.push(self.tree.push(Node::with_data(
                NodeKind::Identifier,
                span,
                NodeData::Name(param),
            )));
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        self.expect(Token::RParen, "`)`")?;
        children.push(self.parse_block()?);
        let mut node = Node::with_data(
            NodeKind::FunctionDeclaration,
            Span::new(start, self.last_end),
            NodeData::Name(name),
        );
        node.children = children;
        Ok(self.tree.push(node))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        let expr = self.parse_expr()?;
        self.eat(Token::Semi)?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::ExpressionStatement,
            Span::new(start, self.last_end),
            vec![expr],
        )))
    }

    // ---- expressions ----

    fn parse_expr(&mut self) -> Result<NodeId, ParseError> {
        self.parse_assign_expr()
    }

    fn parse_assign_expr(&mut self) -> Result<NodeId, ParseError> {
        let lhs = self.parse_binary_expr(1)?;
        let Some(op) = self.current.and_then(|t| t.assign_op()) else {
            return Ok(lhs);
        };
        self.bump()?;
        let rhs = self.parse_assign_expr()?;
        let span = Span::new(self.span_of(lhs).start, self.span_of(rhs).end);
        let mut node = Node::with_data(
            NodeKind::AssignExpression,
            span,
            NodeData::Operator(op.to_string()),
        );
        node.children = vec![lhs, rhs];
        Ok(self.tree.push(node))
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<NodeId, ParseError> {
        let mut lhs = self.parse_unary_expr()?;
        while let Some((op, prec)) = self.current.and_then(|t| t.binary_op()) {
            if prec < min_prec {
                break;
            }
            self.bump()?;
            let rhs = self.parse_binary_expr(prec + 1)?;
            let span = Span::new(self.span_of(lhs).start, self.span_of(rhs).end);
            let mut node = Node::with_data(
                NodeKind::BinaryExpression,
                span,
                NodeData::Operator(op.to_string()),
            );
            node.children = vec![lhs, rhs];
            lhs = self.tree.push(node);
        }
        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> Result<NodeId, ParseError> {
        let Some(op) = self.current.and_then(|t| t.unary_op()) else {
            return self.parse_postfix_expr();
        };
        let start = self.current_span.start;
        self.bump()?;
        let operand = self.parse_unary_expr()?;
        let mut node = Node::with_data(
            NodeKind::UnaryExpression,
            Span::new(start, self.last_end),
            NodeData::Operator(op.to_string()),
        );
        node.children = vec![operand];
        Ok(self.tree.push(node))
    }

    fn parse_postfix_expr(&mut self) -> Result<NodeId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current {
                Some(Token::Dot) => {
                    self.bump()?;
                    let (name, span) = self.expect_ident("a property name")?;
                    let property = self.tree.push(Node::with_data(
                        NodeKind::Identifier,
                        span,
                        NodeData::Name(name),
                    ));
                    expr = self.tree.push(Node::with_children(
                        NodeKind::MemberExpression,
                        Span::new(self.span_of(expr).start, self.last_end),
                        vec![expr, property],
                    ));
                }
                Some(Token::LBracket) => {
                    self.bump()?;
                    let index = self.parse_expr()?;
                    self.expect(Token::RBracket, "`]`")?;
                    expr = self.tree.push(Node::with_children(
                        NodeKind::MemberExpression,
                        Span::new(self.span_of(expr).start, self.last_end),
                        vec![expr, index],
                    ));
                }
                Some(Token::LParen) => {
                    self.bump()?;
                    let mut children = vec![expr];
                    while !self.at(Token::RParen) {
                        children.push(self.parse_assign_expr()?);
                        if !self.eat(Token::Comma)? {
                            break;
                        }
                    }
                    self.expect(Token::RParen, "`)`")?;
                    expr = self.tree.push(Node::with_children(
                        NodeKind::CallExpression,
                        Span::new(self.span_of(children[0]).start, self.last_end),
                        children,
                    ));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        match self.current {
            Some(Token::Ident) => {
                let name = self.current_text.to_string();
                let span = self.current_span;
                self.bump()?;
                Ok(self
                    .tree
                    .push(Node::with_data(NodeKind::Identifier, span, NodeData::Name(name))))
            }
            Some(Token::Number) => {
                let raw = self.current_text.to_string();
                let span = self.current_span;
                let value: f64 = raw.parse().map_err(|_| ParseError::InvalidNumber {
                    raw: raw.clone(),
                    offset: span.start,
                })?;
                self.bump()?;
                Ok(self.tree.push(Node::with_data(
                    NodeKind::NumberLiteral,
                    span,
                    NodeData::Number { value, raw },
                )))
            }
            Some(Token::String) => {
                let inner = &self.current_text[1..self.current_text.len() - 1];
                let value = unescape(inner);
                let span = self.current_span;
                self.bump()?;
                Ok(self.tree.push(Node::with_data(
                    NodeKind::StringLiteral,
                    span,
                    NodeData::Str(value),
                )))
            }
            Some(token @ (Token::True | Token::False)) => {
                let span = self.current_span;
                self.bump()?;
                Ok(self.tree.push(Node::with_data(
                    NodeKind::BooleanLiteral,
                    span,
                    NodeData::Bool(token == Token::True),
                )))
            }
            Some(Token::Null) => {
                let span = self.current_span;
                self.bump()?;
                Ok(self.tree.push(Node::new(NodeKind::NullLiteral, span)))
            }
            Some(Token::Slash) => self.parse_regex(),
            Some(Token::LParen) => {
                self.bump()?;
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(Token::LBracket) => self.parse_array(),
            Some(Token::LBrace) => self.parse_object(),
            Some(Token::Function) => self.parse_function(),
            Some(_) => Err(ParseError::UnexpectedToken {
                expected: "an expression",
                found: self.current_text.to_string(),
                offset: self.current_span.start,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "an expression",
            }),
        }
    }

    /// Scans a regex literal starting at the current `/` token.
    ///
    /// The body and flags live in the lexer remainder; the lexer span is
    /// extended over them so normal lexing resumes after the literal.
    fn parse_regex(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        let rest = self.lexer.remainder();
        let mut in_class = false;
        let mut escaped = false;
        let mut body_len = None;
        for (idx, ch) in rest.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '[' => in_class = true,
                ']' => in_class = false,
                '\n' => break,
                '/' if !in_class => {
                    body_len = Some(idx);
                    break;
                }
                _ => {}
            }
        }
        let Some(body_len) = body_len else {
            return Err(ParseError::UnterminatedRegex { offset: start });
        };
        let flags_len = rest[body_len + 1..]
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let consumed = body_len + 1 + flags_len;
        self.lexer.bump(consumed);

        let end = self.current_span.start as usize + 1 + consumed;
        let span = Span::new(start, end as u32);
        let raw = self.source[start as usize..end].to_string();
        // Make the upcoming bump record the full literal as consumed.
        self.current_span = span;
        self.bump()?;
        Ok(self
            .tree
            .push(Node::with_data(NodeKind::RegexLiteral, span, NodeData::Regex(raw))))
    }

    fn parse_array(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.expect(Token::LBracket, "`[`")?;
        let mut elements = Vec::new();
        while !self.at(Token::RBracket) {
            elements.push(self.parse_assign_expr()?);
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        self.expect(Token::RBracket, "`]`")?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::ArrayLiteral,
            Span::new(start, self.last_end),
            elements,
        )))
    }

    fn parse_object(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        self.expect(Token::LBrace, "`{`")?;
        let mut properties = Vec::new();
        while !self.at(Token::RBrace) {
            properties.push(self.parse_property()?);
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        self.expect(Token::RBrace, "`}`")?;
        Ok(self.tree.push(Node::with_children(
            NodeKind::ObjectLiteral,
            Span::new(start, self.last_end),
            properties,
        )))
    }

    fn parse_property(&mut self) -> Result<NodeId, ParseError> {
        let start = self.current_span.start;
        // `get`/`set` are contextual: only accessors when not followed by `:`.
        if self.at(Token::Ident) && (self.current_text == "get" || self.current_text == "set") {
            let kind = if self.current_text == "get" {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            let literal_key = self.current_text.to_string();
            self.bump()?;
            if self.at(Token::Colon) {
                return self.finish_init_property(start, literal_key);
            }
            return self.finish_accessor_property(start, kind);
        }
        let key = self.property_key()?;
        self.finish_init_property(start, key)
    }

    fn property_key(&mut self) -> Result<String, ParseError> {
        match self.current {
            Some(Token::Ident) | Some(Token::Number) => {
                let key = self.current_text.to_string();
                self.bump()?;
                Ok(key)
            }
            Some(Token::String) => {
                let key = unescape(&self.current_text[1..self.current_text.len() - 1]);
                self.bump()?;
                Ok(key)
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                expected: "a property key",
                found: self.current_text.to_string(),
                offset: self.current_span.start,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "a property key",
            }),
        }
    }

    fn finish_init_property(&mut self, start: u32, key: String) -> Result<NodeId, ParseError> {
        self.expect(Token::Colon, "`:`")?;
        let value = self.parse_assign_expr()?;
        let mut node = Node::with_data(
            NodeKind::Property,
            Span::new(start, self.last_end),
            NodeData::Property {
                key,
                kind: PropertyKind::Init,
            },
        );
        node.children = vec![value];
        Ok(self.tree.push(node))
    }

    fn finish_accessor_property(
        &mut self,
        start: u32,
        kind: PropertyKind,
    ) -> Result<NodeId, ParseError> {
        let key = self.property_key()?;
        self.expect(Token::LParen, "`(`")?;
        let mut children = Vec::new();
        while self.at(Token::Ident) {
            let span = self.current_span;
            let name = self.current_text.to_string();
            self.bump()?;
            children.push(self.tree.push(Node::with_data(
                NodeKind::Identifier,
                span,
                NodeData::Name(name),
            )));
            if !self.eat(Token::Comma)? {
                break;
            }
        }
        self.expect(Token::RParen, "`)`")?;
        children.push(self.parse_block()?);
        let mut node = Node::with_data(
            NodeKind::Property,
            Span::new(start, self.last_end),
            NodeData::Property { key, kind },
        );
        node.children = children;
        Ok(self.tree.push(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> ParsedProgram {
        parse_str("test.js", source).expect("parse failed")
    }

    fn root_children(program: &ParsedProgram) -> &[NodeId] {
        let root = program.tree.root().expect("no root");
        &program.tree.node(root).children
    }

    #[test]
    fn test_empty_program() {
        let program = parse("");
        let root = program.tree.root().unwrap();
        assert_eq!(program.tree.node(root).kind, NodeKind::Program);
        assert!(root_children(&program).is_empty());
    }

    #[test]
    fn test_var_declaration() {
        let program = parse("var x = 1;");
        let stmts = root_children(&program);
        assert_eq!(stmts.len(), 1);

        let decl = program.tree.node(stmts[0]);
        assert_eq!(decl.kind, NodeKind::VariableDeclaration);

        let declarator = program.tree.node(decl.children[0]);
        assert_eq!(declarator.kind, NodeKind::VariableDeclarator);
        assert_eq!(declarator.data, NodeData::Name("x".into()));

        let init = program.tree.node(declarator.children[0]);
        assert_eq!(
            init.data,
            NodeData::Number {
                value: 1.0,
                raw: "1".into()
            }
        );
    }

    #[test]
    fn test_var_declaration_multiple_declarators() {
        let program = parse("var a = 1, b;");
        let decl = program.tree.node(root_children(&program)[0]);
        assert_eq!(decl.children.len(), 2);
        let b = program.tree.node(decl.children[1]);
        assert_eq!(b.data, NodeData::Name("b".into()));
        assert!(b.children.is_empty());
    }

    #[test]
    fn test_binary_precedence() {
        let program = parse("1 + 2 * 3;");
        let stmt = program.tree.node(root_children(&program)[0]);
        let add = program.tree.node(stmt.children[0]);
        assert_eq!(add.kind, NodeKind::BinaryExpression);
        assert_eq!(add.data, NodeData::Operator("+".into()));

        let mul = program.tree.node(add.children[1]);
        assert_eq!(mul.kind, NodeKind::BinaryExpression);
        assert_eq!(mul.data, NodeData::Operator("*".into()));
    }

    #[test]
    fn test_assignment_operator() {
        let program = parse("x += 2;");
        let stmt = program.tree.node(root_children(&program)[0]);
        let assign = program.tree.node(stmt.children[0]);
        assert_eq!(assign.kind, NodeKind::AssignExpression);
        assert_eq!(assign.data, NodeData::Operator("+=".into()));
    }

    #[test]
    fn test_empty_statement() {
        let program = parse("; var x;");
        let stmts = root_children(&program);
        assert_eq!(stmts.len(), 2);
        assert_eq!(program.tree.node(stmts[0]).kind, NodeKind::EmptyStatement);
    }

    #[test]
    fn test_if_else() {
        let program = parse("if (a) b; else c;");
        let stmt = program.tree.node(root_children(&program)[0]);
        assert_eq!(stmt.kind, NodeKind::IfStatement);
        assert_eq!(stmt.children.len(), 3);
    }

    #[test]
    fn test_while_with_block() {
        let program = parse("while (x) { f(); }");
        let stmt = program.tree.node(root_children(&program)[0]);
        assert_eq!(stmt.kind, NodeKind::WhileStatement);
        let body = program.tree.node(stmt.children[1]);
        assert_eq!(body.kind, NodeKind::BlockStatement);
        assert_eq!(body.children.len(), 1);
    }

    #[test]
    fn test_function_declaration() {
        let program = parse("function add(a, b) { return a + b; }");
        let func = program.tree.node(root_children(&program)[0]);
        assert_eq!(func.kind, NodeKind::FunctionDeclaration);
        assert_eq!(func.data, NodeData::Name("add".into()));
        // two params + block
        assert_eq!(func.children.len(), 3);
        let body = program.tree.node(func.children[2]);
        assert_eq!(body.kind, NodeKind::BlockStatement);
    }

    #[test]
    fn test_call_and_member() {
        let program = parse("console.log(x);");
        let stmt = program.tree.node(root_children(&program)[0]);
        let call = program.tree.node(stmt.children[0]);
        assert_eq!(call.kind, NodeKind::CallExpression);
        assert_eq!(call.children.len(), 2);

        let member = program.tree.node(call.children[0]);
        assert_eq!(member.kind, NodeKind::MemberExpression);
        let prop = program.tree.node(member.children[1]);
        assert_eq!(prop.data, NodeData::Name("log".into()));
    }

    #[test]
    fn test_object_literal() {
        let program = parse("var o = { a: 1, 'b c': 2 };");
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let object = program.tree.node(declarator.children[0]);
        assert_eq!(object.kind, NodeKind::ObjectLiteral);
        assert_eq!(object.children.len(), 2);

        let first = program.tree.node(object.children[0]);
        assert_eq!(
            first.data,
            NodeData::Property {
                key: "a".into(),
                kind: PropertyKind::Init
            }
        );
        let second = program.tree.node(object.children[1]);
        assert_eq!(
            second.data,
            NodeData::Property {
                key: "b c".into(),
                kind: PropertyKind::Init
            }
        );
    }

    #[test]
    fn test_object_accessor_property() {
        let program = parse("var o = { get x() { return 1; }, set x(v) { } };");
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let object = program.tree.node(declarator.children[0]);

        let getter = program.tree.node(object.children[0]);
        assert_eq!(
            getter.data,
            NodeData::Property {
                key: "x".into(),
                kind: PropertyKind::Get
            }
        );
        let setter = program.tree.node(object.children[1]);
        assert_eq!(
            setter.data,
            NodeData::Property {
                key: "x".into(),
                kind: PropertyKind::Set
            }
        );
    }

    #[test]
    fn test_property_named_get() {
        let program = parse("var o = { get: 1 };");
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let object = program.tree.node(declarator.children[0]);
        let prop = program.tree.node(object.children[0]);
        assert_eq!(
            prop.data,
            NodeData::Property {
                key: "get".into(),
                kind: PropertyKind::Init
            }
        );
    }

    #[test]
    fn test_regex_literal() {
        let program = parse("var r = /a[/]b/gi;");
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let regex = program.tree.node(declarator.children[0]);
        assert_eq!(regex.kind, NodeKind::RegexLiteral);
        assert_eq!(regex.data, NodeData::Regex("/a[/]b/gi".into()));
    }

    #[test]
    fn test_string_literal_unescaped() {
        let program = parse(r#"var s = "a\nb";"#);
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let string = program.tree.node(declarator.children[0]);
        assert_eq!(string.data, NodeData::Str("a\nb".into()));
    }

    #[test]
    fn test_unary_expression() {
        let program = parse("!x;");
        let stmt = program.tree.node(root_children(&program)[0]);
        let unary = program.tree.node(stmt.children[0]);
        assert_eq!(unary.kind, NodeKind::UnaryExpression);
        assert_eq!(unary.data, NodeData::Operator("!".into()));
    }

    #[test]
    fn test_array_literal() {
        let program = parse("var a = [1, 2, 3];");
        let decl = program.tree.node(root_children(&program)[0]);
        let declarator = program.tree.node(decl.children[0]);
        let array = program.tree.node(declarator.children[0]);
        assert_eq!(array.kind, NodeKind::ArrayLiteral);
        assert_eq!(array.children.len(), 3);
    }

    #[test]
    fn test_error_unexpected_token() {
        let err = parse_str("test.js", "var = 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_error_unexpected_char() {
        let err = parse_str("test.js", "var x = #;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar { .. }));
    }

    #[test]
    fn test_error_unexpected_eof() {
        let err = parse_str("test.js", "var x = ").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_error_unterminated_regex() {
        let err = parse_str("test.js", "var r = /ab").unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedRegex { .. }));
    }

    #[test]
    fn test_spans_cover_statements() {
        let source = "var x = 1;\nvar y = 2;\n";
        let program = parse(source);
        let stmts = root_children(&program);
        let first = program.tree.node(stmts[0]).span;
        let second = program.tree.node(stmts[1]).span;
        assert_eq!(program.source.slice(first), "var x = 1;");
        assert_eq!(program.source.slice(second), "var y = 2;");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/missing.js").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}

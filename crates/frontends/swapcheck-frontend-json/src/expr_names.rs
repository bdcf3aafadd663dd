//! Expression naming: reduces an argument expression to one identifier.
//!
//! The reduction follows the "DeepBugs" naming rules over expression
//! text: an identifier names itself; a literal becomes `LIT:` plus its
//! spelling; a member access names the member; a subscript names its
//! base; a call names its callee; unary operators and casts are
//! transparent; `sizeof`/`alignof` reduce to the keyword itself.
//! Anything else (binary operators, ternaries, malformed input) yields
//! no name, and the checker will skip pairs involving that argument.

use unicode_ident::{is_xid_continue, is_xid_start};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    /// A numeric, string, or character literal, spelled as written.
    Literal(String),
    Punct(Punct),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Punct {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Arrow,
    Scope,
    Comma,
    Star,
    Amp,
    Plus,
    Minus,
    Bang,
    Tilde,
    Increment,
    Decrement,
    /// Any other operator; always infix from the namer's point of view.
    Other,
}

/// Derives a name for the argument expression `expr`, or `None` when it
/// has no usable name.
pub fn expr_name(expr: &str) -> Option<String> {
    let tokens = tokenize(expr);
    name_tokens(&tokens)
}

fn name_tokens(mut tokens: &[Token]) -> Option<String> {
    // Parentheses around the whole expression are transparent.
    while tokens.len() >= 2
        && tokens[0] == Token::Punct(Punct::LParen)
        && matching_close(tokens, 0) == Some(tokens.len() - 1)
    {
        tokens = &tokens[1..tokens.len() - 1];
    }
    if tokens.is_empty() {
        return None;
    }

    // A top-level infix operator makes the expression a computation with
    // no single name (`a + b`, `x = y`, `cond ? a : b`).
    if has_top_level_infix(tokens) {
        return None;
    }

    // sizeof/alignof reduce to the keyword regardless of their argument.
    if let Token::Ident(keyword) = &tokens[0] {
        if keyword == "sizeof" || keyword == "alignof" {
            return Some(keyword.clone());
        }
    }

    if tokens.len() == 1 {
        return match &tokens[0] {
            Token::Ident(name) => match name.as_str() {
                "true" | "false" | "nullptr" => Some(format!("LIT:{name}")),
                _ => Some(name.clone()),
            },
            Token::Literal(text) => Some(format!("LIT:{text}")),
            Token::Punct(_) => None,
        };
    }

    // Postfix forms, outermost first.
    match tokens.last() {
        // A call names its callee.
        Some(Token::Punct(Punct::RParen)) => {
            let open = matching_open(tokens, tokens.len() - 1)?;
            return name_tokens(&tokens[..open]);
        }
        // A subscript names its base.
        Some(Token::Punct(Punct::RBracket)) => {
            let open = matching_open(tokens, tokens.len() - 1)?;
            return name_tokens(&tokens[..open]);
        }
        Some(Token::Punct(Punct::Increment | Punct::Decrement)) => {
            return name_tokens(&tokens[..tokens.len() - 1]);
        }
        _ => {}
    }

    // A member access or qualified name names its last segment.
    if let Some(sep) = last_top_level_separator(tokens) {
        return name_tokens(&tokens[sep + 1..]);
    }

    if let Token::Punct(punct) = &tokens[0] {
        // Prefix unary operators are transparent.
        if matches!(
            punct,
            Punct::Bang
                | Punct::Tilde
                | Punct::Minus
                | Punct::Plus
                | Punct::Star
                | Punct::Amp
                | Punct::Increment
                | Punct::Decrement
        ) {
            return name_tokens(&tokens[1..]);
        }
        // A leading parenthesized group with a tail is a cast.
        if *punct == Punct::LParen {
            let close = matching_close(tokens, 0)?;
            return name_tokens(&tokens[close + 1..]);
        }
    }

    None
}

/// The index of the closer matching the opener at `open`, or `None` for
/// unbalanced input.
fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let mut stack = Vec::new();
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::Punct(Punct::LParen) => stack.push(Punct::RParen),
            Token::Punct(Punct::LBracket) => stack.push(Punct::RBracket),
            Token::Punct(punct @ (Punct::RParen | Punct::RBracket)) => {
                if stack.pop() != Some(*punct) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// The index of the opener matching the closer at `close`, or `None`
/// for unbalanced input.
fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let mut stack = Vec::new();
    for idx in (0..=close).rev() {
        match &tokens[idx] {
            Token::Punct(Punct::RParen) => stack.push(Punct::LParen),
            Token::Punct(Punct::RBracket) => stack.push(Punct::LBracket),
            Token::Punct(punct @ (Punct::LParen | Punct::LBracket)) => {
                if stack.pop() != Some(*punct) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// What the previous token contributed, for infix detection. A closing
/// paren is kept distinct from other operands because `(a)&b` may be a
/// cast followed by a unary operator rather than a binary expression.
#[derive(PartialEq, Eq, Clone, Copy)]
enum Prev {
    Start,
    Operand,
    CloseParen,
}

/// True when an operator that can only be infix appears at nesting depth
/// zero after an operand: the expression is a computation, not a name.
fn has_top_level_infix(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    let mut prev = Prev::Start;
    for token in tokens {
        match token {
            Token::Punct(Punct::LParen | Punct::LBracket) => {
                depth += 1;
                prev = Prev::Start;
            }
            Token::Punct(Punct::RParen) => {
                depth = depth.saturating_sub(1);
                prev = Prev::CloseParen;
            }
            Token::Punct(Punct::RBracket) => {
                depth = depth.saturating_sub(1);
                prev = Prev::Operand;
            }
            Token::Punct(punct) => {
                if depth == 0 && prev != Prev::Start {
                    let cast_then_unary = prev == Prev::CloseParen
                        && matches!(punct, Punct::Star | Punct::Amp | Punct::Plus | Punct::Minus);
                    match punct {
                        // Trailing parts of names and postfix operators.
                        Punct::Dot
                        | Punct::Arrow
                        | Punct::Scope
                        | Punct::Increment
                        | Punct::Decrement => {}
                        _ if cast_then_unary => {}
                        _ => return true,
                    }
                }
                prev = Prev::Start;
            }
            Token::Ident(_) | Token::Literal(_) => prev = Prev::Operand,
        }
    }
    false
}

/// The index of the last `.`/`->`/`::` at nesting depth zero.
fn last_top_level_separator(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    let mut last = None;
    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::Punct(Punct::LParen | Punct::LBracket) => depth += 1,
            Token::Punct(Punct::RParen | Punct::RBracket) => depth = depth.saturating_sub(1),
            Token::Punct(Punct::Dot | Punct::Arrow | Punct::Scope) if depth == 0 => {
                last = Some(idx);
            }
            _ => {}
        }
    }
    last
}

fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '_' || is_xid_start(c) {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c == '_' || is_xid_continue(c) {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else if c.is_ascii_digit() {
            // Numeric literal: digits, radix letters, digit separators,
            // exponents, suffixes. Spelled as written.
            let mut literal = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '.' || c == '\'' || c == '_' {
                    literal.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Literal(literal));
        } else if c == '"' || c == '\'' {
            tokens.push(Token::Literal(quoted_literal(&mut chars, c)));
        } else {
            chars.next();
            let two = chars.peek().copied();
            let punct = match (c, two) {
                ('-', Some('>')) => {
                    chars.next();
                    Punct::Arrow
                }
                (':', Some(':')) => {
                    chars.next();
                    Punct::Scope
                }
                ('+', Some('+')) => {
                    chars.next();
                    Punct::Increment
                }
                ('-', Some('-')) => {
                    chars.next();
                    Punct::Decrement
                }
                // Compound operators collapse to an infix marker.
                ('<' | '>' | '=' | '!' | '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^', Some('='))
                | ('&', Some('&'))
                | ('|', Some('|'))
                | ('<', Some('<'))
                | ('>', Some('>')) => {
                    chars.next();
                    Punct::Other
                }
                ('(', _) => Punct::LParen,
                (')', _) => Punct::RParen,
                ('[', _) => Punct::LBracket,
                (']', _) => Punct::RBracket,
                ('.', _) => Punct::Dot,
                (',', _) => Punct::Comma,
                ('*', _) => Punct::Star,
                ('&', _) => Punct::Amp,
                ('+', _) => Punct::Plus,
                ('-', _) => Punct::Minus,
                ('!', _) => Punct::Bang,
                ('~', _) => Punct::Tilde,
                _ => Punct::Other,
            };
            tokens.push(Token::Punct(punct));
        }
    }

    tokens
}

/// Consumes a quoted literal including its quotes, honoring backslash
/// escapes. An unterminated literal runs to the end of input.
fn quoted_literal(chars: &mut std::iter::Peekable<std::str::Chars>, quote: char) -> String {
    let mut literal = String::new();
    literal.push(quote);
    chars.next();
    while let Some(c) = chars.next() {
        literal.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                literal.push(escaped);
            }
        } else if c == quote {
            break;
        }
    }
    literal
}

#[cfg(test)]
mod tests {
    use super::expr_name;

    fn name(expr: &str) -> Option<String> {
        expr_name(expr)
    }

    #[test]
    fn identifiers_name_themselves() {
        assert_eq!(name("local"), Some("local".into()));
        assert_eq!(name("O_CREAT"), Some("O_CREAT".into()));
        assert_eq!(name("  spaced  "), Some("spaced".into()));
    }

    #[test]
    fn this_names_itself() {
        assert_eq!(name("this"), Some("this".into()));
    }

    #[test]
    fn literals_get_the_lit_prefix() {
        assert_eq!(name("3"), Some("LIT:3".into()));
        assert_eq!(name("3.5f"), Some("LIT:3.5f".into()));
        assert_eq!(name("0x1F"), Some("LIT:0x1F".into()));
        assert_eq!(name("'a'"), Some("LIT:'a'".into()));
        assert_eq!(name("\"hello\""), Some("LIT:\"hello\"".into()));
        assert_eq!(name("true"), Some("LIT:true".into()));
        assert_eq!(name("nullptr"), Some("LIT:nullptr".into()));
    }

    #[test]
    fn member_accesses_name_the_member() {
        assert_eq!(name("localStruct.member"), Some("member".into()));
        assert_eq!(name("this->member"), Some("member".into()));
        assert_eq!(name("a.b.c"), Some("c".into()));
        assert_eq!(name("ns::value"), Some("value".into()));
    }

    #[test]
    fn subscripts_name_the_base() {
        assert_eq!(name("localArr[1]"), Some("localArr".into()));
        assert_eq!(name("table[i][j]"), Some("table".into()));
    }

    #[test]
    fn calls_name_the_callee() {
        assert_eq!(name("fork()"), Some("fork".into()));
        assert_eq!(name("WEXITSTATUS(3)"), Some("WEXITSTATUS".into()));
        assert_eq!(name("obj.method(a, b)"), Some("method".into()));
        assert_eq!(name("TestStruct::staticFunc()"), Some("staticFunc".into()));
    }

    #[test]
    fn unary_operators_are_transparent() {
        assert_eq!(name("&local"), Some("local".into()));
        assert_eq!(name("*ptr"), Some("ptr".into()));
        assert_eq!(name("!flag"), Some("flag".into()));
        assert_eq!(name("-1"), Some("LIT:1".into()));
        assert_eq!(name("count++"), Some("count".into()));
        assert_eq!(name("--count"), Some("count".into()));
    }

    #[test]
    fn casts_and_parens_are_transparent() {
        assert_eq!(name("(char *)&local"), Some("local".into()));
        assert_eq!(name("(local)"), Some("local".into()));
        assert_eq!(name("((local))"), Some("local".into()));
        assert_eq!(name("(size_t)len"), Some("len".into()));
    }

    #[test]
    fn sizeof_and_alignof_name_the_keyword() {
        assert_eq!(name("sizeof(local)"), Some("sizeof".into()));
        assert_eq!(name("sizeof(int)"), Some("sizeof".into()));
        assert_eq!(name("sizeof buf"), Some("sizeof".into()));
        assert_eq!(name("alignof(int)"), Some("alignof".into()));
    }

    #[test]
    fn computations_have_no_name() {
        assert_eq!(name("3 + 4"), None);
        assert_eq!(name("(3 + 4)"), None);
        assert_eq!(name("a | b"), None);
        assert_eq!(name("x = y"), None);
        assert_eq!(name("len == 0"), None);
        assert_eq!(name("cond ? a : b"), None);
    }

    #[test]
    fn nested_operators_do_not_leak_out() {
        // Operators inside call arguments or subscripts stay nested.
        assert_eq!(name("f(a + b)"), Some("f".into()));
        assert_eq!(name("arr[i + 1]"), Some("arr".into()));
    }

    #[test]
    fn degenerate_input_has_no_name() {
        assert_eq!(name(""), None);
        assert_eq!(name("   "), None);
        assert_eq!(name("("), None);
        assert_eq!(name(")("), None);
        assert_eq!(name("+"), None);
    }
}

//! Whitespace-width expression tree recovery.
//!
//! One flat token run per expression slot comes in; structure comes out.
//! At bracket depth 0 the operator with the *widest* trailing whitespace
//! run is the loosest-binding split point (ties go to the later
//! occurrence). Non-comma operators must carry equal whitespace on both
//! sides. A winning comma means the run is a function call; a winning
//! anything-else splits into left and right subtrees.

use tracing::trace;

use rev_ir::{ExprTree, Operator, Token, TokenKind};

use crate::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

/// Build an expression tree from one flat token run.
///
/// The run must include explicit whitespace tokens; their widths are the
/// only source of grouping information.
pub fn build_expression_tree(tokens: &[Token]) -> Result<ExprTree> {
    if tokens.is_empty() {
        return Err(ParseError::unpositioned("empty expression slot"));
    }

    for token in tokens {
        if token.is_whitespace() && token.text.contains('\t') {
            return Err(ParseError::at("tabs are not allowed in expressions", token));
        }
    }

    let starts_ws = tokens[0].is_whitespace();
    let ends_ws = tokens[tokens.len() - 1].is_whitespace();
    let non_ws: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_whitespace())
        .map(|(i, _)| i)
        .collect();

    // Find the depth-0 operator with the widest trailing whitespace.
    let mut max_width = 0usize;
    let mut selected: Option<(usize, Operator)> = None;
    let mut depth = 0i32;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LSquare => depth += 1,
            TokenKind::RSquare => depth -= 1,
            _ => {}
        }
        if depth != 0 || token.kind != TokenKind::Operator {
            continue;
        }
        let Some(op) = Operator::from_spelling(&token.text) else {
            continue;
        };
        if i + 1 >= tokens.len() {
            return Err(ParseError::at(
                "operator cannot be at the end of an expression",
                token,
            ));
        }
        let l_width = if i > 0 {
            tokens[i - 1].whitespace_width()
        } else {
            0
        };
        let r_width = tokens[i + 1].whitespace_width();
        if l_width != r_width && op != Operator::Com {
            return Err(ParseError::at(
                "whitespace must be equal on either side of an operator",
                token,
            ));
        }
        if r_width >= max_width {
            max_width = r_width;
            selected = Some((i, op));
        }
    }

    // Single-argument call: a name followed by a whitespace run wider
    // than any operator gap claims the rest of the run as its argument.
    let first = usize::from(starts_ws);
    if tokens.len() >= first + 3
        && tokens[first].kind == TokenKind::Name
        && tokens[first + 1].is_whitespace()
        && tokens[first + 2].starts_value()
        && tokens[first + 1].whitespace_width() > max_width
    {
        trace!(callee = %tokens[first].text, "single-argument call split");
        let arg = build_expression_tree(&tokens[first + 1..])?;
        return Ok(ExprTree::Function {
            name: tokens[first].clone(),
            args: vec![arg],
        });
    }

    match selected {
        None => build_value(tokens, &non_ws, starts_ws, ends_ws),
        Some((_, Operator::Com)) => build_call(tokens, &non_ws, starts_ws, max_width),
        Some((split, op)) => {
            trace!(op = op.spelling(), max_width, "binary split");
            let left = build_expression_tree(&tokens[..split])?;
            let right = build_expression_tree(&tokens[split + 1..])?;
            Ok(ExprTree::Expression {
                left: Box::new(left),
                right: Box::new(right),
                op,
                op_token: tokens[split].clone(),
            })
        }
    }
}

/// Operator-free run: a list literal, an index access, or a lone value.
fn build_value(
    tokens: &[Token],
    non_ws: &[usize],
    starts_ws: bool,
    ends_ws: bool,
) -> Result<ExprTree> {
    let Some(&head_idx) = non_ws.first() else {
        return Err(ParseError::at("expected a name or value", &tokens[0]));
    };
    let head = &tokens[head_idx];
    if !head.starts_value() {
        return Err(ParseError::at("expected a name or value", head));
    }

    // A bracket that opens the run and closes at its very end is a list.
    if head.kind == TokenKind::LSquare {
        let mut depth = 1i32;
        for (pos, &tok_idx) in non_ws.iter().enumerate().skip(1) {
            match tokens[tok_idx].kind {
                TokenKind::LSquare => depth += 1,
                TokenKind::RSquare => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                if pos == non_ws.len() - 1 {
                    return build_list(tokens, starts_ws, ends_ws);
                }
                break;
            }
        }
    }

    // A run ending in `]` that is not itself a list is an index access:
    // scan backward for the matching opening bracket at depth 0.
    if non_ws.last().is_some_and(|&i| tokens[i].kind == TokenKind::RSquare) {
        let end_index = tokens.len() - 1 - usize::from(ends_ws);
        let mut depth = -1i32;
        for i in (0..end_index).rev() {
            match tokens[i].kind {
                TokenKind::LSquare => depth += 1,
                TokenKind::RSquare => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                let base = build_expression_tree(&tokens[usize::from(starts_ws)..i])?;
                let index = build_expression_tree(&tokens[i + 1..end_index])?;
                return Ok(ExprTree::Index {
                    base: Box::new(base),
                    index: Box::new(index),
                });
            }
        }
    }

    if non_ws.len() != 1 {
        return Err(ParseError::at(
            "expected a single name or value",
            &tokens[non_ws[1]],
        ));
    }
    Ok(ExprTree::Value(head.clone()))
}

/// Bracket-wrapped list literal.
///
/// The whitespace immediately inside each bracket must be equal in
/// width; depth-1 commas whose trailing whitespace matches that inner
/// width separate the elements.
fn build_list(tokens: &[Token], starts_ws: bool, ends_ws: bool) -> Result<ExprTree> {
    let open = usize::from(starts_ws);
    let close = tokens.len() - 1 - usize::from(ends_ws);

    let l_width = tokens[open + 1].whitespace_width();
    let r_width = tokens[close - 1].whitespace_width();
    if l_width != r_width {
        return Err(ParseError::at(
            "whitespace between either bracket of a list must be equal in length",
            &tokens[close - 1],
        ));
    }

    let mut depth = 0i32;
    let mut commas = Vec::new();
    for i in 0..tokens.len() - 1 {
        match tokens[i].kind {
            TokenKind::LSquare => depth += 1,
            TokenKind::RSquare => depth -= 1,
            _ => {}
        }
        if depth == 1
            && tokens[i].kind == TokenKind::Operator
            && Operator::from_spelling(&tokens[i].text) == Some(Operator::Com)
            && (l_width == 0 || tokens[i + 1].whitespace_width() == l_width)
        {
            commas.push(i);
        }
    }

    let mut elements = Vec::new();
    if commas.is_empty() {
        elements.push(build_expression_tree(&tokens[open + 1..close])?);
    } else {
        let mut bounds = Vec::with_capacity(commas.len() + 2);
        bounds.push(open);
        bounds.extend_from_slice(&commas);
        bounds.push(close);
        for pair in bounds.windows(2) {
            elements.push(build_expression_tree(&tokens[pair[0] + 1..pair[1]])?);
        }
    }
    Ok(ExprTree::List(elements))
}

/// Comma-selected run: a multi-argument function call.
fn build_call(
    tokens: &[Token],
    non_ws: &[usize],
    starts_ws: bool,
    max_width: usize,
) -> Result<ExprTree> {
    let name_tok = &tokens[non_ws[0]];
    let arg_ok = non_ws.get(1).is_some_and(|&i| tokens[i].starts_value());
    if name_tok.kind != TokenKind::Name || !arg_ok {
        return Err(ParseError::at(
            "expected a function call; Reverie replaces parentheses with spaces and whitespace is significant",
            name_tok,
        ));
    }
    trace!(callee = %name_tok.text, max_width, "call split");

    // Every depth-0 comma whose trailing whitespace matches the winning
    // width separates arguments.
    let mut depth = 0i32;
    let mut commas = Vec::new();
    for i in 0..tokens.len() {
        match tokens[i].kind {
            TokenKind::LSquare => depth += 1,
            TokenKind::RSquare => depth -= 1,
            _ => {}
        }
        if depth == 0
            && tokens[i].kind == TokenKind::Operator
            && Operator::from_spelling(&tokens[i].text) == Some(Operator::Com)
            && tokens.get(i + 1).map_or(0, Token::whitespace_width) == max_width
        {
            commas.push(i);
        }
    }

    let mut bounds = Vec::with_capacity(commas.len() + 2);
    bounds.push(usize::from(starts_ws));
    bounds.extend_from_slice(&commas);
    bounds.push(tokens.len());
    let mut args = Vec::with_capacity(bounds.len() - 1);
    for pair in bounds.windows(2) {
        args.push(build_expression_tree(&tokens[pair[0] + 1..pair[1]])?);
    }
    Ok(ExprTree::Function {
        name: name_tok.clone(),
        args,
    })
}

#[cfg(test)]
mod tests;

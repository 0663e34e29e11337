//! Binary operators and expression-tree nodes.
//!
//! The expression tree is recovered from flat token runs by the builder
//! in `rev_parse`, using whitespace width instead of parentheses.

use crate::Token;

/// Binary operator.
///
/// The equality family is a four-tier ladder, strictest to fuzziest:
/// `====` (identity), `===` (structural), `==` (loose), `=` (approximate).
/// Each of the multi-glyph tiers has a negated form spelled with a
/// leading `;`. There is no negated approximate comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Exp,
    /// `,` — argument/element separator; only valid at a call or list split
    Com,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `=` — approximate equality (tier 4)
    E,
    /// `==` — loose equality (tier 3)
    Ee,
    /// `===` — structural equality (tier 2)
    Eee,
    /// `====` — identity equality (tier 1)
    Eeee,
    /// `;==` — negated loose equality
    Ne,
    /// `;===` — negated structural equality
    Nee,
    /// `;====` — negated identity equality
    Neee,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Operator {
    /// Map an operator token spelling to its [`Operator`], if any.
    pub fn from_spelling(text: &str) -> Option<Operator> {
        Some(match text {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mul,
            "/" => Operator::Div,
            "^" => Operator::Exp,
            "," => Operator::Com,
            "&&" => Operator::And,
            "||" => Operator::Or,
            "=" => Operator::E,
            "==" => Operator::Ee,
            "===" => Operator::Eee,
            "====" => Operator::Eeee,
            ";==" => Operator::Ne,
            ";===" => Operator::Nee,
            ";====" => Operator::Neee,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            _ => return None,
        })
    }

    /// Canonical spelling.
    pub fn spelling(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Exp => "^",
            Operator::Com => ",",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::E => "=",
            Operator::Ee => "==",
            Operator::Eee => "===",
            Operator::Eeee => "====",
            Operator::Ne => ";==",
            Operator::Nee => ";===",
            Operator::Neee => ";====",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        }
    }
}

/// A node of the recovered expression tree.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprTree {
    /// Literal or bare identifier token.
    Value(Token),
    /// Binary operation. `op_token` is kept for diagnostics.
    Expression {
        left: Box<ExprTree>,
        right: Box<ExprTree>,
        op: Operator,
        op_token: Token,
    },
    /// Function call: callee name token plus ordered argument subtrees.
    Function { name: Token, args: Vec<ExprTree> },
    /// List literal.
    List(Vec<ExprTree>),
    /// Index access: `base[index]`.
    Index {
        base: Box<ExprTree>,
        index: Box<ExprTree>,
    },
}

impl ExprTree {
    /// A representative token for diagnostics against this subtree.
    ///
    /// `None` only for an empty list node, which the builder never
    /// produces.
    pub fn head_token(&self) -> Option<&Token> {
        match self {
            ExprTree::Value(tok) => Some(tok),
            ExprTree::Expression { op_token, .. } => Some(op_token),
            ExprTree::Function { name, .. } => Some(name),
            ExprTree::List(values) => values.first().and_then(ExprTree::head_token),
            ExprTree::Index { base, .. } => base.head_token(),
        }
    }
}

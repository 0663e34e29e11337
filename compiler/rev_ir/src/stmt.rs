//! Candidate statements: the statement grammar's output interface.
//!
//! The grammar cannot decide what a statement means — that depends on
//! which keyword sentinels its identifiers are bound to *at runtime* —
//! so it emits, per source statement, an ordered tuple of every
//! syntactically possible interpretation. The evaluator's statement
//! resolver picks exactly one against the live scope stack.
//!
//! Keyword slots are carried as the literal identifier [`Token`]s used
//! in source; the resolver looks each one up and accepts a candidate
//! only if every slot resolves to a keyword sentinel with the expected
//! spelling.

use smallvec::SmallVec;

use crate::{ExprTree, Token};

/// An unparsed (or, for re-parked watcher statements, pre-substituted)
/// expression slot.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprSlot {
    /// Flat token run, including explicit whitespace tokens.
    Tokens(Vec<Token>),
    /// Already-built tree. Produced when a parked statement had its
    /// `next` sub-expressions substituted before being re-queued.
    Tree(ExprTree),
}

/// Ordered tuple of candidate interpretations for one source statement.
#[derive(Clone, PartialEq, Debug)]
pub struct Candidates(pub SmallVec<[Stmt; 2]>);

impl Candidates {
    /// Wrap a single unambiguous interpretation.
    pub fn single(stmt: Stmt) -> Self {
        Candidates(SmallVec::from_iter([stmt]))
    }

    /// Candidate interpretations, in grammar order.
    pub fn iter(&self) -> impl Iterator<Item = &Stmt> {
        self.0.iter()
    }
}

/// An ordered statement list (a function body, class body, or program).
pub type Body = Vec<Candidates>;

/// One candidate statement interpretation.
#[derive(Clone, PartialEq, Debug)]
pub enum Stmt {
    Conditional(Conditional),
    When(WhenStatement),
    After(AfterStatement),
    ClassDeclaration(ClassDeclaration),
    Return(ReturnStatement),
    Delete(DeleteStatement),
    FunctionDefinition(FunctionDefinition),
    VariableDeclaration(VariableDeclaration),
    VariableAssignment(VariableAssignment),
    Expression(ExpressionStatement),
}

impl Stmt {
    /// A representative token for diagnostics against this statement.
    pub fn head_token(&self) -> &Token {
        match self {
            Stmt::Conditional(s) => &s.keyword,
            Stmt::When(s) => &s.keyword,
            Stmt::After(s) => &s.keyword,
            Stmt::ClassDeclaration(s) => &s.keyword,
            Stmt::Return(s) => &s.keyword,
            Stmt::Delete(s) => &s.keyword,
            Stmt::FunctionDefinition(s) => &s.keywords[0],
            Stmt::VariableDeclaration(s) => &s.name,
            Stmt::VariableAssignment(s) => &s.name,
            Stmt::Expression(s) => &s.token,
        }
    }
}

/// `if <cond> { body } [else { body }]` — keyword slot must resolve to `if`.
#[derive(Clone, PartialEq, Debug)]
pub struct Conditional {
    pub keyword: Token,
    pub condition: ExprSlot,
    pub body: Body,
    pub else_body: Option<Body>,
}

/// `when <name> <cond> { body }` — persistent watcher; keyword slot `when`.
#[derive(Clone, PartialEq, Debug)]
pub struct WhenStatement {
    pub keyword: Token,
    /// The variable whose revisions trigger re-evaluation.
    pub watched: Token,
    pub condition: ExprSlot,
    pub body: Body,
}

/// `after <name> { body }` — one-shot watcher; keyword slot `after`.
#[derive(Clone, PartialEq, Debug)]
pub struct AfterStatement {
    pub keyword: Token,
    pub watched: Token,
    pub body: Body,
}

/// `class Name { body }` — keyword slot `class` or `className`.
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDeclaration {
    pub keyword: Token,
    pub name: Token,
    pub body: Body,
}

/// `return <expr>` — keyword slot `return`.
#[derive(Clone, PartialEq, Debug)]
pub struct ReturnStatement {
    pub keyword: Token,
    pub expression: ExprSlot,
}

/// `delete <name>` — keyword slot `delete`.
#[derive(Clone, PartialEq, Debug)]
pub struct DeleteStatement {
    pub keyword: Token,
    pub target: Token,
}

/// Function definition.
///
/// One keyword slot matching a flexible spelling of `function`, or two
/// where the second must resolve to `async` (which makes the function
/// asynchronous).
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDefinition {
    pub keywords: SmallVec<[Token; 2]>,
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Body,
}

impl FunctionDefinition {
    /// Async iff declared with the two-keyword form.
    pub fn is_async(&self) -> bool {
        self.keywords.len() == 2
    }
}

/// Variable declaration.
///
/// Two modifier slots each resolving to `const` or `var` (the first
/// decides reassignability), or three slots all resolving to `const`
/// (an outermost-scope constant).
#[derive(Clone, PartialEq, Debug)]
pub struct VariableDeclaration {
    pub modifiers: SmallVec<[Token; 3]>,
    pub name: Token,
    pub expression: ExprSlot,
}

/// Reassignment of an existing binding.
#[derive(Clone, PartialEq, Debug)]
pub struct VariableAssignment {
    pub name: Token,
    pub expression: ExprSlot,
}

/// Bare expression statement.
#[derive(Clone, PartialEq, Debug)]
pub struct ExpressionStatement {
    /// A representative token for diagnostics.
    pub token: Token,
    pub expression: ExprSlot,
}

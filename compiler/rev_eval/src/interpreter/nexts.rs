//! Temporal `next` scanning and the watcher registry.
//!
//! Before a statement's expression evaluates, every `next x` and
//! `await next x` sub-expression is stripped out and replaced by a bare
//! `x` leaf; the surrounding statement then either parks until the
//! watched variables gain a revision (`next`) or polls the async queue
//! until one does (`await next`). When the statement finally runs, each
//! stripped name resolves to the *first revision after the watch
//! began*, bound in a scope pushed over the captured stack.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use rev_ir::{Body, ExprTree, Stmt, Token};

use crate::environment::{ScopeHandle, ScopeStack};
use crate::errors::{next_needs_name, undefined_name, EvalError};
use crate::value::Value;

/// Names stripped from an expression, split by how they wait.
#[derive(Default, Debug)]
pub struct NextTargets {
    /// `next x`: park the statement.
    pub plain: Vec<Token>,
    /// `await next x`: poll the async queue in place.
    pub awaited: Vec<Token>,
}

impl NextTargets {
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.awaited.is_empty()
    }
}

/// Replace `next`/`await next` calls with their target name leaves.
///
/// `next` and `await` are recognized through the live bindings, so a
/// rebound `next` stops being temporal.
pub fn strip_next(
    expr: &ExprTree,
    scopes: &ScopeStack,
) -> Result<(ExprTree, NextTargets), EvalError> {
    let mut targets = NextTargets::default();
    let stripped = strip(expr, scopes, &mut targets)?;
    Ok((stripped, targets))
}

fn strip(
    expr: &ExprTree,
    scopes: &ScopeStack,
    targets: &mut NextTargets,
) -> Result<ExprTree, EvalError> {
    match expr {
        ExprTree::Value(_) => Ok(expr.clone()),
        ExprTree::Expression {
            left,
            right,
            op,
            op_token,
        } => Ok(ExprTree::Expression {
            left: Box::new(strip(left, scopes, targets)?),
            right: Box::new(strip(right, scopes, targets)?),
            op: *op,
            op_token: op_token.clone(),
        }),
        ExprTree::List(elements) => {
            let stripped = elements
                .iter()
                .map(|e| strip(e, scopes, targets))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ExprTree::List(stripped))
        }
        ExprTree::Index { base, index } => Ok(ExprTree::Index {
            base: Box::new(strip(base, scopes, targets)?),
            index: Box::new(strip(index, scopes, targets)?),
        }),
        ExprTree::Function { name, args } => {
            match keyword_of(scopes, name) {
                Some(kw) if kw == "next" => {
                    let target = next_target(args, name)?;
                    targets.plain.push(target.clone());
                    Ok(ExprTree::Value(target))
                }
                Some(kw) if kw == "await" => {
                    // Only `await next x` is temporal; any other await
                    // stays in place for the call evaluator.
                    if let [ExprTree::Function {
                        name: inner,
                        args: inner_args,
                    }] = args.as_slice()
                    {
                        if keyword_of(scopes, inner).as_deref() == Some("next") {
                            let target = next_target(inner_args, inner)?;
                            targets.awaited.push(target.clone());
                            return Ok(ExprTree::Value(target));
                        }
                    }
                    strip_args(name, args, scopes, targets)
                }
                _ => strip_args(name, args, scopes, targets),
            }
        }
    }
}

fn strip_args(
    name: &Token,
    args: &[ExprTree],
    scopes: &ScopeStack,
    targets: &mut NextTargets,
) -> Result<ExprTree, EvalError> {
    let stripped = args
        .iter()
        .map(|a| strip(a, scopes, targets))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ExprTree::Function {
        name: name.clone(),
        args: stripped,
    })
}

fn next_target(args: &[ExprTree], keyword: &Token) -> Result<Token, EvalError> {
    match args {
        [ExprTree::Value(token)] if token.kind == rev_ir::TokenKind::Name => Ok(token.clone()),
        _ => Err(next_needs_name(keyword.span)),
    }
}

fn keyword_of(scopes: &ScopeStack, name: &Token) -> Option<String> {
    match scopes.read(&name.text) {
        Some(Value::Keyword(spelling)) => Some(spelling.to_string()),
        _ => None,
    }
}

/// A statement waiting for one or more `next` targets to gain a
/// revision.
#[derive(Debug)]
pub struct ParkedStatement {
    /// The statement with its expression slot already substituted.
    pub stmt: Stmt,
    /// Still-pending names, each with the revision count at watch time.
    pub pending: FxHashMap<String, usize>,
    /// Names already resolved to their historical values.
    pub resolved: FxHashMap<String, Value>,
    /// The captured scope stack.
    pub handles: Vec<ScopeHandle>,
}

/// One registered watcher on a variable name.
pub enum Watcher {
    /// A parked `next` statement; shared across all its pending names.
    Park(Rc<RefCell<ParkedStatement>>),
    /// A persistent `when` body, re-evaluated on every revision.
    When {
        condition: ExprTree,
        body: Body,
        handles: Vec<ScopeHandle>,
    },
    /// A one-shot `after` body.
    After { body: Body, handles: Vec<ScopeHandle> },
}

/// Watchers keyed by the variable name that wakes them.
#[derive(Default)]
pub struct WatcherRegistry {
    by_name: FxHashMap<String, Vec<Watcher>>,
}

impl WatcherRegistry {
    pub fn register(&mut self, name: &str, watcher: Watcher) {
        self.by_name.entry(name.to_string()).or_default().push(watcher);
    }

    /// Take every watcher on a name; the caller re-registers survivors.
    pub fn take(&mut self, name: &str) -> Vec<Watcher> {
        self.by_name.remove(name).unwrap_or_default()
    }

    pub fn put_back(&mut self, name: &str, watchers: Vec<Watcher>) {
        if !watchers.is_empty() {
            self.by_name
                .entry(name.to_string())
                .or_default()
                .extend(watchers);
        }
    }
}

/// Park a statement on its pending names and register it.
pub fn park(
    registry: &mut WatcherRegistry,
    stmt: Stmt,
    pending: FxHashMap<String, usize>,
    resolved: FxHashMap<String, Value>,
    handles: Vec<ScopeHandle>,
) {
    let parked = Rc::new(RefCell::new(ParkedStatement {
        stmt,
        pending,
        resolved,
        handles,
    }));
    let names: Vec<String> = parked.borrow().pending.keys().cloned().collect();
    for name in names {
        registry.register(&name, Watcher::Park(Rc::clone(&parked)));
    }
}

/// Fatal lookup for a watch target that does not exist.
pub fn missing_target(token: &Token) -> EvalError {
    undefined_name(&token.text, token.span)
}

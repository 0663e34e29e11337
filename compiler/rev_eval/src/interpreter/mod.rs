//! Statement execution, function invocation, and the cooperative
//! scheduler.
//!
//! Execution is single-threaded and cooperative. Async function calls
//! enqueue their bodies instead of running them; after every top-level
//! statement, each queued body advances by exactly one statement, in
//! the order the calls were made. Statements are disambiguated against
//! the live keyword bindings immediately before they execute.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info, trace};

use rev_ir::{
    Body, Candidates, ExprSlot, ExprTree, Span, Stmt, Token, TokenKind,
};
use rev_parse::build_expression_tree;
use rustc_hash::FxHashMap;

use crate::builtins::{install_keywords, install_natives};
use crate::coin::{CoinFlip, RandomCoin};
use crate::environment::{Binding, Scope, ScopeHandle, ScopeStack, TargetKind};
use crate::errors::{
    await_needs_call, cannot_index, cannot_reassign, class_body_statement, delete_undefined,
    index_out_of_bounds, native_failure, next_deadlock, non_integer_index, not_callable,
    reserved_parameter, too_many_arguments, undefined_name, EvalError, EvalResult,
};
use crate::operators::evaluate_binary;
use crate::print_handler::PrintHandler;
use crate::resolver::resolve_statement;
use crate::value::{FunctionValue, NativeFn, ObjectValue, Trilean, Value, OBJECT_EQUALITY_RATIO};

mod nexts;

use nexts::{park, strip_next, NextTargets, ParkedStatement, Watcher, WatcherRegistry};

/// How a statement ended.
enum Flow {
    Normal,
    Return(Value),
}

/// One queued async body.
struct AsyncTask {
    body: VecDeque<Candidates>,
    handles: Vec<ScopeHandle>,
}

/// Configures and builds an [`Interpreter`].
pub struct InterpreterBuilder {
    printer: PrintHandler,
    coin: Box<dyn CoinFlip>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            printer: PrintHandler::Stdout,
            coin: Box::new(RandomCoin),
        }
    }

    pub fn printer(mut self, printer: PrintHandler) -> Self {
        self.printer = printer;
        self
    }

    pub fn coin(mut self, coin: impl CoinFlip + 'static) -> Self {
        self.coin = Box::new(coin);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            printer: self.printer,
            coin: self.coin,
            watchers: WatcherRegistry::default(),
            tasks: Vec::new(),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        InterpreterBuilder::new()
    }
}

/// The tree-walking evaluator.
pub struct Interpreter {
    printer: PrintHandler,
    coin: Box<dyn CoinFlip>,
    watchers: WatcherRegistry,
    tasks: Vec<AsyncTask>,
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run a whole program in a fresh global scope.
    ///
    /// Keywords and natives are bound first, as ordinary bindings the
    /// program is free to shadow. Async bodies still queued when the
    /// last statement finishes are driven to completion.
    pub fn run(&mut self, program: &Body) -> Result<(), EvalError> {
        info!(statements = program.len(), "interpreting program");
        let mut scopes = ScopeStack::new();
        install_keywords(&scopes);
        install_natives(&scopes, &self.printer);
        self.run_block(program, &mut scopes, true)?;
        while !self.tasks.is_empty() {
            self.run_async_round()?;
        }
        Ok(())
    }

    fn run_block(
        &mut self,
        body: &Body,
        scopes: &mut ScopeStack,
        top_level: bool,
    ) -> Result<Flow, EvalError> {
        for candidates in body {
            let stmt = resolve_statement(candidates, scopes)?.clone();
            let flow = self.execute(&stmt, scopes)?;
            if let Flow::Return(value) = flow {
                return Ok(Flow::Return(value));
            }
            if top_level {
                self.run_async_round()?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Run a body in its own pushed scope.
    fn run_body_scoped(&mut self, body: &Body, scopes: &mut ScopeStack) -> Result<Flow, EvalError> {
        scopes.push_scope();
        let flow = self.run_block(body, scopes, false);
        scopes.pop_scope();
        flow
    }

    fn execute(&mut self, stmt: &Stmt, scopes: &mut ScopeStack) -> Result<Flow, EvalError> {
        trace!(at = ?stmt.head_token().span, "executing statement");
        match stmt {
            Stmt::Expression(s) => {
                self.eval_slot(&s.expression, stmt, scopes)?;
                Ok(Flow::Normal)
            }
            Stmt::Return(s) => match self.eval_slot(&s.expression, stmt, scopes)? {
                Some(value) => Ok(Flow::Return(value)),
                None => Ok(Flow::Normal),
            },
            Stmt::VariableDeclaration(s) => {
                let Some(value) = self.eval_slot(&s.expression, stmt, scopes)? else {
                    return Ok(Flow::Normal);
                };
                let binding = if self.modifier_is_var(&s.modifiers[0], scopes) {
                    Binding::variable(value)
                } else {
                    Binding::name(value)
                };
                if s.modifiers.len() == 3 {
                    scopes.declare_outermost(&s.name.text, binding);
                } else {
                    scopes.declare(&s.name.text, binding);
                }
                Ok(Flow::Normal)
            }
            Stmt::VariableAssignment(s) => {
                let Some(value) = self.eval_slot(&s.expression, stmt, scopes)? else {
                    return Ok(Flow::Normal);
                };
                match scopes.assign(&s.name.text, value) {
                    Ok(revisions) => {
                        debug!(name = %s.name.text, revisions, "assigned");
                        self.fire_watchers(&s.name.text)?;
                        Ok(Flow::Normal)
                    }
                    Err(crate::environment::AssignError::Immutable) => {
                        Err(cannot_reassign(&s.name.text, s.name.span))
                    }
                    Err(crate::environment::AssignError::Undefined) => {
                        Err(undefined_name(&s.name.text, s.name.span))
                    }
                }
            }
            Stmt::Conditional(s) => {
                let Some(condition) = self.eval_slot(&s.condition, stmt, scopes)? else {
                    return Ok(Flow::Normal);
                };
                if self.branch(&condition) {
                    self.run_body_scoped(&s.body, scopes)
                } else if let Some(else_body) = &s.else_body {
                    self.run_body_scoped(else_body, scopes)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::When(s) => {
                let condition = build_slot(&s.condition)?;
                self.watchers.register(
                    &s.watched.text,
                    Watcher::When {
                        condition,
                        body: s.body.clone(),
                        handles: scopes.snapshot(),
                    },
                );
                debug!(watched = %s.watched.text, "when watcher registered");
                Ok(Flow::Normal)
            }
            Stmt::After(s) => {
                self.watchers.register(
                    &s.watched.text,
                    Watcher::After {
                        body: s.body.clone(),
                        handles: scopes.snapshot(),
                    },
                );
                debug!(watched = %s.watched.text, "after watcher registered");
                Ok(Flow::Normal)
            }
            Stmt::Delete(s) => {
                if scopes.delete(&s.target.text) {
                    Ok(Flow::Normal)
                } else {
                    Err(delete_undefined(&s.target.text, s.target.span))
                }
            }
            Stmt::FunctionDefinition(s) => {
                let function = FunctionValue {
                    params: s.params.iter().map(|p| p.text.clone()).collect(),
                    body: s.body.clone(),
                    is_async: s.is_async(),
                };
                scopes.declare(&s.name.text, Binding::name(Value::Function(Rc::new(function))));
                Ok(Flow::Normal)
            }
            Stmt::ClassDeclaration(s) => self.declare_class(s, scopes),
        }
    }

    /// Whether a declaration's leading modifier resolves to `var`.
    fn modifier_is_var(&self, modifier: &Token, scopes: &ScopeStack) -> bool {
        matches!(
            scopes.read(&modifier.text),
            Some(Value::Keyword(spelling)) if &*spelling == "var"
        )
    }

    /// Evaluate a statement's expression slot, honoring `next`.
    ///
    /// Returns `None` when the statement parked; it will re-execute,
    /// with the watched names substituted, once every pending target
    /// has gained a revision.
    fn eval_slot(
        &mut self,
        slot: &ExprSlot,
        owner: &Stmt,
        scopes: &mut ScopeStack,
    ) -> Result<Option<Value>, EvalError> {
        let tree = build_slot(slot)?;
        let (tree, targets) = strip_next(&tree, scopes)?;
        if targets.is_empty() {
            return self.evaluate(&tree, scopes).map(Some);
        }
        self.eval_with_targets(tree, targets, owner, scopes)
    }

    fn eval_with_targets(
        &mut self,
        tree: ExprTree,
        targets: NextTargets,
        owner: &Stmt,
        scopes: &mut ScopeStack,
    ) -> Result<Option<Value>, EvalError> {
        let mut resolved: FxHashMap<String, Value> = FxHashMap::default();

        // Plain `next` revision counts are observed now, before any
        // awaiting; immutable names can never gain a revision and
        // resolve to their current value.
        let mut watched: Vec<(String, usize)> = Vec::with_capacity(targets.plain.len());
        for token in &targets.plain {
            match scopes.target(&token.text) {
                None => return Err(nexts::missing_target(token)),
                Some(TargetKind::Immutable) => {
                    let value = scopes
                        .read(&token.text)
                        .ok_or_else(|| nexts::missing_target(token))?;
                    resolved.insert(token.text.clone(), value);
                }
                Some(TargetKind::Variable { revisions }) => {
                    watched.push((token.text.clone(), revisions));
                }
            }
        }

        // `await next` targets block here, advancing the queue until
        // each gains a revision.
        for token in &targets.awaited {
            let value = self.await_revision(token, scopes)?;
            resolved.insert(token.text.clone(), value);
        }

        // A watched target that advanced while the awaits polled
        // resolves immediately from its watch-time snapshot; only the
        // rest park the statement.
        let mut pending: FxHashMap<String, usize> = FxHashMap::default();
        for (name, start) in watched {
            match scopes.target(&name) {
                Some(TargetKind::Variable { revisions }) if revisions > start => {
                    let value = scopes
                        .revision_value(&name, start)
                        .unwrap_or(Value::Undefined);
                    resolved.insert(name, value);
                }
                _ => {
                    pending.insert(name, start);
                }
            }
        }

        if !pending.is_empty() {
            debug!(pending = pending.len(), "statement parked on next");
            let substituted = with_expression(owner, tree);
            park(
                &mut self.watchers,
                substituted,
                pending,
                resolved,
                scopes.snapshot(),
            );
            return Ok(None);
        }

        if resolved.is_empty() {
            self.evaluate(&tree, scopes).map(Some)
        } else {
            scopes.push_scope();
            for (name, value) in resolved {
                scopes.declare(&name, Binding::name(value));
            }
            let result = self.evaluate(&tree, scopes);
            scopes.pop_scope();
            result.map(Some)
        }
    }

    /// Poll the async queue until a variable gains a revision, then
    /// return that first new value.
    fn await_revision(&mut self, token: &Token, scopes: &ScopeStack) -> EvalResult {
        let start = match scopes.target(&token.text) {
            None => return Err(nexts::missing_target(token)),
            Some(TargetKind::Immutable) => {
                return Err(next_deadlock(&token.text, token.span));
            }
            Some(TargetKind::Variable { revisions }) => revisions,
        };
        loop {
            match scopes.target(&token.text) {
                Some(TargetKind::Variable { revisions }) if revisions > start => break,
                _ => {}
            }
            if self.tasks.is_empty() {
                return Err(next_deadlock(&token.text, token.span));
            }
            self.run_async_round()?;
        }
        scopes
            .revision_value(&token.text, start)
            .ok_or_else(|| nexts::missing_target(token))
    }

    /// Advance every queued async body by one statement.
    ///
    /// The task being stepped is taken out of the queue for the
    /// duration, so a nested round started by an `await next` inside it
    /// only ever advances the *other* tasks.
    fn run_async_round(&mut self) -> Result<(), EvalError> {
        let budget = self.tasks.len();
        let mut idx = 0;
        for _ in 0..budget {
            if idx >= self.tasks.len() {
                break;
            }
            let mut task = self.tasks.remove(idx);
            if let Some(candidates) = task.body.pop_front() {
                let mut scopes = ScopeStack::from_handles(task.handles.clone());
                let stmt = resolve_statement(&candidates, &scopes)?.clone();
                let flow = self.execute(&stmt, &mut scopes)?;
                if matches!(flow, Flow::Return(_)) {
                    task.body.clear();
                }
            }
            if task.body.is_empty() {
                trace!("async task finished");
                continue;
            }
            let slot = idx.min(self.tasks.len());
            self.tasks.insert(slot, task);
            idx = slot + 1;
        }
        Ok(())
    }

    /// Wake the watchers of a just-assigned name.
    fn fire_watchers(&mut self, name: &str) -> Result<(), EvalError> {
        let watchers = self.watchers.take(name);
        if watchers.is_empty() {
            return Ok(());
        }
        let mut keep = Vec::new();
        for watcher in watchers {
            match watcher {
                Watcher::Park(parked) => {
                    let ready = {
                        let mut p = parked.borrow_mut();
                        if let Some(revision) = p.pending.remove(name) {
                            let captured = ScopeStack::from_handles(p.handles.clone());
                            let value = captured
                                .revision_value(name, revision)
                                .unwrap_or(Value::Undefined);
                            p.resolved.insert(name.to_string(), value);
                        }
                        p.pending.is_empty()
                    };
                    if ready {
                        self.run_parked(&parked)?;
                    }
                }
                Watcher::When {
                    condition,
                    body,
                    handles,
                } => {
                    let mut scopes = ScopeStack::from_handles(handles.clone());
                    let value = self.evaluate(&condition, &mut scopes)?;
                    if self.branch(&value) {
                        self.run_body_scoped(&body, &mut scopes)?;
                    }
                    keep.push(Watcher::When {
                        condition,
                        body,
                        handles,
                    });
                }
                Watcher::After { body, handles } => {
                    let mut scopes = ScopeStack::from_handles(handles);
                    self.run_body_scoped(&body, &mut scopes)?;
                }
            }
        }
        self.watchers.put_back(name, keep);
        Ok(())
    }

    /// Re-execute a fully resolved parked statement over its captured
    /// stack, with the resolved names bound in a fresh scope.
    fn run_parked(&mut self, parked: &Rc<RefCell<ParkedStatement>>) -> Result<(), EvalError> {
        let (stmt, resolved, handles) = {
            let p = parked.borrow();
            (p.stmt.clone(), p.resolved.clone(), p.handles.clone())
        };
        debug!("parked statement resumed");
        let mut scopes = ScopeStack::from_handles(handles);
        scopes.push_scope();
        for (name, value) in resolved {
            scopes.declare(&name, Binding::name(value));
        }
        self.execute(&stmt, &mut scopes)?;
        Ok(())
    }

    fn declare_class(
        &mut self,
        decl: &rev_ir::ClassDeclaration,
        scopes: &mut ScopeStack,
    ) -> Result<Flow, EvalError> {
        let template = ScopeHandle::new();
        for candidates in &decl.body {
            let stmt = resolve_statement(candidates, scopes)?.clone();
            match &stmt {
                Stmt::FunctionDefinition(f) => {
                    if let Some(param) = f.params.iter().find(|p| p.text == "this") {
                        return Err(reserved_parameter("this", param.span));
                    }
                    let mut params = vec!["this".to_string()];
                    params.extend(f.params.iter().map(|p| p.text.clone()));
                    let method = FunctionValue {
                        params,
                        body: f.body.clone(),
                        is_async: f.is_async(),
                    };
                    template.borrow_mut().insert(
                        f.name.text.clone(),
                        Binding::name(Value::Function(Rc::new(method))),
                    );
                }
                Stmt::VariableDeclaration(d) => {
                    let tree = build_slot(&d.expression)?;
                    let value = self.evaluate(&tree, scopes)?;
                    let binding = if self.modifier_is_var(&d.modifiers[0], scopes) {
                        Binding::variable(value)
                    } else {
                        Binding::name(value)
                    };
                    template.borrow_mut().insert(d.name.text.clone(), binding);
                }
                other => return Err(class_body_statement(other.head_token().span)),
            }
        }

        // The class binds to its constructor: a native that stamps out
        // the one permitted instance from the template namespace.
        let class_name = decl.name.text.clone();
        let instantiated = Cell::new(false);
        let ctor_name = class_name.clone();
        let constructor = NativeFn {
            name: class_name.clone(),
            arity: 0,
            call: Box::new(move |_args| {
                if instantiated.get() {
                    return Err(format!("class {ctor_name} can only be instantiated once"));
                }
                instantiated.set(true);
                let fields: Scope = template
                    .borrow()
                    .iter()
                    .map(|(name, binding)| (name.clone(), binding.deep_copy()))
                    .collect();
                Ok(Value::Object(Rc::new(ObjectValue {
                    class_name: ctor_name.clone(),
                    namespace: ScopeHandle::from_scope(fields),
                    equality_ratio: OBJECT_EQUALITY_RATIO,
                })))
            }),
        };
        scopes.declare(&class_name, Binding::name(Value::Builtin(Rc::new(constructor))));
        debug!(class = %decl.name.text, "class declared");
        Ok(Flow::Normal)
    }

    /// Evaluate an expression tree.
    fn evaluate(&mut self, expr: &ExprTree, scopes: &mut ScopeStack) -> EvalResult {
        match expr {
            ExprTree::Value(token) => Ok(self.evaluate_value(token, scopes)),
            ExprTree::List(elements) => {
                let values = elements
                    .iter()
                    .map(|e| self.evaluate(e, scopes))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }
            ExprTree::Expression {
                left,
                right,
                op,
                op_token,
            } => {
                let l = self.evaluate(left, scopes)?;
                let r = self.evaluate(right, scopes)?;
                evaluate_binary(l, r, *op, op_token.span, self.coin.as_mut())
            }
            ExprTree::Index { base, index } => {
                let base_value = self.evaluate(base, scopes)?;
                let index_value = self.evaluate(index, scopes)?;
                index_into(&base_value, &index_value, span_of(index))
            }
            ExprTree::Function { name, args } => self.evaluate_call(name, args, scopes, false),
        }
    }

    /// A leaf: a literal, a bound name, or — for unbound names — the
    /// name itself read as a string (or number, if it looks like one).
    fn evaluate_value(&self, token: &Token, scopes: &ScopeStack) -> Value {
        match token.kind {
            TokenKind::Str => Value::string(token.text.clone()),
            TokenKind::Name => match scopes.read(&token.text) {
                Some(value) => value,
                None => literal_from_text(&token.text),
            },
            _ => literal_from_text(&token.text),
        }
    }

    fn evaluate_call(
        &mut self,
        name: &Token,
        args: &[ExprTree],
        scopes: &mut ScopeStack,
        forced_sync: bool,
    ) -> EvalResult {
        let callee = scopes
            .read(&name.text)
            .ok_or_else(|| undefined_name(&name.text, name.span))?;
        match callee {
            Value::Keyword(kw) if &*kw == "await" => {
                // `await f args` forces a synchronous call of f.
                match args {
                    [ExprTree::Function {
                        name: inner,
                        args: inner_args,
                    }] => self.evaluate_call(inner, inner_args, scopes, true),
                    _ => Err(await_needs_call(name.span)),
                }
            }
            Value::Builtin(native) => {
                let values = self.eval_args(args, scopes)?;
                if values.len() > native.arity {
                    return Err(too_many_arguments(
                        &native.name,
                        native.arity,
                        values.len(),
                        name.span,
                    ));
                }
                (native.call)(&values).map_err(|message| native_failure(&message, name.span))
            }
            Value::Function(function) => {
                let values = self.eval_args(args, scopes)?;
                if values.len() > function.params.len() {
                    return Err(too_many_arguments(
                        &name.text,
                        function.params.len(),
                        values.len(),
                        name.span,
                    ));
                }
                if function.is_async && !forced_sync {
                    self.spawn_async(&function, values, scopes);
                    Ok(Value::Undefined)
                } else {
                    scopes.push_scope();
                    // Under-application binds only the supplied prefix.
                    for (param, value) in function.params.iter().zip(values) {
                        scopes.declare(param, Binding::name(value));
                    }
                    let flow = self.run_block(&function.body, scopes, false);
                    scopes.pop_scope();
                    match flow? {
                        Flow::Return(value) => Ok(value),
                        Flow::Normal => Ok(Value::Undefined),
                    }
                }
            }
            other => Err(not_callable(&other, name.span)),
        }
    }

    fn eval_args(&mut self, args: &[ExprTree], scopes: &mut ScopeStack) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|a| self.evaluate(a, scopes)).collect()
    }

    /// Queue an async body with a snapshot of the current stack plus a
    /// scope holding its arguments.
    fn spawn_async(&mut self, function: &FunctionValue, values: Vec<Value>, scopes: &ScopeStack) {
        let params = ScopeHandle::new();
        for (param, value) in function.params.iter().zip(values) {
            params
                .borrow_mut()
                .insert(param.clone(), Binding::name(value));
        }
        let mut handles = scopes.snapshot();
        handles.push(params);
        debug!(statements = function.body.len(), "async body queued");
        self.tasks.push(AsyncTask {
            body: function.body.iter().cloned().collect(),
            handles,
        });
    }

    /// Resolve a condition to a branch choice; `maybe` flips a coin.
    fn branch(&mut self, value: &Value) -> bool {
        match value.to_trilean() {
            Trilean::True => true,
            Trilean::False => false,
            Trilean::Maybe => self.coin.flip(),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Build a slot's expression tree, if it is not already one.
fn build_slot(slot: &ExprSlot) -> Result<ExprTree, EvalError> {
    match slot {
        ExprSlot::Tree(tree) => Ok(tree.clone()),
        ExprSlot::Tokens(tokens) => {
            build_expression_tree(tokens).map_err(|e| EvalError::new(e.message.clone(), e.span()))
        }
    }
}

/// A copy of a statement with its expression slot replaced.
fn with_expression(stmt: &Stmt, tree: ExprTree) -> Stmt {
    let slot = ExprSlot::Tree(tree);
    match stmt.clone() {
        Stmt::Return(mut s) => {
            s.expression = slot;
            Stmt::Return(s)
        }
        Stmt::VariableDeclaration(mut s) => {
            s.expression = slot;
            Stmt::VariableDeclaration(s)
        }
        Stmt::VariableAssignment(mut s) => {
            s.expression = slot;
            Stmt::VariableAssignment(s)
        }
        Stmt::Expression(mut s) => {
            s.expression = slot;
            Stmt::Expression(s)
        }
        Stmt::Conditional(mut s) => {
            s.condition = slot;
            Stmt::Conditional(s)
        }
        Stmt::When(mut s) => {
            s.condition = slot;
            Stmt::When(s)
        }
        other => other,
    }
}

fn span_of(expr: &ExprTree) -> Span {
    expr.head_token().map_or(Span::DUMMY, |t| t.span)
}

fn index_into(base: &Value, index: &Value, span: Span) -> EvalResult {
    match base {
        Value::List(values) => {
            let position = list_position(index, values.len(), span)?;
            Ok(values[position].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let position = list_position(index, chars.len(), span)?;
            Ok(Value::string(chars[position].to_string()))
        }
        // Absent map keys read as undefined.
        Value::Map(entries) => Ok(entries
            .get(&index.to_text())
            .cloned()
            .unwrap_or(Value::Undefined)),
        other => Err(cannot_index(other, span)),
    }
}

fn list_position(index: &Value, len: usize, span: Span) -> Result<usize, EvalError> {
    let n = index.to_number().ok_or_else(|| non_integer_index(span))?;
    if !Value::is_int(n) {
        return Err(non_integer_index(span));
    }
    let rounded = n.round();
    if rounded < 0.0 || rounded >= len as f64 {
        return Err(index_out_of_bounds(n, len, span));
    }
    Ok(rounded as usize)
}

/// An unbound name reads as itself: a number if it looks like one,
/// otherwise a string.
fn literal_from_text(text: &str) -> Value {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() <= 2
        && !parts.iter().any(|p| p.is_empty())
        && parts
            .iter()
            .all(|p| p.bytes().all(|b| b.is_ascii_digit()))
    {
        if let Ok(n) = text.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::string(text)
}

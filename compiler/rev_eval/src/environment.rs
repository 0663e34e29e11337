//! Scopes, bindings, and the scope stack.
//!
//! Scopes are reference-counted handles so that async bodies and parked
//! watcher statements can capture a snapshot of the stack and still see
//! later mutations to the scopes they share. Names hold one value
//! forever; variables keep their full assignment history (oldest first),
//! which is what the temporal `next` machinery watches.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// One lexical scope: name to binding.
pub type Scope = FxHashMap<String, Binding>;

/// A shared, mutable handle to one scope.
#[derive(Clone, Debug, Default)]
pub struct ScopeHandle(Rc<RefCell<Scope>>);

impl ScopeHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scope(scope: Scope) -> Self {
        ScopeHandle(Rc::new(RefCell::new(scope)))
    }

    pub fn borrow(&self) -> Ref<'_, Scope> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Scope> {
        self.0.borrow_mut()
    }
}

/// A named slot in a scope.
#[derive(Clone, PartialEq, Debug)]
pub enum Binding {
    /// Immutable: one value forever.
    Name(Value),
    /// Reassignable: the full value history, oldest first. The current
    /// value is the last entry; the revision count is the length.
    Variable { history: Vec<Value> },
}

impl Binding {
    pub fn name(value: Value) -> Binding {
        Binding::Name(value)
    }

    pub fn variable(initial: Value) -> Binding {
        Binding::Variable {
            history: vec![initial],
        }
    }

    /// The value a read observes right now.
    pub fn current(&self) -> &Value {
        match self {
            Binding::Name(value) => value,
            // A variable always has at least its initial value.
            Binding::Variable { history } => &history[history.len() - 1],
        }
    }

    pub fn deep_copy(&self) -> Binding {
        match self {
            Binding::Name(value) => Binding::Name(value.deep_copy()),
            Binding::Variable { history } => Binding::Variable {
                history: history.iter().map(Value::deep_copy).collect(),
            },
        }
    }
}

/// What a `next` watcher finds at its target path.
#[derive(Clone, PartialEq, Debug)]
pub enum TargetKind {
    /// An immutable name: it can never gain a revision.
    Immutable,
    /// A variable with this many revisions so far.
    Variable { revisions: usize },
}

/// Reasons an assignment can fail.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AssignError {
    Undefined,
    Immutable,
}

/// The live stack of scope handles, innermost last.
#[derive(Clone, Debug)]
pub struct ScopeStack {
    handles: Vec<ScopeHandle>,
}

impl ScopeStack {
    /// A stack with a single empty outermost scope.
    pub fn new() -> Self {
        ScopeStack {
            handles: vec![ScopeHandle::new()],
        }
    }

    /// Rebuild a stack from captured handles.
    pub fn from_handles(handles: Vec<ScopeHandle>) -> Self {
        ScopeStack { handles }
    }

    /// Capture the current handles for later replay.
    pub fn snapshot(&self) -> Vec<ScopeHandle> {
        self.handles.clone()
    }

    pub fn push_scope(&mut self) {
        self.handles.push(ScopeHandle::new());
    }

    pub fn push_handle(&mut self, handle: ScopeHandle) {
        self.handles.push(handle);
    }

    pub fn pop_scope(&mut self) {
        if self.handles.len() > 1 {
            self.handles.pop();
        }
    }

    /// Bind in the innermost scope, replacing any same-scope binding.
    pub fn declare(&self, name: &str, binding: Binding) {
        if let Some(handle) = self.handles.last() {
            handle.borrow_mut().insert(name.to_string(), binding);
        }
    }

    /// Bind in the outermost scope (global constants).
    pub fn declare_outermost(&self, name: &str, binding: Binding) {
        if let Some(handle) = self.handles.first() {
            handle.borrow_mut().insert(name.to_string(), binding);
        }
    }

    /// Read a dotted path; the caller receives a deep copy.
    pub fn read(&self, path: &str) -> Option<Value> {
        self.with_binding(path, |binding| binding.current().deep_copy())
    }

    /// What kind of binding a dotted path resolves to, if any.
    pub fn target(&self, path: &str) -> Option<TargetKind> {
        self.with_binding(path, |binding| match binding {
            Binding::Name(_) => TargetKind::Immutable,
            Binding::Variable { history } => TargetKind::Variable {
                revisions: history.len(),
            },
        })
    }

    /// The value a dotted path held at a given revision index.
    pub fn revision_value(&self, path: &str, revision: usize) -> Option<Value> {
        self.with_binding(path, |binding| match binding {
            Binding::Variable { history } => history.get(revision).map(Value::deep_copy),
            Binding::Name(_) => None,
        })
        .flatten()
    }

    /// Reassign the variable a dotted path resolves to. Returns the new
    /// revision count on success.
    pub fn assign(&self, path: &str, value: Value) -> Result<usize, AssignError> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return Err(AssignError::Undefined);
        };

        if segments.is_empty() {
            for handle in self.handles.iter().rev() {
                let mut scope = handle.borrow_mut();
                match scope.get_mut(last) {
                    Some(Binding::Variable { history }) => {
                        history.push(value);
                        return Ok(history.len());
                    }
                    Some(Binding::Name(_)) => return Err(AssignError::Immutable),
                    None => {}
                }
            }
            return Err(AssignError::Undefined);
        }

        let mut current = self.head_value(segments[0]).ok_or(AssignError::Undefined)?;
        for segment in &segments[1..] {
            let Value::Object(obj) = current else {
                return Err(AssignError::Undefined);
            };
            let next = obj
                .namespace
                .borrow()
                .get(*segment)
                .map(|binding| binding.current().clone())
                .ok_or(AssignError::Undefined)?;
            current = next;
        }
        let Value::Object(obj) = current else {
            return Err(AssignError::Undefined);
        };
        let mut namespace = obj.namespace.borrow_mut();
        match namespace.get_mut(last) {
            Some(Binding::Variable { history }) => {
                history.push(value);
                Ok(history.len())
            }
            Some(Binding::Name(_)) => Err(AssignError::Immutable),
            None => Err(AssignError::Undefined),
        }
    }

    /// Remove the innermost binding of this name.
    pub fn delete(&self, name: &str) -> bool {
        for handle in self.handles.iter().rev() {
            if handle.borrow_mut().remove(name).is_some() {
                return true;
            }
        }
        false
    }

    /// Run `f` against the binding a dotted path resolves to.
    ///
    /// The head segment searches the stack innermost-first; every later
    /// segment must step through an object's namespace.
    pub fn with_binding<R>(&self, path: &str, f: impl FnOnce(&Binding) -> R) -> Option<R> {
        let mut segments: Vec<&str> = path.split('.').collect();
        let last = segments.pop()?;

        if segments.is_empty() {
            for handle in self.handles.iter().rev() {
                let scope = handle.borrow();
                if let Some(binding) = scope.get(last) {
                    return Some(f(binding));
                }
            }
            return None;
        }

        let mut current = self.head_value(segments[0])?;
        for segment in &segments[1..] {
            let Value::Object(obj) = current else {
                return None;
            };
            let next = obj
                .namespace
                .borrow()
                .get(*segment)
                .map(|binding| binding.current().clone())?;
            current = next;
        }
        let Value::Object(obj) = current else {
            return None;
        };
        let namespace = obj.namespace.borrow();
        namespace.get(last).map(f)
    }

    fn head_value(&self, name: &str) -> Option<Value> {
        for handle in self.handles.iter().rev() {
            let scope = handle.borrow();
            if let Some(binding) = scope.get(name) {
                return Some(binding.current().clone());
            }
        }
        None
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::value::{ObjectValue, OBJECT_EQUALITY_RATIO};

    #[test]
    fn reads_hand_out_copies() {
        let scopes = ScopeStack::new();
        scopes.declare("xs", Binding::name(Value::list(vec![Value::Number(1.0)])));
        let first = scopes.read("xs").unwrap();
        let second = scopes.read("xs").unwrap();
        assert_eq!(first, second);
        assert!(!first.identity_eq(&second));
    }

    #[test]
    fn inner_scopes_shadow_and_pop() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", Binding::name(Value::Number(1.0)));
        scopes.push_scope();
        scopes.declare("x", Binding::name(Value::Number(2.0)));
        assert_eq!(scopes.read("x"), Some(Value::Number(2.0)));
        scopes.pop_scope();
        assert_eq!(scopes.read("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn assignment_grows_the_history() {
        let scopes = ScopeStack::new();
        scopes.declare("score", Binding::variable(Value::Number(0.0)));
        assert_eq!(
            scopes.target("score"),
            Some(TargetKind::Variable { revisions: 1 })
        );
        assert_eq!(scopes.assign("score", Value::Number(5.0)), Ok(2));
        assert_eq!(scopes.read("score"), Some(Value::Number(5.0)));
        assert_eq!(scopes.revision_value("score", 0), Some(Value::Number(0.0)));
        assert_eq!(scopes.revision_value("score", 1), Some(Value::Number(5.0)));
    }

    #[test]
    fn names_refuse_reassignment() {
        let scopes = ScopeStack::new();
        scopes.declare("pi", Binding::name(Value::Number(3.0)));
        assert_eq!(
            scopes.assign("pi", Value::Number(4.0)),
            Err(AssignError::Immutable)
        );
        assert_eq!(
            scopes.assign("tau", Value::Number(6.0)),
            Err(AssignError::Undefined)
        );
    }

    #[test]
    fn dotted_paths_step_through_objects() {
        let scopes = ScopeStack::new();
        let fields = ScopeHandle::new();
        fields
            .borrow_mut()
            .insert("hp".to_string(), Binding::variable(Value::Number(10.0)));
        scopes.declare(
            "player",
            Binding::name(Value::Object(std::rc::Rc::new(ObjectValue {
                class_name: "Player".to_string(),
                namespace: fields,
                equality_ratio: OBJECT_EQUALITY_RATIO,
            }))),
        );
        assert_eq!(scopes.read("player.hp"), Some(Value::Number(10.0)));
        assert_eq!(
            scopes.target("player.hp"),
            Some(TargetKind::Variable { revisions: 1 })
        );
        assert_eq!(scopes.read("player.mp"), None);
        assert_eq!(scopes.assign("player.hp", Value::Number(7.0)), Ok(2));
        assert_eq!(scopes.read("player.hp"), Some(Value::Number(7.0)));
    }

    #[test]
    fn delete_removes_innermost_first() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", Binding::name(Value::Number(1.0)));
        scopes.push_scope();
        scopes.declare("x", Binding::name(Value::Number(2.0)));
        assert!(scopes.delete("x"));
        assert_eq!(scopes.read("x"), Some(Value::Number(1.0)));
        assert!(scopes.delete("x"));
        assert!(!scopes.delete("x"));
    }
}

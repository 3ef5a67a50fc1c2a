//! Host references the editor hands its nodes to.
//!
//! A host may want the field node in several places at once (its own handle,
//! a measuring helper, a focus manager). [`ComposedRef`] fans one assignment
//! out to every registered [`AssignableRef`].

use crate::config::DiagnosticMode;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type RefCallback<T> = Box<dyn FnMut(Option<T>)>;

/// A place a node can be assigned to.
pub enum AssignableRef<T> {
    /// Called with the node on placement and `None` on removal.
    Callback(RefCallback<T>),
    /// Shared cell holding the current node.
    Slot(Rc<RefCell<Option<T>>>),
}

impl<T> fmt::Debug for AssignableRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("AssignableRef::Callback"),
            Self::Slot(_) => f.write_str("AssignableRef::Slot"),
        }
    }
}

impl<T> AssignableRef<T> {
    /// Wrap a callback.
    pub fn callback(callback: impl FnMut(Option<T>) + 'static) -> Self {
        Self::Callback(Box::new(callback))
    }

    /// Share `slot` with the editor.
    #[must_use]
    pub fn slot(slot: &Rc<RefCell<Option<T>>>) -> Self {
        Self::Slot(Rc::clone(slot))
    }

    /// Assign `value`.
    ///
    /// # Errors
    ///
    /// In [`DiagnosticMode::Development`], returns [`Error::RefAssignment`]
    /// when the slot is borrowed elsewhere. In production the failure is
    /// logged and dropped.
    pub fn assign(&mut self, value: Option<T>, mode: DiagnosticMode) -> Result<()> {
        match self {
            Self::Callback(callback) => {
                callback(value);
                Ok(())
            }
            Self::Slot(slot) => match slot.try_borrow_mut() {
                Ok(mut current) => {
                    *current = value;
                    Ok(())
                }
                Err(_) => report(mode, "slot (currently borrowed)"),
            },
        }
    }
}

fn report(mode: DiagnosticMode, target: &str) -> Result<()> {
    match mode {
        DiagnosticMode::Development => Err(Error::RefAssignment(target.to_string())),
        DiagnosticMode::Production => {
            emit_log(
                LogLevel::Debug,
                &format!("ignoring failed assignment to ref {target}"),
            );
            Ok(())
        }
    }
}

/// Several refs assigned together.
#[derive(Debug)]
pub struct ComposedRef<T> {
    refs: Vec<AssignableRef<T>>,
    mode: DiagnosticMode,
}

impl<T: Clone> Default for ComposedRef<T> {
    fn default() -> Self {
        Self::new(DiagnosticMode::default())
    }
}

impl<T: Clone> ComposedRef<T> {
    /// Create an empty composition.
    #[must_use]
    pub fn new(mode: DiagnosticMode) -> Self {
        Self {
            refs: Vec::new(),
            mode,
        }
    }

    /// Add a ref (builder pattern).
    #[must_use]
    pub fn with(mut self, target: AssignableRef<T>) -> Self {
        self.refs.push(target);
        self
    }

    /// Add a ref.
    pub fn push(&mut self, target: AssignableRef<T>) {
        self.refs.push(target);
    }

    /// Number of refs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether no refs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Assign `value` to every ref.
    ///
    /// Every ref is attempted even after one fails.
    ///
    /// # Errors
    ///
    /// Returns the first failure, see [`AssignableRef::assign`].
    pub fn assign(&mut self, value: Option<T>) -> Result<()> {
        let mut first_error = None;
        for target in &mut self.refs {
            if let Err(err) = target.assign(value.clone(), self.mode) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_to_every_ref() {
        let slot = Rc::new(RefCell::new(None));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut composed = ComposedRef::new(DiagnosticMode::Development)
            .with(AssignableRef::slot(&slot))
            .with(AssignableRef::callback(move |node: Option<u32>| {
                sink.borrow_mut().push(node);
            }));
        assert_eq!(composed.len(), 2);

        composed.assign(Some(7)).unwrap();
        assert_eq!(*slot.borrow(), Some(7));
        composed.assign(None).unwrap();
        assert_eq!(*slot.borrow(), None);
        assert_eq!(*seen.borrow(), vec![Some(7), None]);
    }

    #[test]
    fn test_borrowed_slot_fails_in_development() {
        let slot = Rc::new(RefCell::new(Some(1)));
        let mut target = AssignableRef::slot(&slot);
        let guard = slot.borrow();
        let err = target.assign(Some(2), DiagnosticMode::Development).unwrap_err();
        assert!(matches!(err, Error::RefAssignment(_)));
        drop(guard);
        assert_eq!(*slot.borrow(), Some(1));
    }

    #[test]
    fn test_borrowed_slot_is_ignored_in_production() {
        let slot = Rc::new(RefCell::new(Some(1)));
        let other = Rc::new(RefCell::new(None));
        let mut composed = ComposedRef::new(DiagnosticMode::Production)
            .with(AssignableRef::slot(&slot))
            .with(AssignableRef::slot(&other));

        let guard = slot.borrow();
        assert!(composed.assign(Some(2)).is_ok());
        drop(guard);
        assert_eq!(*slot.borrow(), Some(1));
        assert_eq!(*other.borrow(), Some(2));
    }

    #[test]
    fn test_failure_does_not_stop_later_refs() {
        let slot = Rc::new(RefCell::new(None));
        let other = Rc::new(RefCell::new(None));
        let mut composed = ComposedRef::new(DiagnosticMode::Development);
        composed.push(AssignableRef::slot(&slot));
        composed.push(AssignableRef::slot(&other));

        let guard = slot.borrow_mut();
        assert!(composed.assign(Some("field")).is_err());
        drop(guard);
        assert_eq!(*other.borrow(), Some("field"));
    }
}

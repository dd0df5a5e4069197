//! Indirection resolver.
//!
//! Strips reference layers off a [`Value`] down to the first concrete
//! value. The walk tracks visited cell addresses so that self-referential
//! graphs terminate: a revisited address stops the walk and yields the
//! reference value itself, which the kind dispatch then rejects as an
//! unsupported kind. Dereferencing never panics; a cell that cannot be
//! borrowed leaves the current value unchanged.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::value::Value;

/// Follow `Ref` layers down to a concrete value.
///
/// Returns a clone of the innermost non-reference value, or the last
/// reachable reference value when a cycle or an unborrowable cell is hit.
pub fn resolve(value: &Value) -> Value {
    let mut current = value.clone();
    let mut visited: FxHashSet<*const ()> = FxHashSet::default();

    loop {
        let Value::Ref(cell) = &current else {
            return current;
        };

        let addr = Rc::as_ptr(cell) as *const ();
        if !visited.insert(addr) {
            // Cycle: this cell was already dereferenced on this walk.
            return current;
        }

        // The borrow of `cell` must end before `current` can move out, so
        // the clone is taken first and the walk decision made after.
        let next = match cell.try_borrow() {
            Ok(inner) => Some(inner.clone()),
            // Unborrowable cell: dereferencing is unsafe, stop here.
            Err(_) => None,
        };
        match next {
            Some(v) => current = v,
            None => return current,
        }
    }
}

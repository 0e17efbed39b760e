// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
Script snippets the host injects into every page, tagged by injection point.
*/

#![warn(missing_docs)]

use std::cell::RefCell;

/// When during a navigation an injected script runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InjectionPoint {
    /// Before the document starts loading.
    DocumentStart,
    /// After the document finished parsing.
    DocumentEnd,
    /// As soon as the `<head>` element exists.
    HeadReady,
}

const INJECTION_POINTS: [InjectionPoint; 3] =
    [InjectionPoint::DocumentStart, InjectionPoint::DocumentEnd, InjectionPoint::HeadReady];

/// One script snippet with the origin patterns it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptItem {
    /// The JavaScript source.
    pub script: String,
    /// Origin match rules; an empty list matches every origin.
    pub rules: Vec<String>,
}

/// The staged injection sets of one delegate, one slot per injection point.
///
/// A staged set is handed to the engine exactly once; the engine applies it
/// on each navigation that follows. Re-staging replaces the slot and re-arms
/// the handoff, so settings changes while the engine runs take effect.
pub struct ScriptInjectionSet {
    staged: [RefCell<Option<Vec<ScriptItem>>>; 3],
}

impl ScriptInjectionSet {
    pub(crate) fn new() -> Self {
        Self { staged: [RefCell::new(None), RefCell::new(None), RefCell::new(None)] }
    }

    fn slot(&self, point: InjectionPoint) -> &RefCell<Option<Vec<ScriptItem>>> {
        &self.staged[INJECTION_POINTS.iter().position(|p| *p == point).unwrap()]
    }

    /// Stage `items` for `point`, replacing anything staged before.
    pub fn stage(&self, point: InjectionPoint, items: Vec<ScriptItem>) {
        *self.slot(point).borrow_mut() = Some(items);
    }

    /// Consume the staged set for `point`, if any.
    pub fn take(&self, point: InjectionPoint) -> Option<Vec<ScriptItem>> {
        self.slot(point).borrow_mut().take()
    }

    /// Whether a set is staged for `point`.
    pub fn is_staged(&self, point: InjectionPoint) -> bool {
        self.slot(point).borrow().is_some()
    }

    /// Iterate the points that currently have a staged set.
    pub(crate) fn staged_points(&self) -> Vec<InjectionPoint> {
        INJECTION_POINTS.iter().copied().filter(|point| self.is_staged(*point)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: &str) -> ScriptItem {
        ScriptItem { script: source.into(), rules: Vec::new() }
    }

    #[test]
    fn staged_sets_are_consumed_once() {
        let set = ScriptInjectionSet::new();
        set.stage(InjectionPoint::DocumentStart, vec![item("a")]);
        assert!(set.is_staged(InjectionPoint::DocumentStart));
        assert!(!set.is_staged(InjectionPoint::DocumentEnd));
        assert_eq!(set.take(InjectionPoint::DocumentStart).unwrap().len(), 1);
        assert!(set.take(InjectionPoint::DocumentStart).is_none());
    }

    #[test]
    fn restaging_replaces_and_rearms() {
        let set = ScriptInjectionSet::new();
        set.stage(InjectionPoint::DocumentEnd, vec![item("a")]);
        set.stage(InjectionPoint::DocumentEnd, vec![item("b"), item("c")]);
        let items = set.take(InjectionPoint::DocumentEnd).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].script, "b");
    }

    #[test]
    fn staged_points_reports_only_staged_slots() {
        let set = ScriptInjectionSet::new();
        set.stage(InjectionPoint::HeadReady, vec![item("a")]);
        assert_eq!(set.staged_points(), vec![InjectionPoint::HeadReady]);
    }
}

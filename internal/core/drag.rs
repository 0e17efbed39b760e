// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
The drag-and-drop sub-protocol layered on the event router.

A [`DragSession`] spans exactly one drag gesture: it is created when the
gesture starts, carries the payload while the pointer is over the component,
and is destroyed on end or cancel. No drag state outlives the gesture.
*/

#![warn(missing_docs)]

use std::cell::Cell;

/// The phase of a drag event dispatched to the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum DragAction {
    /// The drag entered the component.
    Enter,
    /// The drag moved over the component.
    Over,
    /// The drag left the component without dropping.
    Leave,
    /// The payload was dropped.
    Drop,
    /// The gesture ended.
    End,
    /// The gesture was cancelled.
    Cancel,
}

/// The operation a drop target accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum DragOperation {
    /// The drop was declined.
    #[default]
    None,
    /// The data is copied.
    Copy,
    /// The data is moved.
    Move,
    /// A link to the data is created.
    Link,
}

/// The payload of a drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragData {
    /// Plain-text content.
    pub plain_text: String,
    /// HTML content.
    pub html: String,
    /// Dragged URIs, e.g. file paths.
    pub uris: Vec<String>,
}

/// A drag event as dispatched to the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineDragEvent {
    /// Pointer x coordinate, component-relative.
    pub x: i32,
    /// Pointer y coordinate, component-relative.
    pub y: i32,
    /// The phase of the gesture.
    pub action: DragAction,
}

/// Transient state of one drag gesture, owned by the event router.
pub struct DragSession {
    data: DragData,
    accepted: Cell<DragOperation>,
}

impl DragSession {
    pub(crate) fn new(data: DragData) -> Self {
        Self { data, accepted: Cell::new(DragOperation::None) }
    }

    /// The payload carried by this gesture.
    pub fn data(&self) -> &DragData {
        &self.data
    }

    /// The operation the engine accepted for the drop, [`DragOperation::None`]
    /// until a drop happened.
    pub fn accepted_operation(&self) -> DragOperation {
        self.accepted.get()
    }

    pub(crate) fn set_accepted_operation(&self, operation: DragOperation) {
        self.accepted.set(operation);
    }
}

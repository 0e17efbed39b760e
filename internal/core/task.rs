// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
UI-thread marshaling.

The delegate and the event router live on the UI thread; the native engine
invokes callbacks from its own render and IPC threads. Every such callback is
wrapped in a task and posted through an [`EventLoopProxy`] before it touches
delegate or host state. This is a hard rule of the adapter, not an
optimization: the UI tree is single-threaded by contract.
*/

#![warn(missing_docs)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::EventLoopError;

/// A task posted towards the UI thread.
pub type Task = Box<dyn FnOnce() + Send>;

/// Posts tasks onto the UI thread's cooperative task queue.
///
/// Hosts with their own event loop implement this over their loop's proxy;
/// the [`TaskQueue`] below is a ready-made implementation for hosts (and
/// tests) that pump the queue manually.
pub trait EventLoopProxy: Send + Sync {
    /// Enqueue `task` to run on the UI thread. Fails only when the loop is
    /// gone; callers treat that as a silent drop.
    fn post(&self, task: Task) -> Result<(), EventLoopError>;
}

/// A single-consumer task queue: any thread posts, the UI thread drains.
///
/// The thread that created the queue is remembered and unparked on every
/// post, so a host sleeping in `std::thread::park()` wakes up to process the
/// queue.
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    ui_thread: std::thread::Thread,
}

impl TaskQueue {
    /// Creates the queue. Call this on the UI thread.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { tasks: Mutex::new(VecDeque::new()), ui_thread: std::thread::current() })
    }

    /// Runs all tasks queued so far, in posting order, and returns how many
    /// ran. Tasks posted while draining are picked up in the same call.
    pub fn drain(&self) -> usize {
        let mut count = 0;
        loop {
            let task = self.tasks.lock().unwrap().pop_front();
            match task {
                Some(task) => {
                    task();
                    count += 1;
                }
                None => return count,
            }
        }
    }

    /// Whether tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().unwrap().is_empty()
    }
}

impl EventLoopProxy for TaskQueue {
    fn post(&self, task: Task) -> Result<(), EventLoopError> {
        self.tasks.lock().unwrap().push_back(task);
        self.ui_thread.unpark();
        Ok(())
    }
}

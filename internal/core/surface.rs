// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
Ownership of the native graphics bundle the engine composites into.

The manager enforces strict create-before-use and destroy-after-last-use
ordering: handles are acquired once per attach, resized idempotently, and
destroyed in reverse acquisition order. Every operation after release is a
no-op.
*/

#![warn(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{NativeWindow, PhysicalSize, SurfaceError};
use crate::engine::WebEngineBackend;

/// The pixel requirements of the surface, matched against what the platform
/// can provide. Unsatisfiable requirements fail surface acquisition loudly.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Bits for the red channel.
    pub red_bits: u8,
    /// Bits for the green channel.
    pub green_bits: u8,
    /// Bits for the blue channel.
    pub blue_bits: u8,
    /// Bits for the alpha channel.
    pub alpha_bits: u8,
    /// The OpenGL ES major version requested for the context.
    pub gles_version: u8,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { red_bits: 8, green_bits: 8, blue_bits: 8, alpha_bits: 8, gles_version: 2 }
    }
}

/// The opaque handles of one allocated surface: display connection, render
/// context, compositor surface, and the native window they belong to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SurfaceBundle {
    /// The display connection handle.
    pub display: u64,
    /// The render context handle.
    pub context: u64,
    /// The compositor surface handle.
    pub surface: u64,
    /// The native window the surface was allocated from.
    pub window: NativeWindow,
}

enum SurfaceState {
    Released,
    Acquired {
        bundle: SurfaceBundle,
        size: PhysicalSize,
        visible: bool,
        popup: Option<SurfaceBundle>,
    },
}

/// Owns the graphics bundle of one delegate, plus the optional popup surface
/// used by select popups.
pub struct SurfaceManager {
    backend: Rc<dyn WebEngineBackend>,
    state: RefCell<SurfaceState>,
}

impl SurfaceManager {
    pub(crate) fn new(backend: Rc<dyn WebEngineBackend>) -> Self {
        Self { backend, state: RefCell::new(SurfaceState::Released) }
    }

    /// Allocate the graphics bundle from `window`. Fails loudly when the
    /// platform rejects the pixel configuration — fatal to the enclosing
    /// creation request — or when a surface is already held.
    pub fn acquire(
        &self,
        window: NativeWindow,
        config: &SurfaceConfig,
        size: PhysicalSize,
    ) -> Result<SurfaceBundle, SurfaceError> {
        let mut state = self.state.borrow_mut();
        if matches!(*state, SurfaceState::Acquired { .. }) {
            return Err(SurfaceError::AlreadyAcquired);
        }
        let bundle = self.backend.create_surface(window, config)?;
        *state = SurfaceState::Acquired { bundle, size, visible: true, popup: None };
        Ok(bundle)
    }

    /// The handles of the acquired surface, if any.
    pub fn bundle(&self) -> Option<SurfaceBundle> {
        match &*self.state.borrow() {
            SurfaceState::Released => None,
            SurfaceState::Acquired { bundle, .. } => Some(*bundle),
        }
    }

    /// Whether a surface is currently held.
    pub fn is_acquired(&self) -> bool {
        matches!(*self.state.borrow(), SurfaceState::Acquired { .. })
    }

    /// Resize the surface. A no-op when the dimensions are unchanged or no
    /// surface is held.
    pub fn resize(&self, new_size: PhysicalSize) {
        match &mut *self.state.borrow_mut() {
            SurfaceState::Released => {}
            SurfaceState::Acquired { bundle, size, .. } => {
                if *size != new_size {
                    *size = new_size;
                    self.backend.resize_surface(bundle, new_size);
                }
            }
        }
    }

    /// Show or hide the surface without destroying it. A no-op when the
    /// visibility does not change or no surface is held.
    pub fn set_visible(&self, new_visible: bool) {
        match &mut *self.state.borrow_mut() {
            SurfaceState::Released => {}
            SurfaceState::Acquired { bundle, visible, .. } => {
                if *visible != new_visible {
                    *visible = new_visible;
                    self.backend.set_surface_visible(bundle, new_visible);
                }
            }
        }
    }

    /// Allocate the popup surface used by select popups. Requires the main
    /// surface; at most one popup surface exists at a time.
    pub fn acquire_popup(
        &self,
        config: &SurfaceConfig,
    ) -> Result<SurfaceBundle, SurfaceError> {
        let mut state = self.state.borrow_mut();
        match &mut *state {
            SurfaceState::Released => {
                Err(SurfaceError::Unavailable("no main surface".into()))
            }
            SurfaceState::Acquired { popup: Some(_), .. } => Err(SurfaceError::AlreadyAcquired),
            SurfaceState::Acquired { bundle, popup, .. } => {
                let popup_bundle = self.backend.create_surface(bundle.window, config)?;
                *popup = Some(popup_bundle);
                Ok(popup_bundle)
            }
        }
    }

    /// Destroy the popup surface, if one exists.
    pub fn release_popup(&self) {
        let popup = match &mut *self.state.borrow_mut() {
            SurfaceState::Released => None,
            SurfaceState::Acquired { popup, .. } => popup.take(),
        };
        if let Some(popup) = popup {
            self.backend.destroy_surface(popup);
        }
    }

    /// Destroy all handles in reverse acquisition order. Safe to call
    /// multiple times; later calls are no-ops.
    pub fn release(&self) {
        let state = self.state.replace(SurfaceState::Released);
        match state {
            SurfaceState::Released => {}
            SurfaceState::Acquired { bundle, popup, .. } => {
                if let Some(popup) = popup {
                    self.backend.destroy_surface(popup);
                }
                self.backend.destroy_surface(bundle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EngineError;
    use crate::engine::{EngineCreateParams, WebEngine};
    use std::cell::Cell;

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Create(u64),
        Resize(u64, PhysicalSize),
        Visible(u64, bool),
        Destroy(u64),
    }

    struct FakeBackend {
        next_handle: Cell<u64>,
        fail_create: Cell<bool>,
        ops: RefCell<Vec<Op>>,
    }

    impl FakeBackend {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                next_handle: Cell::new(1),
                fail_create: Cell::new(false),
                ops: RefCell::new(Vec::new()),
            })
        }
    }

    impl WebEngineBackend for FakeBackend {
        fn create_surface(
            &self,
            window: NativeWindow,
            _config: &SurfaceConfig,
        ) -> Result<SurfaceBundle, SurfaceError> {
            if self.fail_create.get() {
                return Err(SurfaceError::ConfigRejected);
            }
            let handle = self.next_handle.get();
            self.next_handle.set(handle + 1);
            self.ops.borrow_mut().push(Op::Create(handle));
            Ok(SurfaceBundle { display: 100, context: 200, surface: handle, window })
        }

        fn resize_surface(&self, surface: &SurfaceBundle, size: PhysicalSize) {
            self.ops.borrow_mut().push(Op::Resize(surface.surface, size));
        }

        fn set_surface_visible(&self, surface: &SurfaceBundle, visible: bool) {
            self.ops.borrow_mut().push(Op::Visible(surface.surface, visible));
        }

        fn destroy_surface(&self, surface: SurfaceBundle) {
            self.ops.borrow_mut().push(Op::Destroy(surface.surface));
        }

        fn create_engine(
            &self,
            _params: EngineCreateParams,
        ) -> Result<Rc<dyn WebEngine>, EngineError> {
            Err(EngineError::Creation("not a real backend".into()))
        }
    }

    const SIZE: PhysicalSize = PhysicalSize::new(800, 600);

    #[test]
    fn acquire_twice_is_rejected() {
        let backend = FakeBackend::new();
        let manager = SurfaceManager::new(backend.clone());
        manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE).unwrap();
        assert_eq!(
            manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE),
            Err(SurfaceError::AlreadyAcquired)
        );
    }

    #[test]
    fn failed_acquire_leaves_the_manager_released() {
        let backend = FakeBackend::new();
        backend.fail_create.set(true);
        let manager = SurfaceManager::new(backend.clone());
        assert_eq!(
            manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE),
            Err(SurfaceError::ConfigRejected)
        );
        assert!(!manager.is_acquired());
    }

    #[test]
    fn resize_with_unchanged_size_is_a_no_op() {
        let backend = FakeBackend::new();
        let manager = SurfaceManager::new(backend.clone());
        manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE).unwrap();
        manager.resize(SIZE);
        assert!(!backend.ops.borrow().iter().any(|op| matches!(op, Op::Resize(..))));
        manager.resize(PhysicalSize::new(1024, 768));
        assert!(backend.ops.borrow().contains(&Op::Resize(1, PhysicalSize::new(1024, 768))));
    }

    #[test]
    fn release_destroys_popup_before_main_and_is_idempotent() {
        let backend = FakeBackend::new();
        let manager = SurfaceManager::new(backend.clone());
        manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE).unwrap();
        manager.acquire_popup(&SurfaceConfig::default()).unwrap();
        manager.release();
        manager.release();
        let ops = backend.ops.borrow();
        let destroys: Vec<_> =
            ops.iter().filter_map(|op| match op {
                Op::Destroy(handle) => Some(*handle),
                _ => None,
            })
            .collect();
        // popup (2) goes first, then the main surface (1), exactly once each
        assert_eq!(destroys, vec![2, 1]);
    }

    #[test]
    fn visibility_toggles_reach_the_backend_once_per_change() {
        let backend = FakeBackend::new();
        let manager = SurfaceManager::new(backend.clone());
        manager.acquire(NativeWindow(1), &SurfaceConfig::default(), SIZE).unwrap();
        manager.set_visible(true); // already visible, no-op
        manager.set_visible(false);
        manager.set_visible(false);
        let ops = backend.ops.borrow();
        let toggles: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Visible(_, visible) => Some(*visible),
                _ => None,
            })
            .collect();
        assert_eq!(toggles, vec![false]);
    }
}

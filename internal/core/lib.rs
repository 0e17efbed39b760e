// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

#![doc = include_str!("README.md")]
#![doc(html_logo_url = "https://slint.dev/logo/slint-logo-square-light.svg")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod delegate;
pub mod drag;
pub mod embed;
pub mod engine;
pub mod input;
pub mod script;
pub mod settings;
pub mod sinks;
pub mod surface;
pub mod task;

#[doc(inline)]
pub use api::{WebContext, WebHost};

#[doc(inline)]
pub use delegate::{DelegateState, WebDelegate};

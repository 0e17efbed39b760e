// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: GPL-3.0-only OR LicenseRef-Slint-Royalty-free-2.0 OR LicenseRef-Slint-Software-3.0

/*!
The settings surface of a web component.

[`WebSettings`] is the explicit configuration object handed to the delegate
at construction. Updates while the engine runs go through the delegate's
`update_*` setters, which keep this copy current and forward the single
changed value to the engine's preference object, fire and forget.
*/

#![warn(missing_docs)]

use crate::engine::EnginePreferences;

/// How mixed http/https content is treated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MixedContentMode {
    /// Block all mixed content.
    #[default]
    Never,
    /// Allow loading http content on https pages.
    AlwaysAllow,
    /// Allow it when the engine deems it compatible.
    Compatibility,
}

/// The HTTP cache strategy of the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Use the cache per protocol rules.
    #[default]
    Default,
    /// Use the cache even if stale, fall back to the network.
    CacheElseNetwork,
    /// Never use the cache.
    NoCache,
    /// Only use the cache, never the network.
    CacheOnly,
}

/// The page dark-mode strategy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DarkMode {
    /// Render pages as authored.
    #[default]
    Off,
    /// Render pages dark.
    On,
    /// Follow the system color scheme.
    Auto,
}

/// The adjustable settings of one web component instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WebSettings {
    /// Whether JavaScript runs.
    pub javascript_enabled: bool,
    /// Whether `file://` URLs may be loaded.
    pub file_access: bool,
    /// Whether images loaded over the network are blocked.
    pub block_network_image: bool,
    /// Whether images load automatically.
    pub loads_images_automatically: bool,
    /// How mixed content is treated.
    pub mixed_content_mode: MixedContentMode,
    /// Whether pinch zoom is available.
    pub zoom_access: bool,
    /// Whether DOM storage is available.
    pub dom_storage_enabled: bool,
    /// Whether the Web SQL database is available.
    pub database_enabled: bool,
    /// Whether geolocation is available.
    pub geolocation_enabled: bool,
    /// Whether media playback needs a user gesture.
    pub media_play_gesture_access: bool,
    /// Whether `window.open` may create sibling components.
    pub multi_window_access: bool,
    /// Whether `window.open` works without a user gesture.
    pub allow_window_open_method: bool,
    /// The HTTP cache strategy.
    pub cache_mode: CacheMode,
    /// The dark-mode strategy.
    pub dark_mode: DarkMode,
    /// Whether algorithmic darkening is forced in dark mode.
    pub force_dark_access: bool,
    /// Text zoom in percent.
    pub text_zoom_ratio: i32,
    /// Initial page scale in percent.
    pub initial_scale: f32,
    /// User-agent override; empty keeps the engine default.
    pub user_agent: String,
    /// Whether remote debugging is allowed.
    pub web_debugging: bool,
    /// Whether pages load zoomed out to overview.
    pub overview_mode: bool,
    /// Whether pinch zoom renders smoothly.
    pub pinch_smooth_mode: bool,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            file_access: false,
            block_network_image: false,
            loads_images_automatically: true,
            mixed_content_mode: MixedContentMode::default(),
            zoom_access: true,
            dom_storage_enabled: false,
            database_enabled: false,
            geolocation_enabled: true,
            media_play_gesture_access: true,
            multi_window_access: false,
            allow_window_open_method: false,
            cache_mode: CacheMode::default(),
            dark_mode: DarkMode::default(),
            force_dark_access: false,
            text_zoom_ratio: 100,
            initial_scale: 100.,
            user_agent: String::new(),
            web_debugging: false,
            overview_mode: true,
            pinch_smooth_mode: false,
        }
    }
}

impl WebSettings {
    /// Push the complete set into the engine's preference object. Used right
    /// after engine creation; later changes go value by value.
    pub fn apply_to(&self, prefs: &dyn EnginePreferences) {
        prefs.set_javascript_enabled(self.javascript_enabled);
        prefs.set_file_access(self.file_access);
        prefs.set_block_network_image(self.block_network_image);
        prefs.set_loads_images_automatically(self.loads_images_automatically);
        prefs.set_mixed_content_mode(self.mixed_content_mode);
        prefs.set_zoom_access(self.zoom_access);
        prefs.set_dom_storage_enabled(self.dom_storage_enabled);
        prefs.set_database_enabled(self.database_enabled);
        prefs.set_geolocation_enabled(self.geolocation_enabled);
        prefs.set_media_play_gesture_access(self.media_play_gesture_access);
        prefs.set_multi_window_access(self.multi_window_access);
        prefs.set_allow_window_open_method(self.allow_window_open_method);
        prefs.set_cache_mode(self.cache_mode);
        prefs.set_dark_mode(self.dark_mode);
        prefs.set_force_dark_access(self.force_dark_access);
        prefs.set_text_zoom_ratio(self.text_zoom_ratio);
        prefs.set_initial_scale(self.initial_scale);
        if !self.user_agent.is_empty() {
            prefs.set_user_agent(&self.user_agent);
        }
        prefs.set_web_debugging(self.web_debugging);
        prefs.set_overview_mode(self.overview_mode);
        prefs.set_pinch_smooth_mode(self.pinch_smooth_mode);
    }
}

// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active section election from visibility reports.
//!
//! Hosts observe each section's visibility (an intersection observer in a
//! browser) and report the visible ratio through [`ScrollSpy::observe`].
//! Whenever a section reports that it is intersecting, the section with the
//! highest last-known ratio becomes active. Ties go to the section reported
//! first.

use alloc::string::String;
use alloc::vec::Vec;

/// Observer options a host should use when watching sections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpyConfig {
    /// Visibility ratio at which the observer reports a change.
    pub threshold: f64,
    /// Root margin, in CSS margin syntax, shrinking the viewport to a band
    /// near its top.
    pub root_margin: &'static str,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            root_margin: "-20% 0px -70% 0px",
        }
    }
}

/// Tracks visibility ratios and elects the active section.
#[derive(Clone, Debug, Default)]
pub struct ScrollSpy {
    config: SpyConfig,
    /// Last ratio per section, in first-report order.
    ratios: Vec<(String, f64)>,
    active: Option<String>,
}

impl ScrollSpy {
    /// Creates a spy with no observations.
    #[must_use]
    pub fn new(config: SpyConfig) -> Self {
        Self {
            config,
            ratios: Vec::new(),
            active: None,
        }
    }

    /// Returns the observer options.
    #[must_use]
    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    /// Returns the elected section.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Records a visibility report. Returns the newly elected section if the
    /// election changed it.
    pub fn observe(&mut self, id: &str, ratio: f64, intersecting: bool) -> Option<&str> {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        match self.ratios.iter_mut().find(|(known, _)| known == id) {
            Some((_, r)) => *r = ratio,
            None => self.ratios.push((id.into(), ratio)),
        }
        if !intersecting {
            return None;
        }

        let mut elected = id;
        let mut best = 0.0;
        for (known, r) in &self.ratios {
            if *r > best {
                best = *r;
                elected = known;
            }
        }
        if self.active.as_deref() == Some(elected) {
            return None;
        }
        self.active = Some(elected.into());
        self.active.as_deref()
    }

    /// Forgets a section, e.g. when it unmounts. The active section stays
    /// until the next election.
    pub fn forget(&mut self, id: &str) {
        self.ratios.retain(|(known, _)| known != id);
    }

    /// Forgets every observation.
    pub fn clear(&mut self) {
        self.ratios.clear();
        self.active = None;
    }
}

//! Cached viewport dimensions tracked separately per orientation.

/// One raw viewport reading from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportSample {
    /// `window.innerWidth`.
    pub inner_width: u32,
    /// `window.innerHeight`.
    pub inner_height: u32,
    /// `screen.width`.
    pub screen_width: u32,
    /// `screen.height`.
    pub screen_height: u32,
}

impl ViewportSample {
    /// Reading where the screen matches the inner viewport.
    pub const fn new(inner_width: u32, inner_height: u32) -> Self {
        Self {
            inner_width,
            inner_height,
            screen_width: inner_width,
            screen_height: inner_height,
        }
    }
}

/// Portrait and landscape dimensions cached independently.
///
/// Within one orientation the cached size only grows, so an on-screen keyboard shrinking
/// the visible height does not make layouts flicker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    portrait_width: u32,
    portrait_height: u32,
    landscape_width: u32,
    landscape_height: u32,
    is_portrait: Option<bool>,
}

impl ViewportMetrics {
    /// Returns whether `sample` should be measured: the orientation is unknown, or it is
    /// cached as landscape while the reading is taller than wide (over-wide first reading on
    /// some iOS releases).
    pub fn needs_measure(&self, sample: &ViewportSample) -> bool {
        match self.is_portrait {
            None => true,
            Some(false) => sample.inner_width < sample.inner_height,
            Some(true) => false,
        }
    }

    /// Folds `sample` into the cache when a measurement is due.
    pub fn measure(&mut self, sample: ViewportSample) {
        if !self.needs_measure(&sample) {
            return;
        }
        if sample.screen_width == 0 || sample.screen_height == 0 {
            return;
        }

        if sample.inner_width < sample.inner_height {
            if self.portrait_width <= sample.inner_width {
                self.is_portrait = Some(true);
                self.portrait_width = sample.inner_width;
            }
            if self.portrait_height <= sample.inner_height {
                self.is_portrait = Some(true);
                self.portrait_height = sample.inner_height;
            }
        } else {
            // A narrower landscape reading means the keyboard is up on a portrait device.
            if self.landscape_width > sample.inner_width {
                self.is_portrait = Some(true);
            }
            if self.landscape_width <= sample.inner_width {
                self.is_portrait = Some(false);
                self.landscape_width = sample.inner_width;
            }
            if self.landscape_height <= sample.inner_height {
                self.is_portrait = Some(false);
                self.landscape_height = sample.inner_height;
            }
        }
    }

    /// Clears the orientation flag so the next read re-measures.
    pub fn invalidate(&mut self) {
        self.is_portrait = None;
    }

    /// Cached orientation, `None` until measured.
    pub fn orientation(&self) -> Option<bool> {
        self.is_portrait
    }

    /// Returns whether the cached orientation is portrait.
    pub fn is_portrait(&self) -> bool {
        self.is_portrait == Some(true)
    }

    /// Width for the cached orientation.
    pub fn width(&self) -> u32 {
        if self.is_portrait() {
            self.portrait_width
        } else {
            self.landscape_width
        }
    }

    /// Height for the cached orientation.
    pub fn height(&self) -> u32 {
        if self.is_portrait() {
            self.portrait_height
        } else {
            self.landscape_height
        }
    }
}

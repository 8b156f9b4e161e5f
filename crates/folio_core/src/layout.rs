//! Responsive page geometry derived from the viewport.

const MOBILE_WIDTH_FRACTION: f32 = 0.95;
const MOBILE_MAX_HEIGHT_FRACTION: f32 = 0.7;
const TABLET_WIDTH_FRACTION: f32 = 0.93;
const TABLET_MAX_SPREAD_WIDTH: f32 = 700.0;
const DESKTOP_SPREAD_WIDTH: f32 = 900.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Page aspect ratio expressed as `width:height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Returns `None` for a ratio with a zero side.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn height_for(&self, width: f32) -> f32 {
        width * self.height as f32 / self.width as f32
    }

    pub fn width_for(&self, height: f32) -> f32 {
        height * self.width as f32 / self.height as f32
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 3,
            height: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// Viewports at least this wide are treated as tablets.
    pub tablet_min: u32,
    /// Viewports at least this wide are treated as desktops.
    pub desktop_min: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_min: 640,
            desktop_min: 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpreadMode {
    #[default]
    Single,
    Double,
}

impl SpreadMode {
    /// Page indices advanced per navigation action.
    pub fn stride(self) -> usize {
        match self {
            SpreadMode::Single => 1,
            SpreadMode::Double => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub device: DeviceClass,
    pub spread_mode: SpreadMode,
    pub page_width: f32,
    pub page_height: f32,
}

impl PageLayout {
    pub fn spread_width(&self) -> f32 {
        self.page_width * self.spread_mode.stride() as f32
    }
}

/// Computes page dimensions for a viewport. Pure; never fails.
pub fn compute_layout(
    viewport: Viewport,
    breakpoints: &Breakpoints,
    aspect: AspectRatio,
) -> PageLayout {
    // NaN collapses to zero here as well.
    let width = viewport.width.max(0.0);
    let height = viewport.height.max(0.0);

    if width < breakpoints.tablet_min as f32 {
        let mut page_height = aspect.height_for(width * MOBILE_WIDTH_FRACTION);
        if height > 0.0 {
            page_height = page_height.min(height * MOBILE_MAX_HEIGHT_FRACTION);
        }
        return PageLayout {
            device: DeviceClass::Mobile,
            spread_mode: SpreadMode::Single,
            page_width: aspect.width_for(page_height),
            page_height,
        };
    }

    if width < breakpoints.desktop_min as f32 {
        let spread_width = (width * TABLET_WIDTH_FRACTION).min(TABLET_MAX_SPREAD_WIDTH);
        let spread_mode = if viewport.is_landscape() {
            SpreadMode::Double
        } else {
            SpreadMode::Single
        };
        let page_width = spread_width / spread_mode.stride() as f32;
        return PageLayout {
            device: DeviceClass::Tablet,
            spread_mode,
            page_width,
            page_height: aspect.height_for(page_width),
        };
    }

    let page_width = DESKTOP_SPREAD_WIDTH / 2.0;
    PageLayout {
        device: DeviceClass::Desktop,
        spread_mode: SpreadMode::Double,
        page_width,
        page_height: aspect.height_for(page_width),
    }
}

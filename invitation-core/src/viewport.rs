use asset_registry::Category;
use serde::{Deserialize, Serialize};

pub const MOBILE_BREAKPOINT: u32 = 768;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl Viewport {
    pub fn from_width(width: f64) -> Self {
        if width < f64::from(MOBILE_BREAKPOINT) {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Viewport::Mobile
    }

    pub fn category(self) -> Category {
        match self {
            Viewport::Desktop => Category::Desktop,
            Viewport::Mobile => Category::Mobile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(Viewport::from_width(767.0), Viewport::Mobile);
        assert_eq!(Viewport::from_width(767.9), Viewport::Mobile);
        assert_eq!(Viewport::from_width(768.0), Viewport::Desktop);
        assert_eq!(Viewport::from_width(1440.0), Viewport::Desktop);
    }

    #[test]
    fn maps_to_gallery_category() {
        assert_eq!(Viewport::Mobile.category(), Category::Mobile);
        assert_eq!(Viewport::default().category(), Category::Desktop);
    }
}

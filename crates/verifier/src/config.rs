//! Verifier configuration.

use aixverify_common::{Error, Result};

/// Required icon edge length in pixels.
pub const ICON_SIZE: u32 = 128;

/// Rules applied to `Payload/Icon.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconPolicy {
    /// Required width and height.
    pub size: u32,
    /// Reject an icon when either dimension is off. When unset, an icon is
    /// rejected only if both width and height are off.
    pub strict_dimensions: bool,
}

impl IconPolicy {
    pub fn new(size: u32, strict_dimensions: bool) -> Result<Self> {
        if size == 0 {
            return Err(Error::Config("icon size must be greater than zero".to_string()));
        }
        Ok(Self {
            size,
            strict_dimensions,
        })
    }

    /// Apply the dimension rule.
    pub fn dimensions_ok(&self, width: u32, height: u32) -> bool {
        if self.strict_dimensions {
            width == self.size && height == self.size
        } else {
            width == self.size || height == self.size
        }
    }
}

impl Default for IconPolicy {
    fn default() -> Self {
        Self {
            size: ICON_SIZE,
            strict_dimensions: false,
        }
    }
}

/// Configuration for a verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    pub icon: IconPolicy,
}

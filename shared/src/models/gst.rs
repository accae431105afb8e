//! GST policy

use serde::{Deserialize, Serialize};

/// Goods and Services Tax policy
///
/// SGST and CGST are independently configurable percentages applied to
/// the pre-tax subtotal when `enabled` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstPolicy {
    pub enabled: bool,
    pub sgst_percentage: f64,
    pub cgst_percentage: f64,
}

impl Default for GstPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            sgst_percentage: 9.0,
            cgst_percentage: 9.0,
        }
    }
}

impl GstPolicy {
    /// A disabled policy (no tax lines)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            sgst_percentage: 0.0,
            cgst_percentage: 0.0,
        }
    }
}

/// Partial update payload for the GST policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GstPolicyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sgst_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgst_percentage: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nine_nine_enabled() {
        let gst = GstPolicy::default();
        assert!(gst.enabled);
        assert_eq!(gst.sgst_percentage, 9.0);
        assert_eq!(gst.cgst_percentage, 9.0);
    }
}

use serde::Deserialize;

use crate::error::{RegionError, RegionResult};

/// Caps on how many vertices point-accumulating selectors accept.
///
/// `None` means unlimited. Limits can be built in code or read from JSON:
///
/// ```
/// use voxel_region::selector::SelectorLimits;
///
/// let limits = SelectorLimits::from_json(r#"{ "polygon_vertex_limit": 20 }"#).unwrap();
/// assert_eq!(limits.polygon_vertex_limit, Some(20));
/// assert_eq!(limits.polyhedron_vertex_limit, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectorLimits {
    /// Maximum number of polygon vertices.
    pub polygon_vertex_limit: Option<usize>,
    /// Maximum number of convex polyhedron vertices.
    pub polyhedron_vertex_limit: Option<usize>,
}

impl SelectorLimits {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Parses limits from a JSON object. Missing fields are unlimited.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if the text is not a valid limits object.
    pub fn from_json(text: &str) -> RegionResult<Self> {
        serde_json::from_str(text)
            .map_err(|err| RegionError::invalid(format!("bad selector limits: {err}")))
    }

    /// Returns `true` if a selection holding `count` vertices may not grow under `limit`.
    pub(crate) fn reached(limit: Option<usize>, count: usize) -> bool {
        limit.is_some_and(|limit| count >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_unlimited() {
        assert_eq!(
            SelectorLimits::from_json("{}").unwrap(),
            SelectorLimits::unlimited()
        );
    }

    #[test]
    fn test_both_limits() {
        let limits = SelectorLimits::from_json(
            r#"{ "polygon_vertex_limit": 4, "polyhedron_vertex_limit": 100 }"#,
        )
        .unwrap();
        assert_eq!(limits.polygon_vertex_limit, Some(4));
        assert_eq!(limits.polyhedron_vertex_limit, Some(100));
    }

    #[test]
    fn test_bad_input_is_invalid_argument() {
        for text in [
            "not json",
            r#"{ "polygon_vertex_limit": -1 }"#,
            r#"{ "vertex_limit": 3 }"#,
        ] {
            assert!(matches!(
                SelectorLimits::from_json(text),
                Err(RegionError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_reached() {
        assert!(!SelectorLimits::reached(None, usize::MAX));
        assert!(!SelectorLimits::reached(Some(3), 2));
        assert!(SelectorLimits::reached(Some(3), 3));
    }
}

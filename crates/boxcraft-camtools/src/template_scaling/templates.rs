//! Reference panel paths
//!
//! Hand-tuned outlines of the reference box, used by the template-scaled
//! render mode. The back is stored upside-down and is turned around when
//! it is wrapped into its document.

use crate::hinged_box::PanelKind;

/// Outer dimensions the reference paths were drawn for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateDimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

pub const TEMPLATE_ORIGINAL: TemplateDimensions = TemplateDimensions {
    width: 156.0,
    depth: 156.0,
    height: 150.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelTemplate {
    pub kind: PanelKind,
    pub path: &'static str,
    /// Stored upside-down; rotate by 180 degrees when wrapping
    pub rotate_180: bool,
}

pub static TEMPLATE_SVGS: [PanelTemplate; 6] = [
    PanelTemplate {
        kind: PanelKind::Front,
        path: FRONT_PATH,
        rotate_180: false,
    },
    PanelTemplate {
        kind: PanelKind::Back,
        path: BACK_PATH,
        rotate_180: true,
    },
    PanelTemplate {
        kind: PanelKind::Left,
        path: LEFT_PATH,
        rotate_180: false,
    },
    PanelTemplate {
        kind: PanelKind::Right,
        path: RIGHT_PATH,
        rotate_180: false,
    },
    PanelTemplate {
        kind: PanelKind::Bottom,
        path: BOTTOM_PATH,
        rotate_180: false,
    },
    PanelTemplate {
        kind: PanelKind::Lid,
        path: LID_PATH,
        rotate_180: false,
    },
];

pub fn panel_template(kind: PanelKind) -> &'static PanelTemplate {
    match kind {
        PanelKind::Front => &TEMPLATE_SVGS[0],
        PanelKind::Back => &TEMPLATE_SVGS[1],
        PanelKind::Left => &TEMPLATE_SVGS[2],
        PanelKind::Right => &TEMPLATE_SVGS[3],
        PanelKind::Bottom => &TEMPLATE_SVGS[4],
        PanelKind::Lid => &TEMPLATE_SVGS[5],
    }
}

const FRONT_PATH: &str = "M 3 0 H 153 h 3 v 11.389 h -3 V 25.192 h 3 v 13.802 h -3 V 52.796 h 3 v 13.803 h -3 \
         V 80.401 h 3 v 13.803 h -3 V 108.006 h 3 v 13.802 h -3 V 135.611 h 3 v 14.389 h -3 H \
         137.783 v -3 h -21.74 v 3 H 105.174 v -3 h -10.87 v 3 H 83.435 v -3 h -10.87 v 3 H \
         61.696 v -3 h -10.87 v 3 H 39.957 v -3 h -21.74 v 3 H 3 h -3 v -14.389 h 3 V 121.808 \
         h -3 v -13.802 h 3 V 94.204 h -3 v -13.803 h 3 V 66.599 h -3 v -13.803 h 3 V 38.994 \
         h -3 v -13.802 h 3 V 11.389 h -3 v -11.389 z";

const BACK_PATH: &str = "M 153 150 V 147 h -7.895 h -0.2 v 3 H 137.411 v -3 h -0.2 h -7.895 H 129.116 v 3 h \
         -7.495 v -3 H 121.421 h -7.895 h -0.2 v 3 H 105.832 v -3 h -0.2 h -7.895 H 97.537 v \
         3 h -7.495 v -3 H 89.842 h -7.895 h -0.2 v 3 H 74.253 v -3 h -0.2 h -7.895 H 65.958 \
         v 3 h -7.495 v -3 H 58.263 h -7.895 h -0.2 v 3 H 42.674 v -3 h -0.2 h -7.895 H \
         34.379 v 3 h -7.495 v -3 H 26.684 h -7.895 h -0.2 v 3 H 11.095 v -3 h -0.2 h -7.895 \
         V 150 h -3 v -11.389 h 3 V 124.808 h -3 v -13.802 h 3 V 97.204 h -3 v -13.803 h 3 V \
         69.599 h -3 v -13.803 h 3 V 41.994 h -3 v -13.802 h 3 V 14.389 h -3 v -14.389 h 3 H \
         18.217 v 3 h 21.74 v -3 H 50.826 v 3 h 10.87 v -3 H 72.565 v 3 h 10.87 v -3 H 94.304 \
         v 3 h 10.87 v -3 H 116.043 v 3 h 21.74 v -3 H 153 h 3 v 14.389 h -3 V 28.192 h 3 v \
         13.802 h -3 V 55.796 h 3 v 13.803 h -3 V 83.401 h 3 v 13.803 h -3 V 111.006 h 3 v \
         13.802 h -3 V 138.611 h 3 v 11.389 z M 148.5 144 L 148.523 143.74 L 148.59 143.487 L \
         148.701 143.25 L 148.851 143.036 L 149.036 142.851 L 149.25 142.701 L 149.487 142.59 \
         L 149.74 142.523 L 150 142.5 L 150.26 142.523 L 150.513 142.59 L 150.75 142.701 L \
         150.964 142.851 L 151.149 143.036 L 151.299 143.25 L 151.41 143.487 L 151.477 143.74 \
         L 151.5 144 L 151.477 144.26 L 151.41 144.513 L 151.299 144.75 L 151.149 144.964 L \
         150.964 145.149 L 150.75 145.299 L 150.513 145.41 L 150.26 145.477 L 150 145.5 L \
         149.74 145.477 L 149.487 145.41 L 149.25 145.299 L 149.036 145.149 L 148.851 144.964 \
         L 148.701 144.75 L 148.59 144.513 L 148.523 144.26 Z M 4.5 144 L 4.523 143.74 L 4.59 \
         143.487 L 4.701 143.25 L 4.851 143.036 L 5.036 142.851 L 5.25 142.701 L 5.487 142.59 \
         L 5.74 142.523 L 6 142.5 L 6.26 142.523 L 6.513 142.59 L 6.75 142.701 L 6.964 \
         142.851 L 7.149 143.036 L 7.299 143.25 L 7.41 143.487 L 7.477 143.74 L 7.5 144 L \
         7.477 144.26 L 7.41 144.513 L 7.299 144.75 L 7.149 144.964 L 6.964 145.149 L 6.75 \
         145.299 L 6.513 145.41 L 6.26 145.477 L 6 145.5 L 5.74 145.477 L 5.487 145.41 L 5.25 \
         145.299 L 5.036 145.149 L 4.851 144.964 L 4.701 144.75 L 4.59 144.513 L 4.523 144.26 \
         Z";

const LEFT_PATH: &str = "M 3 0 H 153 v 11.389 h 3 v 13.803 H 153 v 13.802 h 3 v 13.802 H 153 v 13.803 h 3 v \
         13.802 H 153 v 13.803 h 3 v 13.802 H 153 v 13.802 h 3 v 13.803 H 153 v 11.389 v 3 h \
         -15.217 V 147 h -21.74 v 3 h -10.869 V 147 h -10.87 v 3 h -10.869 V 147 h -10.87 v 3 \
         h -10.869 V 147 h -10.87 v 3 h -10.869 V 147 h -21.74 v 3 h -15.217 V 147 v -11.389 \
         h -3 v -13.803 H 3 v -13.802 h -3 v -13.802 H 3 v -13.803 h -3 v -13.802 H 3 v \
         -13.803 h -3 v -13.802 H 3 v -13.802 h -3 v -13.803 H 3 z M 10.25 8 L 10.216 8.391 L \
         10.114 8.77 L 9.949 9.125 L 9.724 9.446 L 9.446 9.724 L 9.125 9.949 L 8.77 10.114 L \
         8.391 10.216 L 8 10.25 L 7.609 10.216 L 7.23 10.114 L 6.875 9.949 L 6.554 9.724 L \
         6.276 9.446 L 6.051 9.125 L 5.886 8.77 L 5.784 8.391 L 5.75 8 L 5.784 7.609 L 5.886 \
         7.23 L 6.051 6.875 L 6.276 6.554 L 6.554 6.276 L 6.875 6.051 L 7.23 5.886 L 7.609 \
         5.784 L 8 5.75 L 8.391 5.784 L 8.77 5.886 L 9.125 6.051 L 9.446 6.276 L 9.724 6.554 \
         L 9.949 6.875 L 10.114 7.23 L 10.216 7.609 Z";

const RIGHT_PATH: &str = "M 3 0 H 153 v 11.389 h 3 v 13.803 H 153 v 13.802 h 3 v 13.802 H 153 v 13.803 h 3 v \
         13.802 H 153 v 13.803 h 3 v 13.802 H 153 v 13.802 h 3 v 13.803 H 153 v 11.389 v 3 h \
         -15.217 V 147 h -21.74 v 3 h -10.869 V 147 h -10.87 v 3 h -10.869 V 147 h -10.87 v 3 \
         h -10.869 V 147 h -10.87 v 3 h -10.869 V 147 h -21.74 v 3 h -15.217 V 147 v -11.389 \
         h -3 v -13.803 H 3 v -13.802 h -3 v -13.802 H 3 v -13.803 h -3 v -13.802 H 3 v \
         -13.803 h -3 v -13.802 H 3 v -13.802 h -3 v -13.803 H 3 z M 150.25 8 L 150.216 8.391 \
         L 150.114 8.77 L 149.949 9.125 L 149.724 9.446 L 149.446 9.724 L 149.125 9.949 L \
         148.77 10.114 L 148.391 10.216 L 148 10.25 L 147.609 10.216 L 147.23 10.114 L \
         146.875 9.949 L 146.554 9.724 L 146.276 9.446 L 146.051 9.125 L 145.886 8.77 L \
         145.784 8.391 L 145.75 8 L 145.784 7.609 L 145.886 7.23 L 146.051 6.875 L 146.276 \
         6.554 L 146.554 6.276 L 146.875 6.051 L 147.23 5.886 L 147.609 5.784 L 148 5.75 L \
         148.391 5.784 L 148.77 5.886 L 149.125 6.051 L 149.446 6.276 L 149.724 6.554 L \
         149.949 6.875 L 150.114 7.23 L 150.216 7.609 Z";

const BOTTOM_PATH: &str = "M 3 3 H 18.217 v -3 h 21.74 v 3 H 50.826 v -3 h 10.87 v 3 H 72.565 v -3 h 10.87 v 3 \
         H 94.304 v -3 h 10.87 v 3 H 116.043 v -3 h 21.74 v 3 H 153 v 15.217 h 3 v 21.74 H \
         153 v 10.869 h 3 v 10.87 H 153 v 10.869 h 3 v 10.87 H 153 v 10.869 h 3 v 10.87 H 153 \
         v 10.869 h 3 v 21.74 H 153 v 15.217 h -15.217 v 3 H 116.043 v -3 h -10.869 v 3 H \
         94.304 v -3 h -10.869 v 3 H 72.565 v -3 h -10.869 v 3 H 50.826 v -3 h -10.869 v 3 H \
         18.217 v -3 h -15.217 v -15.217 H 0 v -21.74 h 3 v -10.869 H 0 v -10.87 h 3 v \
         -10.869 H 0 v -10.87 h 3 v -10.869 H 0 v -10.87 h 3 v -10.869 H 0 v -21.74 h 3 z";

const LID_PATH: &str = "M 0 3 H 3 h 0.2 v -3 h 7.495 V 3 h 0.2 h 7.894 h 0.2 V 0 h 7.495 v 3 h 0.2 H 34.579 \
         h 0.2 v -3 h 7.495 V 3 h 0.2 h 7.894 h 0.2 V 0 h 7.495 v 3 h 0.2 H 66.158 h 0.2 v -3 \
         h 7.495 V 3 h 0.2 h 7.894 h 0.2 V 0 h 7.495 v 3 h 0.2 H 97.737 h 0.2 v -3 h 7.495 V \
         3 h 0.2 h 7.894 h 0.2 V 0 h 7.495 v 3 h 0.2 H 129.316 h 0.2 v -3 h 7.495 V 3 h 0.2 h \
         7.894 h 0.2 V 0 h 7.495 v 3 h 0.2 H 156 v 153 h -156 z";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_indexed_by_kind() {
        for kind in PanelKind::ALL {
            assert_eq!(panel_template(kind).kind, kind);
        }
    }

    #[test]
    fn test_only_back_is_stored_upside_down() {
        let rotated: Vec<_> = TEMPLATE_SVGS
            .iter()
            .filter(|t| t.rotate_180)
            .map(|t| t.kind)
            .collect();
        assert_eq!(rotated, vec![PanelKind::Back]);
    }

    #[test]
    fn test_template_paths_are_straight_lines() {
        for template in &TEMPLATE_SVGS {
            assert!(
                !template.path.contains(['C', 'c', 'Q', 'q', 'A', 'a', 'S', 's']),
                "{} template has curves",
                template.kind
            );
        }
    }
}

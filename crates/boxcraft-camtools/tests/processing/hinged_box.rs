//! Panel generation over a range of box sizes

use boxcraft_camtools::finger_pattern::JointProfile;
use boxcraft_camtools::hinged_box::{generate_box_panels, HingedInputs, PanelKind};

fn inputs(width: f64, depth: f64, height: f64, thickness: f64) -> HingedInputs {
    HingedInputs {
        width_mm: width,
        depth_mm: depth,
        height_mm: height,
        thickness_mm: thickness,
        ..HingedInputs::default()
    }
}

#[test]
fn test_panel_envelopes_follow_inputs() {
    let sizes = [
        (156.0, 156.0, 150.0, 3.0),
        (80.0, 60.0, 40.0, 3.0),
        (300.0, 120.0, 90.0, 6.0),
        (50.0, 50.0, 50.0, 1.5),
    ];

    for (w, d, h, t) in sizes {
        let inputs = inputs(w, d, h, t);
        let panels = generate_box_panels(&inputs);
        for (kind, panel) in panels.iter() {
            let (pw, ph) = kind.nominal_size(w, d, h);
            let bbox = panel.bounding_box();
            assert!(
                (bbox.width() - pw).abs() < 1e-6 && (bbox.height() - ph).abs() < 1e-6,
                "{} of {}x{}x{} is {}x{}",
                kind,
                w,
                d,
                h,
                bbox.width(),
                bbox.height()
            );
            assert!(panel.signed_area() > 0.0);
            assert!(panel.outline.iter().all(|p| p.is_finite()));
        }
    }
}

#[test]
fn test_manual_counts_are_honoured() {
    let inputs = HingedInputs {
        auto_joint_finger_count: false,
        manual_joint_finger_count: 5,
        auto_finger_count: false,
        manual_hinge_finger_count: 7,
        joint_profile: JointProfile::Uniform,
        ..HingedInputs::default()
    };
    let panels = generate_box_panels(&inputs);

    // Plain top, 5 segments (3 tabs) per jointed side: each tab adds 2 points
    // on top of one point per segment.
    let front = panels.get(PanelKind::Front);
    let corners_on_outer_right = front
        .outline
        .iter()
        .filter(|p| (p.x - inputs.width_mm).abs() < 1e-9)
        .count();
    assert_eq!(corners_on_outer_right, 6);

    // 7 knuckle pitches: the lid owns 4 of them
    let lid = panels.get(PanelKind::Lid);
    let knuckle_tops = lid.outline.iter().filter(|p| p.y.abs() < 1e-9).count();
    assert_eq!(knuckle_tops, 8);
}

#[test]
fn test_inputs_round_trip_through_json() {
    let inputs = HingedInputs {
        joint_profile: JointProfile::Ratio { female_ratio: 1.25 },
        ..inputs(120.0, 90.0, 60.0, 4.0)
    };
    let json = serde_json::to_string(&inputs).unwrap();
    let back: HingedInputs = serde_json::from_str(&json).unwrap();
    assert_eq!(generate_box_panels(&inputs), generate_box_panels(&back));
}

#[test]
fn test_panels_serialise_for_preview() {
    let panels = generate_box_panels(&HingedInputs::default());
    let json = panels.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for kind in PanelKind::ALL {
        assert!(value[kind.name()]["outline"].as_array().is_some_and(|a| !a.is_empty()));
    }
    assert_eq!(value["back"]["holes"].as_array().map(Vec::len), Some(2));
}
